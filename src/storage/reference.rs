//! Admin-managed reference data: countries, positions, contract types and
//! attribute categories

use super::{
    models::*,
    schema::{map_unique, now, read_timestamps, FantasyDatabase},
};
use crate::error::{ManagerError, Result};
use crate::types::{AttributeCategoryId, ContractTypeId, CountryId, PositionId};
use crate::validation::Validate;
use rusqlite::{params, Row};

/// Positions inserted by `seed_reference_data`
pub const DEFAULT_POSITIONS: &[&str] = &["GOALKEEPER", "DEFENDER", "MIDFIELDER", "FORWARD"];

/// Contract types inserted by `seed_reference_data`
pub const DEFAULT_CONTRACT_TYPES: &[&str] = &["FREE AGENT", "PERMANENT", "LOAN", "YOUTH"];

fn row_to_country(row: &Row<'_>) -> rusqlite::Result<Country> {
    Ok(Country {
        id: row.get(0)?,
        name: row.get(1)?,
        timestamps: read_timestamps(row, 2)?,
    })
}

fn row_to_position(row: &Row<'_>) -> rusqlite::Result<PlayerPosition> {
    Ok(PlayerPosition {
        id: row.get(0)?,
        position: row.get(1)?,
        timestamps: read_timestamps(row, 2)?,
    })
}

fn row_to_contract_type(row: &Row<'_>) -> rusqlite::Result<ContractType> {
    Ok(ContractType {
        id: row.get(0)?,
        service: row.get(1)?,
        timestamps: read_timestamps(row, 2)?,
    })
}

fn row_to_attribute_category(row: &Row<'_>) -> rusqlite::Result<AttributeCategory> {
    Ok(AttributeCategory {
        id: row.get(0)?,
        attribute: row.get(1)?,
        category: row.get(2)?,
        timestamps: read_timestamps(row, 3)?,
    })
}

/// Counts of rows inserted by a seed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub positions: usize,
    pub contract_types: usize,
}

impl FantasyDatabase {
    pub fn create_country(&mut self, draft: &NewCountry) -> Result<Country> {
        draft.validate(&self.settings)?;

        let now = now();
        self.conn
            .execute(
                "INSERT INTO countries (name, created_at, updated_at) VALUES (?, ?, ?)",
                params![draft.name, now, now],
            )
            .map_err(|e| map_unique(e, "countries", "name", "country"))?;
        let id = CountryId::new(self.conn.last_insert_rowid());

        self.get_country(id)?.ok_or(ManagerError::NotFound {
            resource: "country",
            id: id.as_i64(),
        })
    }

    pub fn get_country(&self, id: CountryId) -> Result<Option<Country>> {
        self.fetch_one(
            "SELECT id, name, created_at, updated_at FROM countries WHERE id = ?",
            [id],
            row_to_country,
        )
    }

    pub fn list_countries(&self) -> Result<Vec<Country>> {
        self.collect_rows(
            "SELECT id, name, created_at, updated_at FROM countries ORDER BY id",
            [],
            row_to_country,
        )
    }

    /// Delete a country. Its leagues (and their teams) cascade; players and
    /// managers keep existing with no country.
    pub fn delete_country(&mut self, id: CountryId) -> Result<bool> {
        let rows = self.conn.execute("DELETE FROM countries WHERE id = ?", [id])?;
        Ok(rows > 0)
    }

    pub fn create_position(&mut self, draft: &NewPosition) -> Result<PlayerPosition> {
        draft.validate(&self.settings)?;

        let now = now();
        self.conn
            .execute(
                "INSERT INTO player_positions (position, created_at, updated_at) VALUES (?, ?, ?)",
                params![draft.position, now, now],
            )
            .map_err(|e| map_unique(e, "player_positions", "position", "player position"))?;
        let id = PositionId::new(self.conn.last_insert_rowid());

        self.fetch_one(
            "SELECT id, position, created_at, updated_at FROM player_positions WHERE id = ?",
            [id],
            row_to_position,
        )?
        .ok_or(ManagerError::NotFound {
            resource: "player position",
            id: id.as_i64(),
        })
    }

    pub fn list_positions(&self) -> Result<Vec<PlayerPosition>> {
        self.collect_rows(
            "SELECT id, position, created_at, updated_at FROM player_positions ORDER BY id",
            [],
            row_to_position,
        )
    }

    pub fn create_contract_type(&mut self, draft: &NewContractType) -> Result<ContractType> {
        draft.validate(&self.settings)?;

        let now = now();
        self.conn
            .execute(
                "INSERT INTO contract_types (service, created_at, updated_at) VALUES (?, ?, ?)",
                params![draft.service, now, now],
            )
            .map_err(|e| map_unique(e, "contract_types", "service", "contract type"))?;
        let id = ContractTypeId::new(self.conn.last_insert_rowid());

        self.fetch_one(
            "SELECT id, service, created_at, updated_at FROM contract_types WHERE id = ?",
            [id],
            row_to_contract_type,
        )?
        .ok_or(ManagerError::NotFound {
            resource: "contract type",
            id: id.as_i64(),
        })
    }

    pub fn list_contract_types(&self) -> Result<Vec<ContractType>> {
        self.collect_rows(
            "SELECT id, service, created_at, updated_at FROM contract_types ORDER BY id",
            [],
            row_to_contract_type,
        )
    }

    pub fn create_attribute_category(
        &mut self,
        draft: &NewAttributeCategory,
    ) -> Result<AttributeCategory> {
        draft.validate(&self.settings)?;

        let now = now();
        self.conn
            .execute(
                "INSERT INTO attribute_categories (attribute, category, created_at, updated_at)
                 VALUES (?, ?, ?, ?)",
                params![draft.attribute, draft.category, now, now],
            )
            .map_err(|e| map_unique(e, "attribute_categories", "attribute", "attribute category"))?;
        let id = AttributeCategoryId::new(self.conn.last_insert_rowid());

        self.fetch_one(
            "SELECT id, attribute, category, created_at, updated_at
             FROM attribute_categories WHERE id = ?",
            [id],
            row_to_attribute_category,
        )?
        .ok_or(ManagerError::NotFound {
            resource: "attribute category",
            id: id.as_i64(),
        })
    }

    pub fn list_attribute_categories(&self) -> Result<Vec<AttributeCategory>> {
        self.collect_rows(
            "SELECT id, attribute, category, created_at, updated_at
             FROM attribute_categories ORDER BY id",
            [],
            row_to_attribute_category,
        )
    }

    /// Insert the default positions and contract types, skipping any that
    /// already exist. Safe to run repeatedly.
    pub fn seed_reference_data(&mut self) -> Result<SeedReport> {
        let now = now();
        let tx = self.conn.transaction()?;
        let mut report = SeedReport::default();

        for position in DEFAULT_POSITIONS {
            report.positions += tx.execute(
                "INSERT OR IGNORE INTO player_positions (position, created_at, updated_at)
                 VALUES (?, ?, ?)",
                params![position, now, now],
            )?;
        }
        for service in DEFAULT_CONTRACT_TYPES {
            report.contract_types += tx.execute(
                "INSERT OR IGNORE INTO contract_types (service, created_at, updated_at)
                 VALUES (?, ?, ?)",
                params![service, now, now],
            )?;
        }

        tx.commit()?;
        Ok(report)
    }
}
