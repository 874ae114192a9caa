//! Players and their rated attributes

use super::{
    models::*,
    schema::{amount, now, read_amount, read_timestamps, FantasyDatabase},
};
use crate::error::{ManagerError, Result};
use crate::types::{PlayerAttributeId, PlayerId, TeamId};
use crate::validation::{Validate, ValidationErrors};
use rusqlite::{params, Row};

const PLAYER_COLUMNS: &str = "id, first_name, last_name, date_of_birth, country_id, salary, \
     team_id, price, status, position_id, contract_type_id, join_date, created_at, updated_at";

const ATTRIBUTE_COLUMNS: &str = "id, player_id, category_id, value, created_at, updated_at";

fn row_to_player(row: &Row<'_>) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        date_of_birth: row.get(3)?,
        country: row.get(4)?,
        salary: read_amount(row, 5)?,
        team: row.get(6)?,
        price: read_amount(row, 7)?,
        status: row.get(8)?,
        position: row.get(9)?,
        contract_type: row.get(10)?,
        join_date: row.get(11)?,
        timestamps: read_timestamps(row, 12)?,
    })
}

fn row_to_attribute(row: &Row<'_>) -> rusqlite::Result<PlayerAttribute> {
    Ok(PlayerAttribute {
        id: row.get(0)?,
        player: row.get(1)?,
        category: row.get(2)?,
        value: row.get(3)?,
        timestamps: read_timestamps(row, 4)?,
    })
}

impl FantasyDatabase {
    /// Create a player. New players are not on any team.
    pub fn create_player(&mut self, draft: &NewPlayer) -> Result<Player> {
        draft.validate(&self.settings)?;

        let mut errors = ValidationErrors::default();
        if let Some(country) = draft.country {
            self.check_reference(&mut errors, "country", "countries", country.as_i64())?;
        }
        if let Some(position) = draft.position {
            self.check_reference(&mut errors, "position", "player_positions", position.as_i64())?;
        }
        self.check_reference(
            &mut errors,
            "contract_type",
            "contract_types",
            draft.contract_type.as_i64(),
        )?;
        errors.into_result()?;

        let now = now();
        self.conn.execute(
            "INSERT INTO players (first_name, last_name, date_of_birth, country_id, salary,
                                  price, status, position_id, contract_type_id, join_date,
                                  created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                draft.first_name,
                draft.last_name,
                draft.date_of_birth,
                draft.country,
                amount(draft.salary)?,
                amount(draft.price)?,
                draft.status,
                draft.position,
                draft.contract_type,
                draft.join_date,
                now,
                now
            ],
        )?;
        let id = PlayerId::new(self.conn.last_insert_rowid());

        self.get_player(id)?.ok_or(ManagerError::NotFound {
            resource: "player",
            id: id.as_i64(),
        })
    }

    pub fn get_player(&self, id: PlayerId) -> Result<Option<Player>> {
        self.fetch_one(
            &format!("SELECT {PLAYER_COLUMNS} FROM players WHERE id = ?"),
            [id],
            row_to_player,
        )
    }

    pub fn list_players(&self) -> Result<Vec<Player>> {
        self.collect_rows(
            &format!("SELECT {PLAYER_COLUMNS} FROM players ORDER BY id"),
            [],
            row_to_player,
        )
    }

    /// Apply a partial update of price, salary and status
    pub fn update_player(&mut self, id: PlayerId, update: &PlayerUpdate) -> Result<Player> {
        update.validate(&self.settings)?;

        let current = self.get_player(id)?.ok_or(ManagerError::NotFound {
            resource: "player",
            id: id.as_i64(),
        })?;

        let salary = update.salary.unwrap_or(current.salary);
        let price = update.price.unwrap_or(current.price);
        let status = update.status.or(current.status);

        self.conn.execute(
            "UPDATE players SET salary = ?, price = ?, status = ?, updated_at = ? WHERE id = ?",
            params![amount(salary)?, amount(price)?, status, now(), id],
        )?;

        self.get_player(id)?.ok_or(ManagerError::NotFound {
            resource: "player",
            id: id.as_i64(),
        })
    }

    /// Move a player to a team, or release them with `None`
    pub fn assign_player_team(&mut self, id: PlayerId, team: Option<TeamId>) -> Result<Player> {
        if let Some(team) = team {
            let mut errors = ValidationErrors::default();
            self.check_reference(&mut errors, "team", "teams", team.as_i64())?;
            errors.into_result()?;
        }

        let rows = self.conn.execute(
            "UPDATE players SET team_id = ?, updated_at = ? WHERE id = ?",
            params![team, now(), id],
        )?;
        if rows == 0 {
            return Err(ManagerError::NotFound {
                resource: "player",
                id: id.as_i64(),
            });
        }

        self.get_player(id)?.ok_or(ManagerError::NotFound {
            resource: "player",
            id: id.as_i64(),
        })
    }

    pub fn delete_player(&mut self, id: PlayerId) -> Result<bool> {
        let rows = self.conn.execute("DELETE FROM players WHERE id = ?", [id])?;
        Ok(rows > 0)
    }

    pub fn add_player_attribute(
        &mut self,
        player: PlayerId,
        draft: &NewPlayerAttribute,
    ) -> Result<PlayerAttribute> {
        draft.validate(&self.settings)?;

        if !self.exists("players", player.as_i64())? {
            return Err(ManagerError::NotFound {
                resource: "player",
                id: player.as_i64(),
            });
        }
        let mut errors = ValidationErrors::default();
        self.check_reference(
            &mut errors,
            "category",
            "attribute_categories",
            draft.category.as_i64(),
        )?;
        errors.into_result()?;

        let now = now();
        self.conn.execute(
            "INSERT INTO player_attributes (player_id, category_id, value, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            params![player, draft.category, draft.value, now, now],
        )?;
        let id = PlayerAttributeId::new(self.conn.last_insert_rowid());

        self.fetch_one(
            &format!("SELECT {ATTRIBUTE_COLUMNS} FROM player_attributes WHERE id = ?"),
            [id],
            row_to_attribute,
        )?
        .ok_or(ManagerError::NotFound {
            resource: "player attribute",
            id: id.as_i64(),
        })
    }

    pub fn player_attributes(&self, player: PlayerId) -> Result<Vec<PlayerAttribute>> {
        self.collect_rows(
            &format!(
                "SELECT {ATTRIBUTE_COLUMNS} FROM player_attributes WHERE player_id = ? ORDER BY id"
            ),
            [player],
            row_to_attribute,
        )
    }
}
