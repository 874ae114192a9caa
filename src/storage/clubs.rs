//! Leagues and teams

use super::{
    models::*,
    schema::{amount, now, read_amount, read_timestamps, FantasyDatabase},
};
use crate::error::{ManagerError, Result};
use crate::types::{LeagueId, TeamId, UserId};
use crate::validation::{Validate, ValidationErrors};
use rusqlite::{params, Row};

const LEAGUE_COLUMNS: &str = "id, name, country_id, division, created_at, updated_at";

const TEAM_COLUMNS: &str = "t.id, t.name, t.owner_id, t.manager_id, t.budget, t.league_id, \
     t.value, t.earning, t.has_manager, t.starting_manager_salary, t.existing, \
     (SELECT COUNT(*) FROM players p WHERE p.team_id = t.id), t.created_at, t.updated_at";

fn row_to_league(row: &Row<'_>) -> rusqlite::Result<League> {
    Ok(League {
        id: row.get(0)?,
        name: row.get(1)?,
        country: row.get(2)?,
        division: row.get(3)?,
        timestamps: read_timestamps(row, 4)?,
    })
}

fn row_to_team(row: &Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        name: row.get(1)?,
        owner: row.get(2)?,
        manager: row.get(3)?,
        budget: read_amount(row, 4)?,
        league: row.get(5)?,
        value: read_amount(row, 6)?,
        earning: read_amount(row, 7)?,
        has_manager: row.get(8)?,
        starting_manager_salary: read_amount(row, 9)?,
        existing: row.get(10)?,
        num_players: read_amount(row, 11)?,
        timestamps: read_timestamps(row, 12)?,
    })
}

impl FantasyDatabase {
    pub fn create_league(&mut self, draft: &NewLeague) -> Result<League> {
        draft.validate(&self.settings)?;

        let mut errors = ValidationErrors::default();
        self.check_reference(&mut errors, "country", "countries", draft.country.as_i64())?;
        errors.into_result()?;

        let now = now();
        self.conn.execute(
            "INSERT INTO leagues (name, country_id, division, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            params![draft.name, draft.country, draft.division, now, now],
        )?;
        let id = LeagueId::new(self.conn.last_insert_rowid());

        self.get_league(id)?.ok_or(ManagerError::NotFound {
            resource: "league",
            id: id.as_i64(),
        })
    }

    pub fn get_league(&self, id: LeagueId) -> Result<Option<League>> {
        self.fetch_one(
            &format!("SELECT {LEAGUE_COLUMNS} FROM leagues WHERE id = ?"),
            [id],
            row_to_league,
        )
    }

    pub fn list_leagues(&self) -> Result<Vec<League>> {
        self.collect_rows(
            &format!("SELECT {LEAGUE_COLUMNS} FROM leagues ORDER BY id"),
            [],
            row_to_league,
        )
    }

    /// Create a team owned by `owner`.
    ///
    /// Budget and value start from the configured defaults and earning at
    /// zero, whatever the client sent.
    pub fn create_team(&mut self, owner: UserId, draft: &NewTeam) -> Result<Team> {
        draft.validate(&self.settings)?;

        let mut errors = ValidationErrors::default();
        self.check_reference(&mut errors, "league", "leagues", draft.league.as_i64())?;
        if let Some(manager) = draft.manager {
            self.check_reference(&mut errors, "manager", "managers", manager.as_i64())?;
        }
        errors.into_result()?;

        let now = now();
        self.conn.execute(
            "INSERT INTO teams (name, owner_id, manager_id, budget, league_id, value, earning,
                                has_manager, starting_manager_salary, existing,
                                created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?, ?)",
            params![
                draft.name,
                owner,
                draft.manager,
                amount(self.settings.default_budget)?,
                draft.league,
                amount(self.settings.default_value)?,
                draft.has_manager,
                amount(draft.starting_manager_salary)?,
                draft.existing,
                now,
                now
            ],
        )?;
        let id = TeamId::new(self.conn.last_insert_rowid());
        tracing::info!(team_id = %id, owner = %owner, "created team");

        self.get_team(id)?.ok_or(ManagerError::NotFound {
            resource: "team",
            id: id.as_i64(),
        })
    }

    /// Fetch a team along with its current player count
    pub fn get_team(&self, id: TeamId) -> Result<Option<Team>> {
        self.fetch_one(
            &format!("SELECT {TEAM_COLUMNS} FROM teams t WHERE t.id = ?"),
            [id],
            row_to_team,
        )
    }

    pub fn list_teams(&self) -> Result<Vec<Team>> {
        self.collect_rows(
            &format!("SELECT {TEAM_COLUMNS} FROM teams t ORDER BY t.id"),
            [],
            row_to_team,
        )
    }

    /// Delete a team. Its players become free agents; offers and
    /// negotiations involving it are removed.
    pub fn delete_team(&mut self, id: TeamId) -> Result<bool> {
        let rows = self.conn.execute("DELETE FROM teams WHERE id = ?", [id])?;
        Ok(rows > 0)
    }
}
