//! Database schema and connection management

use crate::config::Settings;
use crate::error::{is_constraint_violation, ManagerError, Result};
use crate::types::status::sql_choices;
use crate::types::{OfferStatus, OfferType, PlayerStatus, TransferStatus};
use crate::validation::{already_exists, invalid_pk, ValidationErrors};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Params, Row};
use std::path::Path;

use super::models::Timestamps;

/// Connection manager for the fantasy football database
///
/// Carries the [`Settings`] whose column limits and defaults every write
/// is checked against.
pub struct FantasyDatabase {
    pub(crate) conn: Connection,
    pub(crate) settings: Settings,
}

impl FantasyDatabase {
    /// Open (or create) the database file and ensure tables exist
    pub fn open(path: &Path, settings: Settings) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        Self::with_connection(conn, settings)
    }

    /// Create an in-memory database with default settings, mainly for tests
    pub fn new_in_memory() -> Result<Self> {
        Self::new_in_memory_with(Settings::default())
    }

    pub fn new_in_memory_with(settings: Settings) -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, settings)
    }

    fn with_connection(conn: Connection, settings: Settings) -> Result<Self> {
        settings.check()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let mut db = Self { conn, settings };
        db.initialize_schema()?;
        Ok(db)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        let player_status = sql_choices(PlayerStatus::ALL);
        let transfer_status = sql_choices(TransferStatus::ALL);
        let offer_status = sql_choices(OfferStatus::ALL);
        let offer_type = sql_choices(OfferType::ALL);

        self.conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                first_name TEXT,
                last_name TEXT,
                is_staff INTEGER NOT NULL DEFAULT 0,
                is_superuser INTEGER NOT NULL DEFAULT 0,
                is_active INTEGER NOT NULL DEFAULT 1,
                date_joined TEXT NOT NULL,
                last_login TEXT
            );

            CREATE TABLE IF NOT EXISTS auth_tokens (
                key TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                kind TEXT NOT NULL CHECK (kind IN ('token', 'session')),
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS countries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS managers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                first_name TEXT,
                last_name TEXT,
                date_of_birth TEXT,
                country_id INTEGER REFERENCES countries(id) ON DELETE SET NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS player_positions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                position TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS contract_types (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                service TEXT NOT NULL UNIQUE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS attribute_categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                attribute TEXT NOT NULL UNIQUE,
                category TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS leagues (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                country_id INTEGER NOT NULL REFERENCES countries(id) ON DELETE CASCADE,
                division INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS teams (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                manager_id INTEGER REFERENCES managers(id) ON DELETE SET NULL,
                budget INTEGER NOT NULL CHECK (budget >= 0),
                league_id INTEGER NOT NULL REFERENCES leagues(id) ON DELETE CASCADE,
                value INTEGER NOT NULL CHECK (value >= 0),
                earning INTEGER NOT NULL DEFAULT 0 CHECK (earning >= 0),
                has_manager INTEGER NOT NULL DEFAULT 0,
                starting_manager_salary INTEGER NOT NULL CHECK (starting_manager_salary >= 0),
                existing INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                first_name TEXT,
                last_name TEXT,
                date_of_birth TEXT NOT NULL,
                country_id INTEGER REFERENCES countries(id) ON DELETE SET NULL,
                salary INTEGER NOT NULL CHECK (salary >= 0),
                team_id INTEGER REFERENCES teams(id) ON DELETE SET NULL,
                price INTEGER NOT NULL CHECK (price >= 0),
                status TEXT CHECK (status IN ({player_status})),
                position_id INTEGER REFERENCES player_positions(id) ON DELETE SET NULL,
                contract_type_id INTEGER NOT NULL REFERENCES contract_types(id) ON DELETE CASCADE,
                join_date TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS player_attributes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                player_id INTEGER NOT NULL REFERENCES players(id) ON DELETE CASCADE,
                category_id INTEGER REFERENCES attribute_categories(id) ON DELETE SET NULL,
                value INTEGER NOT NULL CHECK (value BETWEEN 0 AND 32767),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS transfers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                asking_price INTEGER NOT NULL CHECK (asking_price >= 0),
                offered_price INTEGER NOT NULL CHECK (offered_price >= 0),
                player_id INTEGER NOT NULL REFERENCES players(id) ON DELETE CASCADE,
                buyer_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
                seller_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
                status TEXT NOT NULL CHECK (status IN ({transfer_status})),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS counter_offers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                asking_price INTEGER NOT NULL CHECK (asking_price >= 0),
                offered_price INTEGER NOT NULL CHECK (offered_price >= 0),
                player_id INTEGER NOT NULL REFERENCES players(id) ON DELETE CASCADE,
                buyer_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
                seller_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
                status TEXT NOT NULL CHECK (status IN ({offer_status})),
                offer_type TEXT NOT NULL CHECK (offer_type IN ({offer_type})),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS negotiations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                asking_salary INTEGER NOT NULL CHECK (asking_salary >= 0),
                offer_salary INTEGER NOT NULL CHECK (offer_salary >= 0),
                team_id INTEGER NOT NULL REFERENCES teams(id) ON DELETE CASCADE,
                player_id INTEGER REFERENCES players(id) ON DELETE CASCADE,
                manager_id INTEGER REFERENCES managers(id) ON DELETE CASCADE,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                CHECK ((player_id IS NULL) <> (manager_id IS NULL))
            );

            CREATE INDEX IF NOT EXISTS idx_managers_user ON managers(user_id);
            CREATE INDEX IF NOT EXISTS idx_teams_owner ON teams(owner_id);
            CREATE INDEX IF NOT EXISTS idx_players_team ON players(team_id);
            CREATE INDEX IF NOT EXISTS idx_auth_tokens_user ON auth_tokens(user_id);"
        ))?;

        Ok(())
    }

    /// Run a query and collect every mapped row
    pub(crate) fn collect_rows<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, f)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Run a query expected to return at most one row
    pub(crate) fn fetch_one<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        Ok(self.conn.query_row(sql, params, f).optional()?)
    }

    /// Whether a row with this id exists in `table`
    pub(crate) fn exists(&self, table: &str, id: i64) -> Result<bool> {
        let found = self
            .conn
            .query_row(
                &format!("SELECT 1 FROM {table} WHERE id = ?"),
                [id],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Record a field error when a referenced row is missing
    pub(crate) fn check_reference(
        &self,
        errors: &mut ValidationErrors,
        field: &str,
        table: &str,
        id: i64,
    ) -> Result<()> {
        if !self.exists(table, id)? {
            errors.add(field, invalid_pk(id));
        }
        Ok(())
    }
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Convert an amount for storage; validation keeps it within `i64`.
pub(crate) fn amount(value: u64) -> rusqlite::Result<i64> {
    i64::try_from(value).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Read a non-negative integer column.
pub(crate) fn read_amount(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let value: i64 = row.get(idx)?;
    u64::try_from(value).map_err(|_| rusqlite::Error::IntegralValueOutOfRange(idx, value))
}

/// Read `created_at`, `updated_at` starting at `idx`.
pub(crate) fn read_timestamps(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamps> {
    Ok(Timestamps {
        created_at: row.get(idx)?,
        updated_at: row.get(idx + 1)?,
    })
}

/// Turn a unique-constraint failure on `table.column` into a field error.
pub(crate) fn map_unique(
    err: rusqlite::Error,
    table: &str,
    column: &str,
    entity: &str,
) -> ManagerError {
    if is_constraint_violation(&err) {
        if let rusqlite::Error::SqliteFailure(_, Some(message)) = &err {
            if message.contains(&format!("UNIQUE constraint failed: {table}.{column}")) {
                return ManagerError::field(column, already_exists(entity, column));
            }
        }
    }
    ManagerError::Database(err)
}
