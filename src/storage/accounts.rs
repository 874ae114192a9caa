//! Users, manager profiles and auth keys

use super::{
    models::*,
    schema::{map_unique, now, read_timestamps, FantasyDatabase},
};
use crate::auth::password::{generate_key, hash_password, verify_password};
use crate::error::{ManagerError, Result};
use crate::types::{ManagerId, UserId};
use crate::validation::{normalize_email, Validate, ValidationErrors};
use rusqlite::{params, Row};

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, is_staff, is_superuser, is_active, date_joined, last_login";

const MANAGER_COLUMNS: &str =
    "id, user_id, first_name, last_name, date_of_birth, country_id, created_at, updated_at";

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        is_staff: row.get(4)?,
        is_superuser: row.get(5)?,
        is_active: row.get(6)?,
        date_joined: row.get(7)?,
        last_login: row.get(8)?,
    })
}

fn row_to_manager(row: &Row<'_>) -> rusqlite::Result<Manager> {
    Ok(Manager {
        id: row.get(0)?,
        user: row.get(1)?,
        first_name: row.get(2)?,
        last_name: row.get(3)?,
        date_of_birth: row.get(4)?,
        country: row.get(5)?,
        timestamps: read_timestamps(row, 6)?,
    })
}

impl FantasyDatabase {
    /// Create a regular user together with its manager profile.
    ///
    /// The email is stored with a lower-cased domain and the password as an
    /// Argon2 hash. The manager copies the user's first and last name.
    pub fn create_user(&mut self, new_user: &NewUser) -> Result<User> {
        new_user.validate(&self.settings)?;
        let password_hash = hash_password(&new_user.password)?;
        self.insert_user_row(new_user, &password_hash)
    }

    /// Like [`create_user`](Self::create_user) with a password already
    /// hashed by the caller. `new_user.password` is only checked for blank.
    pub fn insert_user(&mut self, new_user: &NewUser, password_hash: &str) -> Result<User> {
        new_user.validate(&self.settings)?;
        self.insert_user_row(new_user, password_hash)
    }

    fn insert_user_row(&mut self, new_user: &NewUser, password_hash: &str) -> Result<User> {
        let email = normalize_email(&new_user.email);
        let now = now();

        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO users (email, password_hash, first_name, last_name,
                                is_staff, is_superuser, is_active, date_joined)
             VALUES (?, ?, ?, ?, ?, ?, 1, ?)",
            params![
                email,
                password_hash,
                new_user.first_name,
                new_user.last_name,
                new_user.is_staff,
                new_user.is_superuser,
                now
            ],
        )
        .map_err(|e| map_unique(e, "users", "email", "user"))?;
        let user_id = UserId::new(tx.last_insert_rowid());

        tx.execute(
            "INSERT INTO managers (user_id, first_name, last_name, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            params![user_id, new_user.first_name, new_user.last_name, now, now],
        )?;
        tx.commit()?;

        tracing::info!(user_id = %user_id, "created user and manager profile");

        self.get_user(user_id)?.ok_or(ManagerError::NotFound {
            resource: "user",
            id: user_id.as_i64(),
        })
    }

    /// Create a user with staff and superuser rights.
    ///
    /// Both flags must be set on the draft; this guards against callers
    /// building a superuser draft and then clearing one of them.
    pub fn create_superuser(&mut self, new_user: &NewUser) -> Result<User> {
        if !new_user.is_staff {
            return Err(ManagerError::InvalidSuperuser { flag: "is_staff" });
        }
        if !new_user.is_superuser {
            return Err(ManagerError::InvalidSuperuser {
                flag: "is_superuser",
            });
        }
        self.create_user(new_user)
    }

    pub fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.fetch_one(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"),
            [id],
            row_to_user,
        )
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.fetch_one(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"),
            [normalize_email(email)],
            row_to_user,
        )
    }

    pub fn count_users(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Stored password hash of an active user
    pub fn password_hash(&self, email: &str) -> Result<Option<(UserId, String)>> {
        self.fetch_one(
            "SELECT id, password_hash FROM users WHERE email = ? AND is_active = 1",
            [normalize_email(email)],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
    }

    /// Check an email/password pair. Inactive users never authenticate.
    pub fn check_credentials(&self, email: &str, password: &str) -> Result<Option<User>> {
        match self.password_hash(email)? {
            Some((id, hash)) if verify_password(password, &hash) => self.get_user(id),
            _ => Ok(None),
        }
    }

    /// Check credentials and stamp `last_login` on success
    pub fn authenticate(&mut self, email: &str, password: &str) -> Result<Option<User>> {
        match self.check_credentials(email, password)? {
            Some(user) => {
                self.record_login(user.id)?;
                self.get_user(user.id)
            }
            None => {
                tracing::debug!("rejected login attempt");
                Ok(None)
            }
        }
    }

    /// Stamp `last_login`
    pub fn record_login(&mut self, user: UserId) -> Result<()> {
        self.conn.execute(
            "UPDATE users SET last_login = ? WHERE id = ?",
            params![now(), user],
        )?;
        Ok(())
    }

    /// Delete a user; managers, teams and auth keys cascade.
    pub fn delete_user(&mut self, user: UserId) -> Result<bool> {
        let rows = self.conn.execute("DELETE FROM users WHERE id = ?", [user])?;
        Ok(rows > 0)
    }

    /// Issue an auth key. API tokens are one per user and reused; every
    /// session login gets a fresh key.
    pub fn issue_token(&mut self, user: UserId, kind: TokenKind) -> Result<String> {
        if kind == TokenKind::Token {
            let existing: Option<String> = self.fetch_one(
                "SELECT key FROM auth_tokens WHERE user_id = ? AND kind = 'token'",
                [user],
                |row| row.get(0),
            )?;
            if let Some(key) = existing {
                return Ok(key);
            }
        }

        let key = generate_key();
        self.conn.execute(
            "INSERT INTO auth_tokens (key, user_id, kind, created_at) VALUES (?, ?, ?, ?)",
            params![key, user, kind.as_str(), now()],
        )?;
        Ok(key)
    }

    /// Resolve an auth key of the given kind to its active user
    pub fn user_for_token(&self, key: &str, kind: TokenKind) -> Result<Option<User>> {
        let columns = USER_COLUMNS
            .split(", ")
            .map(|c| format!("u.{c}"))
            .collect::<Vec<_>>()
            .join(", ");
        self.fetch_one(
            &format!(
                "SELECT {columns} FROM auth_tokens t
                 JOIN users u ON u.id = t.user_id
                 WHERE t.key = ? AND t.kind = ? AND u.is_active = 1"
            ),
            params![key, kind.as_str()],
            row_to_user,
        )
    }

    pub fn revoke_token(&mut self, key: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM auth_tokens WHERE key = ?", [key])?;
        Ok(rows > 0)
    }

    /// Add another manager profile to a user
    pub fn create_manager(&mut self, user: UserId, draft: &NewManager) -> Result<Manager> {
        draft.validate(&self.settings)?;

        let mut errors = ValidationErrors::default();
        self.check_reference(&mut errors, "user", "users", user.as_i64())?;
        if let Some(country) = draft.country {
            self.check_reference(&mut errors, "country", "countries", country.as_i64())?;
        }
        errors.into_result()?;

        let now = now();
        self.conn.execute(
            "INSERT INTO managers (user_id, first_name, last_name, date_of_birth, country_id,
                                   created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                user,
                draft.first_name,
                draft.last_name,
                draft.date_of_birth,
                draft.country,
                now,
                now
            ],
        )?;
        let id = ManagerId::new(self.conn.last_insert_rowid());

        self.get_manager(id)?.ok_or(ManagerError::NotFound {
            resource: "manager",
            id: id.as_i64(),
        })
    }

    pub fn get_manager(&self, id: ManagerId) -> Result<Option<Manager>> {
        self.fetch_one(
            &format!("SELECT {MANAGER_COLUMNS} FROM managers WHERE id = ?"),
            [id],
            row_to_manager,
        )
    }

    /// Managers belonging to one user, oldest first
    pub fn managers_for_user(&self, user: UserId) -> Result<Vec<Manager>> {
        self.collect_rows(
            &format!("SELECT {MANAGER_COLUMNS} FROM managers WHERE user_id = ? ORDER BY id"),
            [user],
            row_to_manager,
        )
    }
}
