//! Request authentication
//!
//! Credentials are read from, in order:
//! - `Authorization: Basic base64(email:password)`
//! - `Authorization: Token <key>`
//! - a `sessionid` cookie issued by the login endpoint
//!
//! Handlers ask for a [`CurrentUser`] or [`AdminUser`] argument to require
//! authentication or staff rights.

pub mod password;
pub mod token;

#[cfg(test)]
mod tests;

pub use token::TokenCache;

use password::verify_password_blocking;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap,
    },
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::api::AppState;
use crate::error::{ManagerError, Result};
use crate::storage::{TokenKind, User};

/// Name of the cookie carrying a session key
pub const SESSION_COOKIE: &str = "sessionid";

const INVALID_CREDENTIALS: &str = "Invalid email/password.";
const INVALID_TOKEN: &str = "Invalid token.";

/// Credentials found on a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { email: String, password: String },
    Token(String),
    Session(String),
}

/// Pick the first credentials present on the request.
///
/// A malformed `Basic` header is an authentication failure; unknown
/// `Authorization` schemes are ignored.
pub fn credentials_from_headers(headers: &HeaderMap) -> Result<Option<Credentials>> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        let value = value
            .to_str()
            .map_err(|_| ManagerError::AuthenticationFailed {
                message: INVALID_CREDENTIALS,
            })?;
        let (scheme, rest) = value.trim().split_once(' ').unwrap_or((value, ""));

        if scheme.eq_ignore_ascii_case("basic") {
            return parse_basic(rest.trim()).map(Some);
        }
        if scheme.eq_ignore_ascii_case("token") {
            let key = rest.trim();
            if key.is_empty() || key.contains(' ') {
                return Err(ManagerError::AuthenticationFailed {
                    message: INVALID_TOKEN,
                });
            }
            return Ok(Some(Credentials::Token(key.to_string())));
        }
    }

    Ok(session_cookie(headers).map(Credentials::Session))
}

fn parse_basic(encoded: &str) -> Result<Credentials> {
    let invalid = || ManagerError::AuthenticationFailed {
        message: INVALID_CREDENTIALS,
    };
    let decoded = STANDARD.decode(encoded).map_err(|_| invalid())?;
    let decoded = String::from_utf8(decoded).map_err(|_| invalid())?;
    let (email, password) = decoded.split_once(':').ok_or_else(invalid)?;
    Ok(Credentials::Basic {
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// The `sessionid` value from any `Cookie` header
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, key)| key.to_string())
        .filter(|key| !key.is_empty())
}

/// Resolve an auth key through the cache, falling back to the token table.
///
/// A cache hit skips the token join but still reads the user row, so
/// deactivated or deleted users stop resolving at once.
pub fn resolve_key(state: &AppState, key: &str, kind: TokenKind) -> Result<Option<User>> {
    let tokens = state.tokens();
    state.with_db(|db| {
        if let Some(user_id) = tokens.get(key, kind) {
            if let Some(user) = db.get_user(user_id)?.filter(|u| u.is_active) {
                return Ok(Some(user));
            }
            tokens.evict(key);
        }

        let user = db.user_for_token(key, kind)?;
        if let Some(user) = &user {
            tokens.insert(key.to_string(), kind, user.id);
        }
        Ok(user)
    })
}

/// Check an email/password pair.
///
/// Only the hash lookup and the final user read take the database lock;
/// Argon2 runs on the blocking pool in between.
pub async fn verify_credentials(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<Option<User>> {
    let Some((user_id, hash)) = state.with_db(|db| db.password_hash(email))? else {
        return Ok(None);
    };
    if !verify_password_blocking(password.to_string(), hash).await? {
        return Ok(None);
    }
    Ok(state
        .with_db(|db| db.get_user(user_id))?
        .filter(|user| user.is_active))
}

/// Authenticate a request. `Ok(None)` means no credentials were sent or the
/// session cookie is stale.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<Option<User>> {
    match credentials_from_headers(headers)? {
        None => Ok(None),
        Some(Credentials::Basic { email, password }) => {
            match verify_credentials(state, &email, &password).await? {
                Some(user) => Ok(Some(user)),
                None => {
                    tracing::debug!("basic authentication rejected");
                    Err(ManagerError::AuthenticationFailed {
                        message: INVALID_CREDENTIALS,
                    })
                }
            }
        }
        Some(Credentials::Token(key)) => match resolve_key(state, &key, TokenKind::Token)? {
            Some(user) => Ok(Some(user)),
            None => {
                tracing::debug!("token authentication rejected");
                Err(ManagerError::AuthenticationFailed {
                    message: INVALID_TOKEN,
                })
            }
        },
        Some(Credentials::Session(key)) => resolve_key(state, &key, TokenKind::Session),
    }
}

/// Any authenticated user
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ManagerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        authenticate(state, &parts.headers)
            .await?
            .map(CurrentUser)
            .ok_or(ManagerError::NotAuthenticated)
    }
}

/// An authenticated staff user
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ManagerError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> std::result::Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        if user.is_staff {
            Ok(AdminUser(user))
        } else {
            tracing::debug!(user_id = %user.id, "staff permission denied");
            Err(ManagerError::PermissionDenied)
        }
    }
}
