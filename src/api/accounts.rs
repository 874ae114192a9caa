//! Registration, login/logout, API tokens and the caller's managers

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{
    common::{created, Body},
    AppState,
};
use crate::auth::{
    password::hash_password_blocking, session_cookie, verify_credentials, CurrentUser,
    SESSION_COOKIE,
};
use crate::config::Settings;
use crate::error::{ManagerError, Result};
use crate::storage::{Manager, NewUser, TokenKind, User};
use crate::types::UserId;
use crate::validation::{Draft, Validate, ValidationErrors, REQUIRED};

#[derive(Debug, Serialize)]
pub struct Registered {
    pub id: UserId,
    pub email: String,
}

/// The password is hashed before the database is locked.
pub async fn register(
    State(state): State<AppState>,
    Body(new_user): Body<NewUser>,
) -> Result<(StatusCode, Json<Registered>)> {
    new_user.validate(state.settings())?;
    let password_hash = hash_password_blocking(new_user.password.clone()).await?;
    let user = state.with_db(|db| db.insert_user(&new_user, &password_hash))?;
    Ok(created(Registered {
        id: user.id,
        email: user.email,
    }))
}

/// Email/password pair. `username` is accepted as an alias for `email`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default, alias = "username")]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self, _settings: &Settings) -> Result<()> {
        let mut errors = ValidationErrors::default();
        if self.email.trim().is_empty() {
            errors.add("email", REQUIRED);
        }
        if self.password.is_empty() {
            errors.add("password", REQUIRED);
        }
        errors.into_result()
    }
}

impl Draft for LoginRequest {}

fn login_rejected() -> ManagerError {
    ManagerError::field(
        "non_field_errors",
        "Unable to log in with provided credentials.",
    )
}

fn session_header(key: &str, max_age: Option<u32>) -> Result<HeaderValue> {
    let mut cookie = format!("{SESSION_COOKIE}={key}; HttpOnly; Path=/; SameSite=Lax");
    if let Some(max_age) = max_age {
        cookie.push_str(&format!("; Max-Age={max_age}"));
    }
    HeaderValue::from_str(&cookie).map_err(|e| ManagerError::Internal {
        message: e.to_string(),
    })
}

/// Start a browser session and set the `sessionid` cookie
pub async fn login(
    State(state): State<AppState>,
    Body(request): Body<LoginRequest>,
) -> Result<Response> {
    request.validate(state.settings())?;
    let user = verify_credentials(&state, &request.email, &request.password)
        .await?
        .ok_or_else(|| {
            tracing::debug!("rejected login attempt");
            login_rejected()
        })?;

    let (user, key): (User, String) = state.with_db(|db| {
        db.record_login(user.id)?;
        let user = db.get_user(user.id)?.ok_or_else(login_rejected)?;
        let key = db.issue_token(user.id, TokenKind::Session)?;
        Ok((user, key))
    })?;
    tracing::info!(user_id = %user.id, "session login");

    let mut response = Json(user).into_response();
    response
        .headers_mut()
        .insert(SET_COOKIE, session_header(&key, None)?);
    Ok(response)
}

/// End the caller's session, if the request carries one
pub async fn logout(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    headers: HeaderMap,
) -> Result<Response> {
    if let Some(key) = session_cookie(&headers) {
        state.with_db(|db| db.revoke_token(&key))?;
        state.tokens().evict(&key);
    }
    tracing::info!(user_id = %user.id, "logged out");

    let mut response = Json(json!({ "detail": "Logged out." })).into_response();
    response
        .headers_mut()
        .insert(SET_COOKIE, session_header("", Some(0))?);
    Ok(response)
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Exchange an email/password pair for the user's API token
pub async fn obtain_token(
    State(state): State<AppState>,
    Body(request): Body<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    request.validate(state.settings())?;
    let user = verify_credentials(&state, &request.email, &request.password)
        .await?
        .ok_or_else(login_rejected)?;

    let token = state.with_db(|db| db.issue_token(user.id, TokenKind::Token))?;
    Ok(Json(TokenResponse { token }))
}

/// Managers belonging to the caller
pub async fn list_managers(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Manager>>> {
    let managers = state.with_db(|db| db.managers_for_user(user.id))?;
    Ok(Json(managers))
}
