//! Error types for the Football Manager API

use axum::{
    extract::rejection::JsonRejection,
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::ValidationErrors;

pub type Result<T> = std::result::Result<T, ManagerError>;

/// Realm advertised on 401 responses.
pub const AUTH_REALM: &str = "Basic realm=\"api\"";

#[derive(Error, Debug)]
pub enum ManagerError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Settings(#[from] toml::de::Error),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Malformed request body: {message}")]
    MalformedBody { message: String },

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },

    #[error("Authentication credentials were not provided.")]
    NotAuthenticated,

    #[error("{message}")]
    AuthenticationFailed { message: &'static str },

    #[error("You do not have permission to perform this action.")]
    PermissionDenied,

    #[error("Invalid {kind}: {value}")]
    InvalidStatus { kind: &'static str, value: String },

    #[error("Superuser must have {flag}=true.")]
    InvalidSuperuser { flag: &'static str },

    #[error("Password hashing failed: {message}")]
    PasswordHash { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ManagerError {
    /// Shorthand for a single-field validation failure.
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::default();
        errors.add(field, message);
        ManagerError::Validation(errors)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ManagerError::Validation(_)
            | ManagerError::MalformedBody { .. }
            | ManagerError::InvalidStatus { .. }
            | ManagerError::InvalidSuperuser { .. } => StatusCode::BAD_REQUEST,
            ManagerError::Database(err) if is_constraint_violation(err) => StatusCode::BAD_REQUEST,
            ManagerError::NotFound { .. } | ManagerError::InvalidPath { .. } => {
                StatusCode::NOT_FOUND
            }
            ManagerError::NotAuthenticated | ManagerError::AuthenticationFailed { .. } => {
                StatusCode::UNAUTHORIZED
            }
            ManagerError::PermissionDenied => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// True for SQLite constraint failures (unique, foreign key, check, not null).
pub fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

impl From<anyhow::Error> for ManagerError {
    fn from(err: anyhow::Error) -> Self {
        ManagerError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ManagerError {
    fn from(rejection: JsonRejection) -> Self {
        ManagerError::MalformedBody {
            message: rejection.body_text(),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for ManagerError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        ManagerError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for ManagerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ManagerError::Internal {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ManagerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ManagerError::Validation(errors) => json!(errors),
            ManagerError::NotFound { .. } | ManagerError::InvalidPath { .. } => {
                json!({ "detail": "Not found." })
            }
            ManagerError::Database(err) if is_constraint_violation(err) => {
                json!({ "detail": err.to_string() })
            }
            _ if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error = %self, "request failed");
                json!({ "detail": "A server error occurred." })
            }
            _ => json!({ "detail": self.to_string() }),
        };

        let mut response = (status, Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(AUTH_REALM));
        }
        response
    }
}

#[cfg(test)]
mod tests;
