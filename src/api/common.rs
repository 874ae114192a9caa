//! Extractors and helpers shared by the route handlers

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use super::AppState;
use crate::error::{ManagerError, Result};
use crate::validation::Draft;

/// A JSON object body deserialized into a [`Draft`].
///
/// Syntax errors are a `400 {"detail": ...}`; missing required keys are a
/// `400` field map alongside the payload's other field errors.
pub struct Body<T>(pub T);

#[async_trait]
impl<T> FromRequest<AppState> for Body<T>
where
    T: Draft + Send,
{
    type Rejection = ManagerError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self> {
        let Json(value) = Json::<Value>::from_request(req, state).await?;
        let Value::Object(fields) = value else {
            return Err(ManagerError::field(
                "non_field_errors",
                "Invalid data. Expected a dictionary.",
            ));
        };
        T::from_fields(fields, state.settings()).map(Body)
    }
}

/// A record id taken from the URL. Ids that do not parse are `404`, the same
/// as ids with no record behind them.
pub struct Id<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Id<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ManagerError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Id(id)),
            Err(rejection) => Err(ManagerError::InvalidPath {
                message: rejection.body_text(),
            }),
        }
    }
}

pub fn created<T: Serialize>(value: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(value))
}

/// `404` when a lookup came back empty
pub fn found<T>(value: Option<T>, resource: &'static str, id: i64) -> Result<Json<T>> {
    value
        .map(Json)
        .ok_or(ManagerError::NotFound { resource, id })
}
