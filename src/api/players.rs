//! Players and their attributes. Reads need a login, writes need staff.

use axum::{extract::State, http::StatusCode, Json};

use super::{
    common::{created, found, Body, Id},
    AppState,
};
use crate::auth::{AdminUser, CurrentUser};
use crate::error::{ManagerError, Result};
use crate::storage::{NewPlayer, NewPlayerAttribute, Player, PlayerAttribute, PlayerUpdate};
use crate::types::PlayerId;

pub async fn list_players(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Player>>> {
    Ok(Json(state.with_db(|db| db.list_players())?))
}

pub async fn get_player(
    State(state): State<AppState>,
    _user: CurrentUser,
    Id(id): Id<PlayerId>,
) -> Result<Json<Player>> {
    found(state.with_db(|db| db.get_player(id))?, "player", id.as_i64())
}

pub async fn create_player(
    State(state): State<AppState>,
    _admin: AdminUser,
    Body(draft): Body<NewPlayer>,
) -> Result<(StatusCode, Json<Player>)> {
    Ok(created(state.with_db(|db| db.create_player(&draft))?))
}

/// Partial update of price, salary and status
pub async fn update_player(
    State(state): State<AppState>,
    _admin: AdminUser,
    Id(id): Id<PlayerId>,
    Body(update): Body<PlayerUpdate>,
) -> Result<Json<Player>> {
    Ok(Json(state.with_db(|db| db.update_player(id, &update))?))
}

pub async fn list_attributes(
    State(state): State<AppState>,
    _user: CurrentUser,
    Id(id): Id<PlayerId>,
) -> Result<Json<Vec<PlayerAttribute>>> {
    let attributes = state.with_db(|db| {
        if db.get_player(id)?.is_none() {
            return Err(ManagerError::NotFound {
                resource: "player",
                id: id.as_i64(),
            });
        }
        db.player_attributes(id)
    })?;
    Ok(Json(attributes))
}

pub async fn add_attribute(
    State(state): State<AppState>,
    _admin: AdminUser,
    Id(id): Id<PlayerId>,
    Body(draft): Body<NewPlayerAttribute>,
) -> Result<(StatusCode, Json<PlayerAttribute>)> {
    Ok(created(
        state.with_db(|db| db.add_player_attribute(id, &draft))?,
    ))
}
