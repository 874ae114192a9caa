//! Leagues (staff-managed) and teams (owned by the user who creates them)

use axum::{extract::State, http::StatusCode, Json};

use super::{
    common::{created, found, Body, Id},
    AppState,
};
use crate::auth::{AdminUser, CurrentUser};
use crate::error::Result;
use crate::storage::{League, NewLeague, NewTeam, Team};
use crate::types::{LeagueId, TeamId};

pub async fn list_leagues(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<League>>> {
    Ok(Json(state.with_db(|db| db.list_leagues())?))
}

pub async fn get_league(
    State(state): State<AppState>,
    _user: CurrentUser,
    Id(id): Id<LeagueId>,
) -> Result<Json<League>> {
    found(state.with_db(|db| db.get_league(id))?, "league", id.as_i64())
}

pub async fn create_league(
    State(state): State<AppState>,
    _admin: AdminUser,
    Body(draft): Body<NewLeague>,
) -> Result<(StatusCode, Json<League>)> {
    Ok(created(state.with_db(|db| db.create_league(&draft))?))
}

pub async fn list_teams(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Team>>> {
    Ok(Json(state.with_db(|db| db.list_teams())?))
}

pub async fn get_team(
    State(state): State<AppState>,
    _user: CurrentUser,
    Id(id): Id<TeamId>,
) -> Result<Json<Team>> {
    found(state.with_db(|db| db.get_team(id))?, "team", id.as_i64())
}

/// The caller becomes the owner; an `owner` in the body is ignored.
pub async fn create_team(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Body(draft): Body<NewTeam>,
) -> Result<(StatusCode, Json<Team>)> {
    Ok(created(state.with_db(|db| db.create_team(user.id, &draft))?))
}
