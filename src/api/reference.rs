//! Countries, positions, contract types and attribute categories.
//! Any authenticated user may read; only staff may write.

use axum::{extract::State, http::StatusCode, Json};

use super::{
    common::{created, found, Body, Id},
    AppState,
};
use crate::auth::{AdminUser, CurrentUser};
use crate::error::Result;
use crate::storage::{
    AttributeCategory, ContractType, Country, NewAttributeCategory, NewContractType, NewCountry,
    NewPosition, PlayerPosition,
};
use crate::types::CountryId;

pub async fn list_countries(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Country>>> {
    Ok(Json(state.with_db(|db| db.list_countries())?))
}

pub async fn get_country(
    State(state): State<AppState>,
    _user: CurrentUser,
    Id(id): Id<CountryId>,
) -> Result<Json<Country>> {
    found(state.with_db(|db| db.get_country(id))?, "country", id.as_i64())
}

pub async fn create_country(
    State(state): State<AppState>,
    _admin: AdminUser,
    Body(draft): Body<NewCountry>,
) -> Result<(StatusCode, Json<Country>)> {
    Ok(created(state.with_db(|db| db.create_country(&draft))?))
}

pub async fn list_positions(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<PlayerPosition>>> {
    Ok(Json(state.with_db(|db| db.list_positions())?))
}

pub async fn create_position(
    State(state): State<AppState>,
    _admin: AdminUser,
    Body(draft): Body<NewPosition>,
) -> Result<(StatusCode, Json<PlayerPosition>)> {
    Ok(created(state.with_db(|db| db.create_position(&draft))?))
}

pub async fn list_contract_types(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<ContractType>>> {
    Ok(Json(state.with_db(|db| db.list_contract_types())?))
}

pub async fn create_contract_type(
    State(state): State<AppState>,
    _admin: AdminUser,
    Body(draft): Body<NewContractType>,
) -> Result<(StatusCode, Json<ContractType>)> {
    Ok(created(state.with_db(|db| db.create_contract_type(&draft))?))
}

pub async fn list_attribute_categories(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<AttributeCategory>>> {
    Ok(Json(state.with_db(|db| db.list_attribute_categories())?))
}

pub async fn create_attribute_category(
    State(state): State<AppState>,
    _admin: AdminUser,
    Body(draft): Body<NewAttributeCategory>,
) -> Result<(StatusCode, Json<AttributeCategory>)> {
    Ok(created(
        state.with_db(|db| db.create_attribute_category(&draft))?,
    ))
}
