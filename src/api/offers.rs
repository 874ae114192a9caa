//! Transfers, counter-offers and negotiations, open to any logged-in user

use axum::{extract::State, http::StatusCode, Json};

use super::{
    common::{created, found, Body, Id},
    AppState,
};
use crate::auth::CurrentUser;
use crate::error::Result;
use crate::storage::{
    CounterOffer, CounterOfferUpdate, Negotiation, NewCounterOffer, NewNegotiation, NewTransfer,
    Transfer, TransferUpdate,
};
use crate::types::{CounterOfferId, NegotiationId, TransferId};

pub async fn list_transfers(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Transfer>>> {
    Ok(Json(state.with_db(|db| db.list_transfers())?))
}

pub async fn get_transfer(
    State(state): State<AppState>,
    _user: CurrentUser,
    Id(id): Id<TransferId>,
) -> Result<Json<Transfer>> {
    found(state.with_db(|db| db.get_transfer(id))?, "transfer", id.as_i64())
}

pub async fn create_transfer(
    State(state): State<AppState>,
    _user: CurrentUser,
    Body(draft): Body<NewTransfer>,
) -> Result<(StatusCode, Json<Transfer>)> {
    Ok(created(state.with_db(|db| db.create_transfer(&draft))?))
}

pub async fn update_transfer(
    State(state): State<AppState>,
    _user: CurrentUser,
    Id(id): Id<TransferId>,
    Body(update): Body<TransferUpdate>,
) -> Result<Json<Transfer>> {
    Ok(Json(state.with_db(|db| db.update_transfer(id, &update))?))
}

pub async fn list_counter_offers(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<CounterOffer>>> {
    Ok(Json(state.with_db(|db| db.list_counter_offers())?))
}

pub async fn get_counter_offer(
    State(state): State<AppState>,
    _user: CurrentUser,
    Id(id): Id<CounterOfferId>,
) -> Result<Json<CounterOffer>> {
    found(
        state.with_db(|db| db.get_counter_offer(id))?,
        "counter-offer",
        id.as_i64(),
    )
}

pub async fn create_counter_offer(
    State(state): State<AppState>,
    _user: CurrentUser,
    Body(draft): Body<NewCounterOffer>,
) -> Result<(StatusCode, Json<CounterOffer>)> {
    Ok(created(state.with_db(|db| db.create_counter_offer(&draft))?))
}

pub async fn update_counter_offer(
    State(state): State<AppState>,
    _user: CurrentUser,
    Id(id): Id<CounterOfferId>,
    Body(update): Body<CounterOfferUpdate>,
) -> Result<Json<CounterOffer>> {
    Ok(Json(
        state.with_db(|db| db.update_counter_offer(id, &update))?,
    ))
}

pub async fn list_negotiations(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Negotiation>>> {
    Ok(Json(state.with_db(|db| db.list_negotiations())?))
}

pub async fn get_negotiation(
    State(state): State<AppState>,
    _user: CurrentUser,
    Id(id): Id<NegotiationId>,
) -> Result<Json<Negotiation>> {
    found(
        state.with_db(|db| db.get_negotiation(id))?,
        "negotiation",
        id.as_i64(),
    )
}

pub async fn create_negotiation(
    State(state): State<AppState>,
    _user: CurrentUser,
    Body(draft): Body<NewNegotiation>,
) -> Result<(StatusCode, Json<Negotiation>)> {
    Ok(created(state.with_db(|db| db.create_negotiation(&draft))?))
}
