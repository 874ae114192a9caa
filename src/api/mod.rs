//! HTTP routes
//!
//! Every route takes and returns JSON. Foreign keys are bare ids, lists are
//! ordered by id and creates answer `201 Created` with the stored record.

pub mod accounts;
pub mod clubs;
pub mod common;
pub mod offers;
pub mod players;
pub mod reference;


use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;

use crate::auth::TokenCache;
use crate::config::Settings;
use crate::error::Result;
use crate::storage::FantasyDatabase;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<FantasyDatabase>>,
    tokens: Arc<TokenCache>,
    settings: Arc<Settings>,
}

impl AppState {
    pub fn new(db: FantasyDatabase) -> Self {
        let tokens = TokenCache::new(db.settings().token_cache_size);
        let settings = db.settings().clone();
        Self {
            db: Arc::new(Mutex::new(db)),
            tokens: Arc::new(tokens),
            settings: Arc::new(settings),
        }
    }

    /// Run `f` with the database locked. The lock is released before this
    /// returns, so callers never hold it across an `.await`.
    pub fn with_db<T>(&self, f: impl FnOnce(&mut FantasyDatabase) -> Result<T>) -> Result<T> {
        let mut db = self.db.lock()?;
        f(&mut db)
    }

    pub fn tokens(&self) -> &TokenCache {
        &self.tokens
    }

    /// The database's settings, readable without taking the lock
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health/", get(health))
        // accounts
        .route("/register/", post(accounts::register))
        .route("/api-auth/login/", post(accounts::login))
        .route("/api-auth/logout/", post(accounts::logout))
        .route("/api-token-auth/", post(accounts::obtain_token))
        .route("/managers/", get(accounts::list_managers))
        // reference data
        .route(
            "/attribute-cateogries/",
            get(reference::list_attribute_categories).post(reference::create_attribute_category),
        )
        .route(
            "/attribute-categories/",
            get(reference::list_attribute_categories).post(reference::create_attribute_category),
        )
        .route(
            "/countries/",
            get(reference::list_countries).post(reference::create_country),
        )
        .route("/countries/:id/", get(reference::get_country))
        .route(
            "/positions/",
            get(reference::list_positions).post(reference::create_position),
        )
        .route(
            "/contract-types/",
            get(reference::list_contract_types).post(reference::create_contract_type),
        )
        // leagues and teams
        .route(
            "/leagues/",
            get(clubs::list_leagues).post(clubs::create_league),
        )
        .route("/leagues/:id/", get(clubs::get_league))
        .route("/teams/", get(clubs::list_teams).post(clubs::create_team))
        .route("/teams/:id/", get(clubs::get_team))
        // players
        .route(
            "/players/",
            get(players::list_players).post(players::create_player),
        )
        .route(
            "/players/:id/",
            get(players::get_player).patch(players::update_player),
        )
        .route(
            "/players/:id/attributes/",
            get(players::list_attributes).post(players::add_attribute),
        )
        // transfers and negotiations
        .route(
            "/transfers/",
            get(offers::list_transfers).post(offers::create_transfer),
        )
        .route(
            "/transfers/:id/",
            get(offers::get_transfer).patch(offers::update_transfer),
        )
        .route(
            "/counter-offers/",
            get(offers::list_counter_offers).post(offers::create_counter_offer),
        )
        .route(
            "/counter-offers/:id/",
            get(offers::get_counter_offer).patch(offers::update_counter_offer),
        )
        .route(
            "/negotiations/",
            get(offers::list_negotiations).post(offers::create_negotiation),
        )
        .route("/negotiations/:id/", get(offers::get_negotiation))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<Json<Value>> {
    state.with_db(|db| db.count_users())?;
    Ok(Json(json!({ "status": "ok" })))
}
