//! Storage layer for the fantasy football API
//!
//! [`FantasyDatabase`] wraps a single SQLite connection. Operations are split
//! by area:
//! - `accounts`: users, manager profiles and auth keys
//! - `reference`: countries, positions, contract types, attribute categories
//! - `clubs`: leagues and teams
//! - `players`: players and their attributes
//! - `offers`: transfers, counter-offers and negotiations

pub mod accounts;
pub mod clubs;
pub mod models;
pub mod offers;
pub mod players;
pub mod reference;
pub mod schema;


pub use models::*;
pub use reference::{SeedReport, DEFAULT_CONTRACT_TYPES, DEFAULT_POSITIONS};
pub use schema::FantasyDatabase;
