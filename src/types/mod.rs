//! Domain types shared by storage and the HTTP layer.
//!
//! - `ids`: type-safe record identifiers
//! - `status`: status and offer-type enumerations

pub mod ids;
pub mod status;

#[cfg(test)]
mod tests;

pub use ids::*;
pub use status::{OfferStatus, OfferType, PlayerStatus, TransferStatus};
