//! Command implementations for the football-manager binary

pub mod common;
pub mod create_superuser;
pub mod seed;
pub mod serve;

#[cfg(test)]
mod tests;

pub use common::open_database;
