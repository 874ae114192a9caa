//! Football Manager Fantasy API
//!
//! A fantasy football management backend: user registration, league, team
//! and player bookkeeping, attribute-category metadata and transfer,
//! counter-offer and negotiation records, served as JSON over HTTP and stored
//! in SQLite.
//!
//! ## Layout
//!
//! - [`api`]: axum routes and shared state
//! - [`auth`]: password hashing and request authentication
//! - [`storage`]: the [`FantasyDatabase`] and its records
//! - [`validation`]: field-level payload checks
//! - [`commands`]: what the `football-manager` binary runs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use football_manager::{api, storage::{FantasyDatabase, NewUser}};
//!
//! # async fn example() -> football_manager::Result<()> {
//! let mut db = FantasyDatabase::new_in_memory()?;
//! db.seed_reference_data()?;
//! db.create_user(&NewUser::new("manager@example.com", "s3cret"))?;
//!
//! let app = api::router(api::AppState::new(db));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export FM_DATABASE=/var/lib/football-manager/manager.db
//! export FM_SETTINGS=/etc/football-manager.toml
//! export FM_BIND=0.0.0.0:8000
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod storage;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::Settings;
pub use error::{ManagerError, Result};
pub use storage::FantasyDatabase;
pub use types::*;
