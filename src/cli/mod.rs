//! CLI argument definitions and parsing.

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::{BIND_ENV_VAR, DATABASE_ENV_VAR, DEFAULT_BIND, SETTINGS_ENV_VAR};

/// Environment variable holding the password for `create-superuser`
pub const SUPERUSER_PASSWORD_ENV_VAR: &str = "FM_SUPERUSER_PASSWORD";

/// Options shared by every command
#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// SQLite database file (defaults to the user data directory).
    #[clap(long, global = true, env = DATABASE_ENV_VAR)]
    pub database: Option<PathBuf>,

    /// TOML file overriding column limits and team defaults.
    #[clap(long, global = true, env = SETTINGS_ENV_VAR)]
    pub settings: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[clap(long, global = true)]
    pub log_json: bool,
}

#[derive(Debug, Parser)]
#[clap(
    name = "football-manager",
    version,
    about = "Football Manager fantasy API server"
)]
pub struct FootballManager {
    #[clap(flatten)]
    pub global: GlobalOpts,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP API until Ctrl+C or SIGTERM
    Serve {
        /// Address to listen on.
        #[clap(long, env = BIND_ENV_VAR, default_value = DEFAULT_BIND)]
        bind: SocketAddr,
    },

    /// Create a user with staff and superuser rights
    CreateSuperuser {
        /// Login email of the new superuser.
        #[clap(long)]
        email: String,

        /// Password (or set `FM_SUPERUSER_PASSWORD`).
        #[clap(long, env = SUPERUSER_PASSWORD_ENV_VAR, hide_env_values = true)]
        password: String,

        #[clap(long)]
        first_name: Option<String>,

        #[clap(long)]
        last_name: Option<String>,
    },

    /// Insert the default player positions and contract types
    Seed,
}

#[cfg(test)]
mod tests;
