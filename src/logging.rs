//! Tracing subscriber setup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{ManagerError, Result};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "football_manager=info,tower_http=info";

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(json: bool) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let layer = tracing_subscriber::fmt::layer().with_target(true);
    let layer = if json {
        layer.json().boxed()
    } else {
        layer.compact().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()
        .map_err(|e| ManagerError::Internal {
            message: format!("failed to initialise logging: {e}"),
        })
}
