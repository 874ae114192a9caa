//! Helpers shared by the commands.

use std::path::{Path, PathBuf};

use crate::{
    config::{default_database_path, Settings},
    storage::FantasyDatabase,
    Result,
};

/// Open the database at `database` (or the default location) with settings
/// read from `settings`, if given.
pub fn open_database(database: Option<&Path>, settings: Option<&Path>) -> Result<FantasyDatabase> {
    let settings = Settings::load(settings)?;
    let path: PathBuf = database
        .map(Path::to_path_buf)
        .unwrap_or_else(default_database_path);

    tracing::debug!(path = %path.display(), "opening database");
    FantasyDatabase::open(&path, settings)
}
