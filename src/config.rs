//! Runtime settings and filesystem locations.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ManagerError, Result};
use crate::validation::MAX_AMOUNT;

/// Environment variable naming the SQLite database file.
pub const DATABASE_ENV_VAR: &str = "FM_DATABASE";
/// Environment variable naming an optional TOML settings file.
pub const SETTINGS_ENV_VAR: &str = "FM_SETTINGS";
/// Environment variable holding the bind address for `serve`.
pub const BIND_ENV_VAR: &str = "FM_BIND";

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

const ATTRIBUTES: &[&str] = &[
    // Technical
    "Corners",
    "Crossing",
    "Dribbling",
    "Finishing",
    "First Touch",
    "Free Kick Taking",
    "Heading",
    "Long Shots",
    "Long Throws",
    "Marking",
    "Passing",
    "Penalty Taking",
    "Tackling",
    "Technique",
    // Mental
    "Aggression",
    "Anticipation",
    "Bravery",
    "Composure",
    "Concentration",
    "Decisions",
    "Determination",
    "Flair",
    "Leadership",
    "Off The Ball",
    "Positioning",
    "Teamwork",
    "Vision",
    "Work Rate",
    // Physical
    "Acceleration",
    "Agility",
    "Balance",
    "Jumping Reach",
    "Natural Fitness",
    "Pace",
    "Stamina",
    "Strength",
    // Goalkeeping
    "Aerial Reach",
    "Command Of Area",
    "Communication",
    "Handling",
    "Kicking",
    "One On Ones",
    "Reflexes",
    "Rushing Out",
    "Throwing",
];

const CATEGORIES: &[&str] = &["TECHNICAL", "MENTAL", "PHYSICAL", "GOALKEEPING"];

/// Application settings. Every field has a default, so a settings file only
/// needs the keys it overrides.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Maximum character length of every text column.
    pub max_length: usize,
    /// Budget given to newly created teams.
    pub default_budget: u64,
    /// Value given to newly created teams.
    pub default_value: u64,
    /// Attribute names accepted by attribute categories.
    pub attributes: Vec<String>,
    /// Category names accepted by attribute categories.
    pub categories: Vec<String>,
    /// Number of resolved auth tokens kept in memory.
    pub token_cache_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_length: 255,
            default_budget: 50_000_000,
            default_value: 0,
            attributes: ATTRIBUTES.iter().map(|s| s.to_string()).collect(),
            categories: CATEGORIES.iter().map(|s| s.to_string()).collect(),
            token_cache_size: 1024,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                Self::from_toml(&content)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.check()?;
        Ok(settings)
    }

    /// Reject limits no table could honour
    pub fn check(&self) -> Result<()> {
        if self.max_length == 0 || self.token_cache_size == 0 {
            return Err(ManagerError::Internal {
                message: "max_length and token_cache_size must be greater than zero".to_string(),
            });
        }
        if self.default_budget > MAX_AMOUNT || self.default_value > MAX_AMOUNT {
            return Err(ManagerError::Internal {
                message: format!("default_budget and default_value must not exceed {MAX_AMOUNT}"),
            });
        }
        Ok(())
    }
}

/// Path: <data dir>/football-manager/manager.db
pub fn default_database_path() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".local");
        home.push("share");
        home
    });
    base.join("football-manager").join("manager.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.max_length, 255);
        assert_eq!(settings.default_budget, 50_000_000);
        assert_eq!(settings.default_value, 0);
        assert_eq!(settings.categories.len(), 4);
        assert!(settings.attributes.iter().any(|a| a == "Finishing"));
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(Settings::load(None).unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = Settings::from_toml("max_length = 64\ncategories = [\"A\", \"B\"]").unwrap();
        assert_eq!(settings.max_length, 64);
        assert_eq!(settings.categories, vec!["A", "B"]);
        assert_eq!(settings.default_budget, 50_000_000);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_budget = 1000").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.default_budget, 1000);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Settings::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(ManagerError::Io(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let result = Settings::from_toml("max_length = \"long\"");
        assert!(matches!(result, Err(ManagerError::Settings(_))));
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert!(Settings::from_toml("max_length = 0").is_err());
        assert!(Settings::from_toml("token_cache_size = 0").is_err());
    }

    #[test]
    fn test_team_defaults_must_fit_a_column() {
        let too_big = Settings {
            default_budget: MAX_AMOUNT + 1,
            ..Settings::default()
        };
        assert!(too_big.check().is_err());

        let too_big = Settings {
            default_value: u64::MAX,
            ..Settings::default()
        };
        assert!(too_big.check().is_err());

        let settings = Settings::from_toml("default_budget = 9223372036854775807").unwrap();
        assert_eq!(settings.default_budget, MAX_AMOUNT);
        assert!(Settings::from_toml("default_value = 9223372036854775808").is_err());
    }

    #[test]
    fn test_default_database_path() {
        let path = default_database_path();
        assert!(path.ends_with("football-manager/manager.db"));
    }
}
