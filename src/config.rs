//! Quota configuration.
//!
//! Loaded from `~/.quota/config.toml` when present, otherwise defaults.
//! Command-line flags override individual keys.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::locale::Locale;

/// Quota configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Catalog file (`.toml` or `.json`).
    pub catalog: PathBuf,

    /// SQLite file holding the withdrawal log.
    pub ledger: PathBuf,

    /// Wording for messages and table headers.
    pub locale: Locale,

    /// Station to start shifts at instead of the first one.
    pub start_station: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: PathBuf::from("materials.toml"),
            ledger: PathBuf::from("log.sqlite"),
            locale: Locale::default(),
            start_station: None,
        }
    }
}

impl Config {
    /// Load config from `explicit`, or from the default location.
    ///
    /// A missing default file yields defaults; a missing explicit file is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self, String> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => match Self::path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.quota/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".quota").join("config.toml"))
    }
}
