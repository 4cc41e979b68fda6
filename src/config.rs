//! User configuration
//!
//! Read from `<config_dir>/recall/config.toml`. Every key is optional:
//! ```toml
//! data_file = "/home/me/notes/flashcards.json"
//! default_limit = 10
//! random_source_fallback = true
//! color = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable that overrides the data file location
pub const DATA_FILE_ENV: &str = "RECALL_DATA_FILE";

const APP_DIR: &str = "recall";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Could not determine a data directory")]
    NoDataDir,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RecallConfig {
    /// Where the collection JSON is stored
    pub data_file: Option<PathBuf>,
    /// Default number of cards listed by `due`
    pub default_limit: usize,
    /// Whether `random` ignores a source filter that matches nothing
    pub random_source_fallback: bool,
    /// Colored terminal output
    pub color: bool,
}

impl Default for RecallConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            default_limit: 5,
            random_source_fallback: true,
            color: true,
        }
    }
}

impl RecallConfig {
    /// Default location of the config file
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_DIR).join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(p) => p,
            None => return Ok(Self::default()),
        };

        if !path.exists() {
            log::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Resolve the collection file: explicit flag, then environment, then config, then default
    pub fn resolve_data_file(&self, flag: Option<&Path>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = flag {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = std::env::var_os(DATA_FILE_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = &self.data_file {
            return Ok(path.clone());
        }
        default_data_file()
    }
}

/// `<data_local_dir>/recall/flashcards.json`
pub fn default_data_file() -> Result<PathBuf, ConfigError> {
    dirs::data_local_dir()
        .map(|p| p.join(APP_DIR).join("flashcards.json"))
        .ok_or(ConfigError::NoDataDir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = RecallConfig::load(Some(&temp.path().join("config.toml"))).unwrap();
        assert_eq!(config, RecallConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "default_limit = 12\ndata_file = \"/tmp/cards.json\"\n").unwrap();

        let config = RecallConfig::load(Some(&path)).unwrap();
        assert_eq!(config.default_limit, 12);
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/cards.json")));
        assert!(config.random_source_fallback);
    }

    #[test]
    fn test_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "default_limit = \"lots\"\n").unwrap();

        assert!(matches!(RecallConfig::load(Some(&path)), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_flag_wins() {
        let config = RecallConfig {
            data_file: Some(PathBuf::from("/from/config.json")),
            ..RecallConfig::default()
        };
        let resolved = config.resolve_data_file(Some(Path::new("/from/flag.json"))).unwrap();
        assert_eq!(resolved, PathBuf::from("/from/flag.json"));
    }
}
