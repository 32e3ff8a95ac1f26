// Configuration loading and parsing (ugf.toml).

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// ugf.toml structs
// ---------------------------------------------------------------------------

/// Every section is optional; missing keys take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub league: LeagueDataConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite file holding the save.
    pub db_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
    pub dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            dir: PathBuf::from("logs"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LeagueDataConfig {
    /// League reference dataset (JSON). Without it, team lookups miss.
    pub data_path: Option<PathBuf>,
}

pub const DEFAULT_LOG_FILTER: &str = "ugf=info,warn";

/// Config file looked up relative to the working directory.
pub const CONFIG_RELATIVE_PATH: &str = "config/ugf.toml";

/// Platform data directory for the save database, or `./ugf.db` when the
/// platform has none.
pub fn default_db_path() -> PathBuf {
    ProjectDirs::from("", "", "ugf")
        .map(|dirs| dirs.data_dir().join("ugf.db"))
        .unwrap_or_else(|| PathBuf::from("ugf.db"))
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate the config file at `path`. The file must exist.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Resolve the config: an explicit path must exist; otherwise
/// `config/ugf.toml` under `base_dir` is used when present, else defaults.
pub fn load_config(explicit: Option<&Path>, base_dir: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return load_config_from(path);
    }

    let candidate = base_dir.join(CONFIG_RELATIVE_PATH);
    if candidate.is_file() {
        return load_config_from(&candidate);
    }

    let config = Config::default();
    validate(&config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.storage.db_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "storage.db_path".into(),
            message: "must not be empty".into(),
        });
    }
    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.filter".into(),
            message: "must not be empty".into(),
        });
    }
    if config.logging.dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.dir".into(),
            message: "must not be empty".into(),
        });
    }
    if let Some(path) = &config.league.data_path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError {
                field: "league.data_path".into(),
                message: "must not be empty when set".into(),
            });
        }
    }
    Ok(())
}
