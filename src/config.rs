//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::loader::DataPaths;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Data file locations
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_users_file")]
    pub users_file: String,

    #[serde(default = "default_organizations_file")]
    pub organizations_file: String,

    #[serde(default = "default_tickets_file")]
    pub tickets_file: String,
}

fn default_data_dir() -> String {
    "./data".to_string()
}

fn default_users_file() -> String {
    "users.json".to_string()
}

fn default_organizations_file() -> String {
    "organizations.json".to_string()
}

fn default_tickets_file() -> String {
    "tickets.json".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            users_file: default_users_file(),
            organizations_file: default_organizations_file(),
            tickets_file: default_tickets_file(),
        }
    }
}

impl DataConfig {
    /// Resolve the collection files; relative file names live in `data_dir`
    pub fn paths(&self) -> DataPaths {
        let dir = Path::new(&self.data_dir);
        DataPaths {
            users: dir.join(&self.users_file),
            organizations: dir.join(&self.organizations_file),
            tickets: dir.join(&self.tickets_file),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("desksearch").join("config.toml")),
            Some(PathBuf::from("/etc/desksearch/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(data_dir) = var("DESKSEARCH_DATA_DIR") {
            self.data.data_dir = data_dir;
        }
        if let Some(level) = var("DESKSEARCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("DESKSEARCH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# desksearch configuration
#
# Environment variables override these settings:
# - DESKSEARCH_DATA_DIR
# - DESKSEARCH_LOG_LEVEL
# - DESKSEARCH_LOG_FORMAT

[data]
# Directory holding the collection files
data_dir = "./data"

# Collection file names, relative to data_dir
users_file = "users.json"
organizations_file = "organizations.json"
tickets_file = "tickets.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.data.data_dir, "./data");
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.data.paths(), DataPaths::in_dir("./data"));
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.data.paths(), defaults.data.paths());
        assert_eq!(config.logging.level, defaults.logging.level);
        assert_eq!(config.logging.format, defaults.logging.format);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [data]
            data_dir = "/srv/zendesk"
            tickets_file = "tickets-2016.json"
            "#,
        )
        .unwrap();

        let paths = config.data.paths();
        assert_eq!(paths.users, PathBuf::from("/srv/zendesk/users.json"));
        assert_eq!(paths.tickets, PathBuf::from("/srv/zendesk/tickets-2016.json"));
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_absolute_file_ignores_data_dir() {
        let config = Config::parse(
            r#"
            [data]
            users_file = "/tmp/users.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.data.paths().users, PathBuf::from("/tmp/users.json"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DESKSEARCH_DATA_DIR", "/var/lib/desksearch"),
            ("DESKSEARCH_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|name| vars.get(name).map(|v| v.to_string()));

        assert_eq!(config.data.data_dir, "/var/lib/desksearch");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(&missing), Err(ConfigError::Io { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[data\ndata_dir = 1").unwrap();
        assert!(matches!(Config::load(&broken), Err(ConfigError::Parse { .. })));

        let valid = dir.path().join("config.toml");
        std::fs::write(&valid, "[logging]\nlevel = \"debug\"\n").unwrap();
        assert_eq!(Config::load(&valid).unwrap().logging.level, "debug");
    }
}
