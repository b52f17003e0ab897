//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["octodeco.toml", ".octodeco.toml", "octodeco.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Where carts are kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Cart storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Directory holding one JSON file per session, relative to the working
    /// directory unless absolute.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Prefix for the storage keys inside a session file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

fn default_data_dir() -> String {
    ".octodeco".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            namespace: None,
        }
    }
}

/// Logging.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset, e.g. "warn" or
    /// "octodeco_commerce=debug".
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Generate a default octodeco.toml config file.
pub fn generate_default_config() -> String {
    r#"# Octodeco storefront CLI configuration

[storage]
# One <session>.json file per cart session lives here.
data_dir = ".octodeco"
# namespace = "shop"

[logging]
# Overridden by RUST_LOG; --verbose forces debug.
level = "warn"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses_to_defaults() {
        let parsed: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed, CliConfig::default());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let parsed: CliConfig = toml::from_str("[storage]\nnamespace = \"shop\"\n").unwrap();
        assert_eq!(parsed.storage.data_dir, ".octodeco");
        assert_eq!(parsed.storage.namespace.as_deref(), Some("shop"));
        assert_eq!(parsed.logging.level, "warn");
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("octodeco.json");
        std::fs::write(&path, r#"{"logging": {"level": "debug"}}"#).unwrap();

        let config = CliConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(CliConfig::load("/definitely/not/here/octodeco.toml").is_err());
    }
}
