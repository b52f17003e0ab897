//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use octodeco_cache::FileStore;
use octodeco_commerce::cart::{CartPersistence, CartStore, CouponRegistry};
use octodeco_commerce::catalog::Catalog;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Session used when `--session` is not given.
pub const DEFAULT_SESSION: &str = "default";

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Cart session name.
    pub session: String,
    /// Product catalog.
    pub catalog: Catalog,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, session: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        let session = session.unwrap_or(DEFAULT_SESSION).to_string();
        validate_session(&session)?;

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            session,
            catalog: Catalog::builtin(),
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory holding the session files.
    pub fn data_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.data_dir)
    }

    /// File backing the current session.
    pub fn session_file(&self) -> PathBuf {
        self.data_dir().join(format!("{}.json", self.session))
    }

    /// Open the current session's cart, hydrated from disk.
    pub fn cart(&self) -> Result<CartStore<FileStore>> {
        let path = self.session_file();
        let store = FileStore::open(&path)
            .with_context(|| format!("Failed to open cart storage: {}", path.display()))?;

        let persistence = match self.config.storage.namespace.as_deref() {
            Some(ns) => CartPersistence::with_namespace(store, ns),
            None => CartPersistence::new(store),
        };
        self.output.debug(&format!("Cart session file: {}", path.display()));

        Ok(CartStore::open(persistence, CouponRegistry::builtin()))
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

/// Session names become file names, so keep them to a safe alphabet.
fn validate_session(session: &str) -> Result<()> {
    let ok = !session.is_empty()
        && session
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !ok {
        anyhow::bail!(
            "Invalid session name '{}': use letters, digits, '-' or '_'",
            session
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_names() {
        assert!(validate_session("default").is_ok());
        assert!(validate_session("alice_2").is_ok());
        assert!(validate_session("").is_err());
        assert!(validate_session("../etc").is_err());
    }

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            dir.path().join("octodeco.toml"),
            "[storage]\ndata_dir = \"carts\"\n",
        )
        .unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.storage.data_dir, "carts");
        assert_eq!(path, dir.path().join("octodeco.toml"));
    }
}
