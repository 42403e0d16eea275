//! Store configuration.
//!
//! Configuration can be loaded from:
//! - A TOML file with a `[store]` table
//! - Environment variables (`FAMFACE_*` prefixed)
//!
//! # Example
//!
//! ```rust,no_run
//! use famface_store::StoreConfig;
//!
//! // Load from a file when present, otherwise from the environment
//! let config = StoreConfig::load(Some(std::path::Path::new("famface.toml")))
//!     .expect("Failed to load config");
//!
//! // Or from environment variables only
//! let config = StoreConfig::from_env();
//! ```

use std::env;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use famface_core::defaults;
use famface_core::{Error, Result};

/// Where and how the state document is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory for the file backend.
    pub data_dir: PathBuf,
    /// Key of the persisted state blob.
    pub state_key: String,
    /// Fall back to the demo dataset when nothing usable is persisted.
    pub seed_on_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(defaults::DATA_DIR),
            state_key: defaults::STATE_KEY.to_string(),
            seed_on_missing: defaults::SEED_ON_MISSING,
        }
    }
}

#[derive(Deserialize)]
struct TomlRoot {
    #[serde(default)]
    store: StoreConfig,
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl StoreConfig {
    /// Build configuration from `FAMFACE_DATA_DIR`, `FAMFACE_STATE_KEY`
    /// and `FAMFACE_SEED`, using defaults for anything unset.
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            data_dir: env::var(defaults::ENV_DATA_DIR)
                .map(PathBuf::from)
                .unwrap_or(default.data_dir),
            state_key: env::var(defaults::ENV_STATE_KEY).unwrap_or(default.state_key),
            seed_on_missing: env::var(defaults::ENV_SEED)
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(default.seed_on_missing),
        }
    }

    /// Parse a TOML document. `${VAR}` placeholders are replaced from the
    /// environment before parsing.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);
        let root: TomlRoot =
            toml::from_str(&content).map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))?;
        root.store.validate()?;
        Ok(root.store)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Use `path` when it exists, otherwise environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                info!("Loading store config from: {}", path.display());
                Self::from_file(path)
            }
            _ => {
                debug!("No store config file, using environment variables");
                let config = Self::from_env();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(Error::Config("data_dir cannot be empty".to_string()));
        }
        if self.state_key.trim().is_empty() {
            return Err(Error::Config("state_key cannot be empty".to_string()));
        }
        if self.state_key.contains(['/', '\\']) || self.state_key.starts_with('.') {
            return Err(Error::Config(format!(
                "state_key must be a plain file stem, got: {}",
                self.state_key
            )));
        }
        Ok(())
    }

    /// Substitute environment variables in the format ${VAR_NAME}.
    /// Unset variables are left in place.
    fn substitute_env_vars(content: &str) -> String {
        let Ok(re) = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") else {
            return content.to_string();
        };
        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}
