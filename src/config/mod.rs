//! Configuration management for mldash
//!
//! Handles loading, validating, and persisting the backend address, the
//! per-category timeout budgets, and the development proxy rules.

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod defaults;
pub mod proxy;

pub use defaults::*;
pub use proxy::ProxyRule;

/// Per-category request timeouts, in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeouts {
    /// Any request without a more specific budget
    #[serde(default = "defaults::default_timeout")]
    pub default: u64,

    /// Dataset uploads
    #[serde(default = "defaults::default_upload_timeout")]
    pub upload: u64,

    /// Model and stacking ensemble training
    #[serde(default = "defaults::default_training_timeout")]
    pub training: u64,

    /// AutoML searches
    #[serde(default = "defaults::default_automl_timeout")]
    pub automl: u64,

    /// TCP connect
    #[serde(default = "defaults::default_connect_timeout")]
    pub connect: u64,
}

impl Timeouts {
    /// Default request budget
    #[must_use]
    pub const fn default_duration(&self) -> Duration {
        Duration::from_secs(self.default)
    }

    /// Upload budget
    #[must_use]
    pub const fn upload_duration(&self) -> Duration {
        Duration::from_secs(self.upload)
    }

    /// Training budget
    #[must_use]
    pub const fn training_duration(&self) -> Duration {
        Duration::from_secs(self.training)
    }

    /// AutoML budget
    #[must_use]
    pub const fn automl_duration(&self) -> Duration {
        Duration::from_secs(self.automl)
    }

    /// Connect budget
    #[must_use]
    pub const fn connect_duration(&self) -> Duration {
        Duration::from_secs(self.connect)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            default: default_timeout(),
            upload: default_upload_timeout(),
            training: default_training_timeout(),
            automl: default_automl_timeout(),
            connect: default_connect_timeout(),
        }
    }
}

/// Main mldash configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL; empty means "route through the proxy rules"
    #[serde(default = "defaults::default_base_url")]
    pub base_url: String,

    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,

    /// Timeout budgets
    #[serde(default)]
    pub timeouts: Timeouts,

    /// Development proxy rules
    #[serde(default = "defaults::default_proxy_rules")]
    pub proxy: Vec<ProxyRule>,
}

impl Config {
    /// Load configuration from the default location
    ///
    /// Tries in order:
    /// 1. XDG_CONFIG_HOME/mldash/config.toml
    /// 2. ~/.config/mldash/config.toml
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Err(ClientError::NoConfig);
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| ClientError::ConfigRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&contents).map_err(|e| ClientError::InvalidConfig(e.to_string()))
    }

    /// Load from `path` (or the default location), falling back to defaults
    /// when no file exists
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ClientError::DirError {
                path: parent.to_path_buf(),
                reason: e.to_string(),
            })?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| ClientError::SerializationError(e.to_string()))?;

        fs::write(path, contents).map_err(|e| ClientError::ConfigWrite {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_home = std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")));

        config_home
            .ok_or_else(|| {
                ClientError::Internal(
                    "Could not determine config directory: XDG_CONFIG_HOME not set and no home directory found"
                        .to_string(),
                )
            })
            .map(|path| path.join("mldash").join("config.toml"))
    }

    /// Apply environment overrides (`MLDASH_API_URL`)
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            if !url.is_empty() {
                self.base_url = url;
            }
        }
    }

    /// Origin that serves `path`: the base URL, or the target of the first
    /// proxy rule capturing the path when no base URL is set
    #[must_use]
    pub fn origin_for(&self, path: &str) -> Option<&str> {
        if !self.base_url.is_empty() {
            return Some(self.base_url.as_str());
        }
        self.proxy
            .iter()
            .find(|rule| rule.matches(path))
            .map(|rule| rule.target.as_str())
    }

    /// Merge another config into this one, with other taking precedence
    pub fn merge(&mut self, other: &Self) {
        if other.base_url != default_base_url() {
            self.base_url.clone_from(&other.base_url);
        }
        if other.verbose {
            self.verbose = true;
        }
        let defaults = Timeouts::default();
        if other.timeouts.default != defaults.default {
            self.timeouts.default = other.timeouts.default;
        }
        if other.timeouts.upload != defaults.upload {
            self.timeouts.upload = other.timeouts.upload;
        }
        if other.timeouts.training != defaults.training {
            self.timeouts.training = other.timeouts.training;
        }
        if other.timeouts.automl != defaults.automl {
            self.timeouts.automl = other.timeouts.automl;
        }
        if other.timeouts.connect != defaults.connect {
            self.timeouts.connect = other.timeouts.connect;
        }
        if other.proxy != default_proxy_rules() {
            self.proxy.clone_from(&other.proxy);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            if self.proxy.is_empty() {
                return Err(ClientError::InvalidConfig(
                    "base_url is empty and no proxy rules are configured".to_string(),
                ));
            }
        } else {
            url::Url::parse(&self.base_url).map_err(|e| {
                ClientError::InvalidConfig(format!("invalid base_url {}: {e}", self.base_url))
            })?;
        }

        let t = &self.timeouts;
        for (name, secs) in [
            ("default", t.default),
            ("upload", t.upload),
            ("training", t.training),
            ("automl", t.automl),
            ("connect", t.connect),
        ] {
            if secs == 0 {
                return Err(ClientError::InvalidConfig(format!(
                    "timeouts.{name} must be greater than 0"
                )));
            }
        }

        for rule in &self.proxy {
            rule.validate()?;
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            verbose: false,
            timeouts: Timeouts::default(),
            proxy: default_proxy_rules(),
        }
    }
}
