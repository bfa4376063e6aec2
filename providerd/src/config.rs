//! Provider configuration
//!
//! The configuration is a JSON document. Only `base_dir` and `root_id` are
//! required:
//!
//! ```json
//! {
//!   "base_dir": "/data/files/proxy",
//!   "root_id": "com.example.files",
//!   "root_alias": "proxy",
//!   "title": "Example Files",
//!   "helper": { "program": "/data/lib/libproxy.so" }
//! }
//! ```

use core_types::DocumentId;
use serde::{Deserialize, Serialize};
use services_fs_view::{StaticLabels, TreeConfig, DEFAULT_ROOT_ALIAS};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Arguments the helper receives when none are configured
pub const DEFAULT_HELPER_ARGS: &[&str] = &["-c", "config.toml"];

/// External helper started in the base directory at bootstrap
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HelperConfig {
    pub program: PathBuf,
    #[serde(default = "default_helper_args")]
    pub args: Vec<String>,
}

impl HelperConfig {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: default_helper_args(),
        }
    }
}

fn default_helper_args() -> Vec<String> {
    DEFAULT_HELPER_ARGS.iter().map(|arg| arg.to_string()).collect()
}

fn default_root_alias() -> String {
    DEFAULT_ROOT_ALIAS.to_string()
}

/// Top-level provider configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_dir: PathBuf,
    pub root_id: String,
    #[serde(default = "default_root_alias")]
    pub root_alias: String,
    /// Root title; the root id is shown when absent
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub helper: Option<HelperConfig>,
}

impl ProviderConfig {
    pub fn new(base_dir: impl Into<PathBuf>, root_id: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            root_id: root_id.into(),
            root_alias: default_root_alias(),
            title: None,
            icon: None,
            helper: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("base_dir cannot be empty".to_string()));
        }
        DocumentId::root(self.root_id.as_str())
            .map_err(|err| ConfigError::Invalid(format!("root_id: {}", err)))?;
        if self.root_alias.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "root_alias cannot be empty".to_string(),
            ));
        }
        if let Some(helper) = &self.helper {
            if helper.program.as_os_str().is_empty() {
                return Err(ConfigError::Invalid(
                    "helper program cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Configuration handed to the document tree
    pub fn tree_config(&self) -> TreeConfig {
        TreeConfig::new(&self.base_dir, &self.root_id).with_root_alias(&self.root_alias)
    }

    /// Title and icon for the root row
    pub fn labels(&self) -> StaticLabels {
        let title = self.title.clone().unwrap_or_else(|| self.root_id.clone());
        StaticLabels::new(title, self.icon.clone())
    }
}

/// Errors related to loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Failed to read config: {0}")]
    Io(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Loads provider configuration from disk
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<ProviderConfig, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let data = fs::read_to_string(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        Self::load_from_str(&data)
    }

    pub fn load_from_str(data: &str) -> Result<ProviderConfig, ConfigError> {
        let config: ProviderConfig =
            serde_json::from_str(data).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
