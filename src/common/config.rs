//! Configuration file handling

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::paths::config_path;
use super::{Error, Result};

/// Main configuration structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Root of the source checkout; children run from here
    #[serde(default)]
    pub src_root: Option<PathBuf>,

    /// Slave properties shared by every bot, overridden per bot
    #[serde(default)]
    pub slave_properties: BTreeMap<String, String>,

    /// Locations of the external step scripts
    #[serde(default)]
    pub scripts: Scripts,
}

/// External scripts the formatted commands invoke
#[derive(Debug, Deserialize, Clone)]
pub struct Scripts {
    /// Host step driver
    #[serde(default = "default_host_steps")]
    pub host_steps: String,

    /// Device step driver
    #[serde(default = "default_device_steps")]
    pub device_steps: String,

    /// Shell file defining `bb_baseline_setup`
    #[serde(default = "default_functions")]
    pub functions: String,

    /// Shell used to wrap each command
    #[serde(default = "default_shell")]
    pub shell: String,
}

impl Default for Scripts {
    fn default() -> Self {
        Self {
            host_steps: default_host_steps(),
            device_steps: default_device_steps(),
            functions: default_functions(),
            shell: default_shell(),
        }
    }
}

fn default_host_steps() -> String {
    "build/android/buildbot/bb_host_steps.py".to_string()
}
fn default_device_steps() -> String {
    "build/android/buildbot/bb_device_steps.py".to_string()
}
fn default_functions() -> String {
    "build/android/buildbot/buildbot_functions.sh".to_string()
}
fn default_shell() -> String {
    "bash".to_string()
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        let config: Self =
            toml::from_str(&content).map_err(|e| Error::ConfigParse(e.to_string()))?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Absolute source root, falling back to the current directory
    ///
    /// A relative `src_root` is taken relative to the current directory.
    pub fn src_root(&self) -> Result<PathBuf> {
        match &self.src_root {
            Some(root) if root.is_absolute() => Ok(root.clone()),
            Some(root) => Ok(current_dir()?.join(root)),
            None => current_dir(),
        }
    }
}

fn current_dir() -> Result<PathBuf> {
    std::env::current_dir()
        .map_err(|e| Error::Config(format!("Cannot determine current directory: {}", e)))
}
