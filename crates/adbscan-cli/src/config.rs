//! Configuration loading

use adbscan_discovery::AdbCommand;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub adb: AdbConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdbConfig {
    /// Path to the adb executable (located via the SDK or PATH when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Global adb arguments, e.g. ["-H", "10.0.0.2", "-P", "5037"]
    #[serde(default)]
    pub server_args: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Print the listing as JSON
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Build the adb command described by this configuration
    pub fn to_adb_command(&self) -> AdbCommand {
        let cmd = match &self.adb.path {
            Some(path) => AdbCommand::new(path),
            None => AdbCommand::locate(),
        };
        cmd.with_server_args(self.adb.server_args.iter().cloned())
    }
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}

/// Save default configuration to file, refusing to replace an existing one
pub fn save_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    let content = toml::to_string_pretty(&Config::default())?;
    std::fs::write(path, content)?;
    Ok(())
}
