use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Which backend serves the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    Demo,
    S3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_mode")]
    pub mode: StoreMode,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub endpoint_url: Option<String>,
    #[serde(default)]
    pub path_style: bool,
}

fn default_mode() -> StoreMode {
    StoreMode::Demo
}

fn default_region() -> String {
    "eu-west-1".to_string()
}

fn default_tick_ms() -> u64 {
    200
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            region: default_region(),
            endpoint_url: None,
            path_style: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreSettings,
    /// Tick length of the simulated transfer, in milliseconds.
    #[serde(default = "default_tick_ms")]
    pub simulated_tick_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreSettings::default(),
            simulated_tick_ms: default_tick_ms(),
        }
    }
}

pub struct ConfigManager {
    config_path: PathBuf,
    pub config: AppConfig,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::home_dir()
            .context("Could not find home directory")?
            .join(".config")
            .join("bucketboard");

        fs::create_dir_all(&config_dir)?;
        Ok(Self::load_from(config_dir.join("config.json")))
    }

    /// Missing or unreadable files fall back to defaults.
    pub fn load_from(config_path: PathBuf) -> Self {
        let config = fs::read_to_string(&config_path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default();

        Self {
            config_path,
            config,
        }
    }

    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_path, json)?;
        Ok(())
    }

    pub fn log_path(&self) -> PathBuf {
        self.config_path.with_file_name("bucketboard.log")
    }
}
