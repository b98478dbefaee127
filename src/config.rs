use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;

const CONFIG_PATH_ENV_VAR: &str = "FEEDCAL_CONFIG_FILE";
const API_TOKEN_ENV_VAR: &str = "FEEDCAL_API_TOKEN";

/// Connection details for the feed's count-lookup endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL, e.g. `https://feed.example.com/api`. Without it the
    /// calendar renders with empty counts.
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: None,
            token: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    tick_rate_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api: ApiConfig::default(),
            tick_rate_secs: 60,
        }
    }
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_secs(self.tick_rate_secs)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }
}

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("feedcal").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".feedcal.toml"));
    }

    locations
}

/// Load the config from an explicit path, or from the first discovered
/// location, or fall back to defaults. `FEEDCAL_API_TOKEN` always wins
/// over a token from the file.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(path) = path {
        Config::from_path(path)?
    } else if let Some(path) = find_configfile_locations()
        .iter()
        .find(|location| location.is_file())
    {
        Config::from_path(path)?
    } else {
        log::info!("no config file found, using defaults");
        Config::default()
    };

    if let Ok(token) = env::var(API_TOKEN_ENV_VAR) {
        config.api.token = Some(token);
    }

    Ok(config)
}
