use std::path::PathBuf;
use std::time::Duration;

use eyre::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::backend::DEFAULT_BACKEND_URL;

const DEFAULT_REVEAL_DELAY_MS: u64 = 100;

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub youtube_api_key: Option<String>,
    pub backend_url: Option<String>,
    pub reveal_delay_ms: Option<u64>,
    pub default_format: Option<String>,
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from ~/.config/waffle/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    /// `YOUTUBE_API_KEY` takes priority over the config file
    pub fn api_key(&self) -> Option<String> {
        resolve_api_key(std::env::var("YOUTUBE_API_KEY").ok(), self.youtube_api_key.as_deref())
    }

    pub fn backend_url(&self) -> &str {
        self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
    }

    /// Pause between words when revealing an answer
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms.unwrap_or(DEFAULT_REVEAL_DELAY_MS))
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(crate::storage::default_data_dir)
    }
}

fn resolve_api_key(from_env: Option<String>, configured: Option<&str>) -> Option<String> {
    from_env
        .filter(|k| !k.is_empty())
        .or_else(|| configured.filter(|k| !k.is_empty()).map(str::to_string))
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("waffle")
        .join("config.toml")
}
