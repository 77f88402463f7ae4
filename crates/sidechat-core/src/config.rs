use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::transport::{CompletionClient, DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

/// Environment variable checked before the config file for the API key.
/// The credential is always injected; it is never compiled in.
pub const API_KEY_ENV: &str = "SIDECHAT_API_KEY";

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub max_tokens: Option<u32>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Environment variable first, then the config file
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV).ok().or_else(|| self.api_key.clone())
    }

    /// Build a completion client from this config, or `None` when no API
    /// key is available anywhere
    pub fn client(&self) -> Option<CompletionClient> {
        let api_key = self.resolve_api_key()?;
        Some(CompletionClient::with_settings(
            &api_key,
            self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT),
            self.model.as_deref().unwrap_or(DEFAULT_MODEL),
            self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        ))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("sidechat").join("config.json"))
    }
}
