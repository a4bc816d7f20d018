use ::config::builder::DefaultState;
use ::config::{ConfigBuilder, Environment, File};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ReservationError;
use crate::models::Credentials;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub credentials: Credentials,
    pub polling: PollingSettings,
    pub browser: BrowserSettings,
    pub notify: NotifySettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingSettings {
    pub max_attempts: u32,
    pub interval_secs: u64,
    /// Pause after each navigation or click so the page can finish rendering.
    pub settle_millis: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            max_attempts: 100,
            interval_secs: 2,
            settle_millis: 2000,
        }
    }
}

impl PollingSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_millis)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    pub headless: bool,
    pub chrome_path: Option<PathBuf>,
    pub element_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: false,
            chrome_path: None,
            element_timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36".to_string(),
        }
    }
}

impl BrowserSettings {
    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifySettings {
    pub discord_webhook: Option<String>,
}

impl Config {
    /// Layers `srt.toml` (or the given file) and `SRT_*` environment
    /// variables over the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name("srt").required(false),
        };

        let builder = ::config::Config::builder()
            .add_source(file)
            .add_source(Self::environment());

        Self::from_builder(builder)
    }

    pub fn environment() -> Environment {
        Environment::with_prefix("SRT")
            .prefix_separator("_")
            .separator("__")
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self> {
        builder
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    pub fn validate(&self) -> std::result::Result<(), ReservationError> {
        if self.credentials.username.trim().is_empty() || self.credentials.password.is_empty() {
            return Err(ReservationError::Config(
                "credentials.username and credentials.password must be set".to_string(),
            ));
        }
        if self.polling.max_attempts == 0 {
            return Err(ReservationError::Config(
                "polling.max_attempts must be at least 1".to_string(),
            ));
        }
        if let Some(webhook) = &self.notify.discord_webhook {
            Url::parse(webhook).map_err(|e| {
                ReservationError::Config(format!("notify.discord_webhook is not a URL: {}", e))
            })?;
        }
        Ok(())
    }
}
