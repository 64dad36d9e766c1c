//! Configuration management for Arise CLI
//!
//! Stores the Gemini key, data directory, retry and progression settings in
//! ~/.config/arise/config.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use arise::{ProgressionConfig, RankStrategy, RetryPolicy};
use arise_gemini::GeminiConfig;

const CONFIG_DIR: &str = "arise";
const CONFIG_FILE: &str = "config.toml";
const DATA_DIR: &str = "arise";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Retry section, mirrors `RetryPolicy`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySection {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    RetryPolicy::default().max_attempts
}

fn default_initial_backoff_ms() -> u64 {
    RetryPolicy::default().initial_backoff.as_millis() as u64
}

fn default_max_backoff_ms() -> u64 {
    RetryPolicy::default().max_backoff.as_millis() as u64
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

/// Progression section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressionSection {
    #[serde(default)]
    pub rank_strategy: RankStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mental_trickle: Option<f64>,
}

/// CLI Configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub gemini: GeminiSection,
    #[serde(default)]
    pub retry: RetrySection,
    #[serde(default)]
    pub progression: ProgressionSection,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Set API key
    pub fn set_api_key(&mut self, key: String) {
        self.gemini.api_key = Some(key);
    }

    /// Directory holding the profile and content cache
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let dir = dirs::data_dir()
            .context("Could not determine data directory")?
            .join(DATA_DIR);
        Ok(dir)
    }

    /// API key from the environment, falling back to the config file
    pub fn api_key(&self) -> Option<String> {
        self.resolve_api_key(std::env::var(API_KEY_ENV).ok())
    }

    fn resolve_api_key(&self, from_env: Option<String>) -> Option<String> {
        from_env
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.gemini.api_key.clone())
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        self.gemini_config_with_key(self.api_key())
    }

    fn gemini_config_with_key(&self, api_key: Option<String>) -> GeminiConfig {
        let mut config = GeminiConfig {
            api_key,
            ..GeminiConfig::default()
        };
        if let Some(model) = &self.gemini.model {
            config = config.with_model(model.clone());
        }
        if let Some(base_url) = &self.gemini.base_url {
            config = config.with_base_url(base_url.clone());
        }
        if let Some(secs) = self.gemini.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.initial_backoff_ms),
        )
        .with_max_backoff(Duration::from_millis(self.retry.max_backoff_ms))
    }

    pub fn progression_config(&self) -> ProgressionConfig {
        ProgressionConfig {
            rank_strategy: self.progression.rank_strategy,
            mental_trickle: self
                .progression
                .mental_trickle
                .filter(|t| t.is_finite() && *t > 0.0),
            ..ProgressionConfig::default()
        }
    }
}
