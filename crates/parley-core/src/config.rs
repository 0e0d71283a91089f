//! Configuration management for parley.
//!
//! This module provides core configuration that doesn't depend on
//! the terminal frontend or any speech backend.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::state::{InterviewRole, InterviewRound};
use crate::APP_NAME;

/// Default inference endpoint base (OpenAI-compatible).
pub const DEFAULT_BASE_URL: &str = "https://models.github.ai/inference";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

/// Default locale for speech recognition and synthesis.
pub const DEFAULT_VOICE_LANGUAGE: &str = "en-US";

/// Core configuration structure for the application.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Bearer token for the inference endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible chat completion endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Chat model to request
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Locale used for speech recognition and synthesis (BCP 47 tag)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_language: Option<String>,

    /// Default interview role for a new session
    #[serde(default, skip_serializing_if = "is_default_role")]
    pub role: InterviewRole,

    /// Default interview round for a new session
    #[serde(default, skip_serializing_if = "is_default_round")]
    pub round: InterviewRound,
}

fn is_default_role(v: &InterviewRole) -> bool {
    *v == InterviewRole::default()
}

fn is_default_round(v: &InterviewRound) -> bool {
    *v == InterviewRound::default()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: None,
            voice_language: None,
            role: InterviewRole::default(),
            round: InterviewRound::default(),
        }
    }
}

impl Config {
    /// Get the bearer token
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Get the endpoint base URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Get the model name
    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// Get the speech locale
    pub fn voice_language(&self) -> &str {
        self.voice_language.as_deref().unwrap_or(DEFAULT_VOICE_LANGUAGE)
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new ConfigManager with the default configuration directory.
    pub fn new() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Creates a new ConfigManager with a specified configuration directory.
    pub fn with_config_dir<P: AsRef<std::path::Path>>(dir: P) -> Self {
        let config_path = dir.as_ref().join(format!("{}.toml", APP_NAME));
        Self { config_path }
    }

    /// Returns the default path to the configuration file.
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = config_dir().context("Failed to retrieve configuration directory")?;
        Ok(config_dir.join(APP_NAME).join(format!("{}.toml", APP_NAME)))
    }

    /// Loads the configuration from the config file or returns default.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let config_content = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file at {:?}", self.config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file at {:?}", self.config_path))?;

        if config.api_key().is_none() {
            warn!(
                "API key is not set. Question and feedback generation will not work without it. \
                 Set api_key in the config file or export PARLEY_API_KEY."
            );
        }

        Ok(config)
    }

    /// Saves the configuration to the config file.
    pub fn save(&self, config: &Config) -> Result<()> {
        let config_dir = self
            .config_path
            .parent()
            .with_context(|| format!("Failed to get parent directory of {:?}", self.config_path))?;

        fs::create_dir_all(config_dir)
            .with_context(|| format!("Failed to create config directory at {:?}", config_dir))?;

        let serialized =
            toml::to_string_pretty(&config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, serialized)
            .with_context(|| format!("Failed to write config file at {:?}", self.config_path))?;

        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path(&self) -> &std::path::Path {
        &self.config_path
    }
}
