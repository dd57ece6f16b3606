use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use url::Url;

use crate::providers::gemini::DEFAULT_ENDPOINT;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Generative API connection settings
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Model selection and prompt budgets
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Where uploads are stored
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Generative API connection settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeminiConfig {
    /// API key; overridden by `GEMINI_API_KEY` / `--api-key`
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature (0.0 to 2.0); provider default when unset
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            temperature: None,
        }
    }
}

/// Model selection and prompt budgets
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Models tried in order for summaries and questions
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Single model used for moderation
    #[serde(default = "default_safety_model")]
    pub safety_model: String,

    /// Characters of note text sent for summaries and questions
    #[serde(default = "default_max_source_chars")]
    pub max_source_chars: usize,

    /// Characters of note text sent for moderation
    #[serde(default = "default_safety_max_source_chars")]
    pub safety_max_source_chars: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            safety_model: default_safety_model(),
            max_source_chars: default_max_source_chars(),
            safety_max_source_chars: default_safety_max_source_chars(),
        }
    }
}

/// Upload storage settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory stored notes are written to
    #[serde(default = "default_upload_folder")]
    pub upload_folder: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_folder: default_upload_folder(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_models() -> Vec<String> {
    // Fast tier first, general-purpose tiers after
    vec![
        "models/gemini-2.5-flash".to_string(),
        "models/gemini-1.5-flash".to_string(),
        "models/gemini-pro".to_string(),
        "models/gemma-3-27b-it".to_string(),
    ]
}

fn default_safety_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_max_source_chars() -> usize {
    15_000
}

fn default_safety_max_source_chars() -> usize {
    5_000
}

fn default_upload_folder() -> PathBuf {
    PathBuf::from("uploads")
}

impl Config {
    /// Load the config file, or write and return the default one when it
    /// does not exist yet
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .with_context(|| format!("Failed to open config file: {:?}", path))?;
            let reader = BufReader::new(file);
            return serde_json::from_reader(reader)
                .with_context(|| format!("Failed to parse config file: {:?}", path));
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Replace the configured API key when an override is given
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.gemini.api_key = key;
        }
        self
    }

    /// Validate the configuration for consistency and required values
    ///
    /// A missing API key is allowed: generation then degrades to its
    /// "API key missing" results instead of failing.
    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.gemini.endpoint)
            .map_err(|e| anyhow!("Invalid API endpoint '{}': {}", self.gemini.endpoint, e))?;

        if self.gemini.timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be greater than zero"));
        }

        if self.generation.models.iter().all(|m| m.trim().is_empty()) {
            return Err(anyhow!("At least one generation model must be configured"));
        }

        if self.generation.safety_model.trim().is_empty() {
            return Err(anyhow!("A safety model must be configured"));
        }

        if self.generation.max_source_chars == 0 || self.generation.safety_max_source_chars == 0 {
            return Err(anyhow!("Source character budgets must be greater than zero"));
        }

        if let Some(t) = self.gemini.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(anyhow!("Temperature must be between 0.0 and 2.0, got {}", t));
            }
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            gemini: GeminiConfig::default(),
            generation: GenerationConfig::default(),
            storage: StorageConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
