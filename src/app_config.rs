use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
///
/// The configuration lives in a JSON file; every field has a serde default so
/// a partial file (or none at all) still produces a usable configuration.

/// Bounds for the sentence chunker, in characters
pub const CHUNK_SIZE_MIN: usize = 100;
pub const CHUNK_SIZE_MAX: usize = 5000;

/// Bounds for the dispatcher worker pool
pub const MAX_WORKERS_MIN: usize = 1;
pub const MAX_WORKERS_MAX: usize = 10;

/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO 639-1, or "auto")
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO 639-1)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Maximum chunk size in characters for the sentence chunker
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Maximum number of parallel translation workers
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    /// Service ids to translate with by default
    #[serde(default = "default_selected_services")]
    pub selected_services: Vec<String>,

    /// Per-service configuration
    #[serde(default)]
    pub services: ServicesConfig,

    /// Path of the glossary JSON file
    #[serde(default = "default_glossary_path")]
    pub glossary_path: String,

    /// Path of the history JSON file
    #[serde(default = "default_history_path")]
    pub history_path: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Per-service configuration blocks
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ServicesConfig {
    #[serde(default)]
    pub deepl: DeepLConfig,
    #[serde(default)]
    pub google: KeyedServiceConfig,
    #[serde(default)]
    pub yandex: KeyedServiceConfig,
    #[serde(default)]
    pub openai: ModelServiceConfig,
    #[serde(default)]
    pub openrouter: ModelServiceConfig,
    #[serde(default)]
    pub groq: ModelServiceConfig,
    #[serde(default)]
    pub anthropic: ModelServiceConfig,
    #[serde(default)]
    pub localai: LocalAIConfig,
}

/// DeepL service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DeepLConfig {
    /// API key; empty means "use the unauthenticated free endpoint"
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Account plan, "free" or "pro" (selects the keyed endpoint URL)
    #[serde(default = "default_deepl_plan")]
    pub plan: String,
}

impl Default for DeepLConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            plan: default_deepl_plan(),
        }
    }
}

/// Configuration for key-only cloud services (Google, Yandex)
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct KeyedServiceConfig {
    /// API key; the service is unconfigured without one
    #[serde(default = "String::new")]
    pub api_key: String,
}

/// Configuration for LLM services that take a key and a model name
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ModelServiceConfig {
    /// API key; the service is unconfigured without one
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Model name; empty falls back to the service's default model
    #[serde(default = "String::new")]
    pub model: String,
}

impl Default for ModelServiceConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: String::new(),
        }
    }
}

/// LocalAI (OpenAI-compatible local server) configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LocalAIConfig {
    /// Server base URL (e.g. http://localhost:8080/v1); empty disables the service
    #[serde(default = "String::new")]
    pub endpoint: String,

    /// Model name to request
    #[serde(default = "default_localai_model")]
    pub model: String,
}

impl Default for LocalAIConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            model: default_localai_model(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_source_language() -> String {
    "auto".to_string()
}

fn default_target_language() -> String {
    "ru".to_string()
}

fn default_chunk_size() -> usize {
    1000
}

fn default_max_workers() -> usize {
    3
}

fn default_selected_services() -> Vec<String> {
    vec!["deepl".to_string()]
}

fn default_deepl_plan() -> String {
    "free".to_string()
}

fn default_localai_model() -> String {
    "default".to_string()
}

fn default_glossary_path() -> String {
    "glossary.json".to_string()
}

fn default_history_path() -> String {
    "history.json".to_string()
}

impl Config {
    /// Load configuration from a JSON file, or defaults if it does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {:?}: {}", path, e))?;
        let config: Config = serde_json::from_str(&raw)
            .map_err(|e| anyhow!("Failed to parse config file {:?}: {}", path, e))?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)
            .map_err(|e| anyhow!("Failed to save config: {}", e))?;
        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.source_language)?;
        crate::language_utils::validate_language_code(&self.target_language)?;

        if crate::language_utils::is_auto(&self.target_language) {
            return Err(anyhow!("Target language cannot be 'auto'"));
        }

        if self.chunk_size < CHUNK_SIZE_MIN || self.chunk_size > CHUNK_SIZE_MAX {
            return Err(anyhow!(
                "Chunk size must be between {} and {}, got {}",
                CHUNK_SIZE_MIN,
                CHUNK_SIZE_MAX,
                self.chunk_size
            ));
        }

        if self.max_workers < MAX_WORKERS_MIN || self.max_workers > MAX_WORKERS_MAX {
            return Err(anyhow!(
                "Max workers must be between {} and {}, got {}",
                MAX_WORKERS_MIN,
                MAX_WORKERS_MAX,
                self.max_workers
            ));
        }

        if self.selected_services.is_empty() {
            return Err(anyhow!("At least one service must be selected"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            chunk_size: default_chunk_size(),
            max_workers: default_max_workers(),
            selected_services: default_selected_services(),
            services: ServicesConfig::default(),
            glossary_path: default_glossary_path(),
            history_path: default_history_path(),
            log_level: LogLevel::default(),
        }
    }
}
