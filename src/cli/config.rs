//! Configuration management for HealthBuddy
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.healthbuddy/config.toml

use crate::errors::{AssistantError, Result};
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete configuration for HealthBuddy
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub assistant: AssistantConfig,
    pub triage: TriageConfig,
    pub telemetry: TelemetryConfig,
    pub paths: PathsConfig,
}

/// Remote completion API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

/// Assistant behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub language: String,
    pub history_limit: usize,
    /// Never contact the remote API
    pub offline: bool,
}

/// Triage table configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Custom tables file; built-in tables when unset
    pub tables_path: Option<String>,
}

/// Terminal output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub default_verbosity: String,
    pub color_output: bool,
}

/// File system paths configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub state_dir: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama3-8b-8192".to_string(),
            temperature: 0.3,
            max_tokens: 1024,
            timeout_secs: 30,
            api_key_env: "GROQ_API_KEY".to_string(),
        }
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            offline: false,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            color_output: true,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            state_dir: "~/.healthbuddy".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AssistantError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| AssistantError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".healthbuddy").join("config.toml"))
    }

    /// File `config --save` writes: the explicit path, else the default
    pub fn target_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path().ok_or_else(|| {
                AssistantError::ConfigError("no home directory for config file".to_string())
            }),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            return Err(AssistantError::ConfigError(
                "api.base_url must not be empty".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.api.temperature) {
            return Err(AssistantError::ConfigError(
                "temperature must be between 0.0 and 2.0".to_string(),
            ));
        }

        if self.api.max_tokens == 0 {
            return Err(AssistantError::ConfigError(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.api.timeout_secs == 0 {
            return Err(AssistantError::ConfigError(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.assistant.history_limit == 0 {
            return Err(AssistantError::ConfigError(
                "history_limit must be greater than 0".to_string(),
            ));
        }

        self.language()?;

        match self.telemetry.default_verbosity.as_str() {
            "quiet" | "normal" | "verbose" | "very_verbose" => {}
            _ => {
                return Err(AssistantError::ConfigError(format!(
                    "Invalid verbosity level: {}",
                    self.telemetry.default_verbosity
                )))
            }
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| AssistantError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AssistantError::ConfigError(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AssistantError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Configured interface language
    pub fn language(&self) -> Result<Language> {
        self.assistant.language.parse()
    }

    /// Custom tables path, expanded
    pub fn tables_path(&self) -> Option<PathBuf> {
        self.triage.tables_path.as_deref().map(Self::expand_path)
    }

    /// API key from the configured environment variable
    pub fn api_key(&self) -> Result<String> {
        match std::env::var(&self.api.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AssistantError::MissingApiKey {
                var: self.api.api_key_env.clone(),
            }),
        }
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get state directory path
    pub fn state_dir(&self) -> PathBuf {
        Self::expand_path(&self.paths.state_dir)
    }

    /// REPL line history file
    pub fn history_file(&self) -> PathBuf {
        self.state_dir().join("chat_history")
    }
}
