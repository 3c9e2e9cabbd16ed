//! Configuration loading, validation, and management for tidydesk.
//!
//! Loads configuration from `~/.tidydesk/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.tidydesk/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Anthropic API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model driving the control loop
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature for the control loop
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Max tokens per control-loop response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Upper bound on model turns before the loop gives up
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,

    /// Plan drafting settings
    #[serde(default)]
    pub planner: PlannerConfig,

    /// Script generation settings
    #[serde(default)]
    pub script: ScriptConfig,
}

fn default_model() -> String {
    "claude-3-5-haiku-latest".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    4096
}
fn default_max_turns() -> u32 {
    24
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_turns", &self.max_turns)
            .field("planner", &self.planner)
            .field("script", &self.script)
            .finish()
    }
}

/// Settings for the plan drafting tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Model used to draft reorganization plans
    #[serde(default = "default_model")]
    pub model: String,

    /// Max tokens for a drafted plan
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Settings for the script generation tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Model used to generate the reorganization script
    #[serde(default = "default_script_model")]
    pub model: String,

    /// Max tokens for a generated script
    #[serde(default = "default_script_max_tokens")]
    pub max_tokens: u32,

    /// Extended thinking budget in tokens (0 disables thinking)
    #[serde(default = "default_thinking_budget")]
    pub thinking_budget: u32,
}

fn default_script_model() -> String {
    "claude-3-7-sonnet-latest".into()
}
fn default_script_max_tokens() -> u32 {
    10000
}
fn default_thinking_budget() -> u32 {
    5000
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            model: default_script_model(),
            max_tokens: default_script_max_tokens(),
            thinking_budget: default_thinking_budget(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.tidydesk/config.toml).
    ///
    /// Also checks environment variables for the API key:
    /// - `TIDYDESK_API_KEY` (highest priority)
    /// - `ANTHROPIC_API_KEY`
    pub fn load() -> Result<Self, ConfigError> {
        let config_dir = Self::config_dir();
        let config_path = config_dir.join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        // Environment variable overrides (highest priority)
        if config.api_key.is_none() {
            config.api_key = std::env::var("TIDYDESK_API_KEY")
                .ok()
                .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok());
        }

        // Allow env var to override the loop model
        if let Ok(model) = std::env::var("TIDYDESK_MODEL") {
            config.model = model;
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".tidydesk")
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.temperature < 0.0 || self.temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.max_turns == 0 {
            return Err(ConfigError::ValidationError(
                "max_turns must be at least 1".into(),
            ));
        }

        // Anthropic requires the thinking budget to fit inside max_tokens
        if self.script.thinking_budget > 0 && self.script.thinking_budget >= self.script.max_tokens
        {
            return Err(ConfigError::ValidationError(
                "script.thinking_budget must be smaller than script.max_tokens".into(),
            ));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            max_turns: default_max_turns(),
            planner: PlannerConfig::default(),
            script: ScriptConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.model, "claude-3-5-haiku-latest");
        assert_eq!(config.script.model, "claude-3-7-sonnet-latest");
        assert_eq!(config.max_turns, 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.model, config.model);
        assert_eq!(parsed.script.thinking_budget, config.script.thinking_budget);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            temperature: 5.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_max_turns_rejected() {
        let config = AppConfig {
            max_turns: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_thinking_budget_rejected() {
        let mut config = AppConfig::default();
        config.script.thinking_budget = config.script.max_tokens;
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(result.is_ok());
        let config = result.unwrap();
        assert_eq!(config.model, "claude-3-5-haiku-latest");
    }

    #[test]
    fn partial_config_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"claude-sonnet-4-5\"").unwrap();
        writeln!(file, "[script]").unwrap();
        writeln!(file, "thinking_budget = 2000").unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.model, "claude-sonnet-4-5");
        assert_eq!(config.script.thinking_budget, 2000);
        assert_eq!(config.max_turns, 24);
        assert_eq!(config.planner.model, "claude-3-5-haiku-latest");
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("claude-3-5-haiku-latest"));
        assert!(toml_str.contains("thinking_budget"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = AppConfig {
            api_key: Some("sk-ant-secret".into()),
            ..AppConfig::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-ant-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
