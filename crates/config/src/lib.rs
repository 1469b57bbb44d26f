//! Configuration loading, validation, and management for rmrkl.
//!
//! Loads configuration from `~/.rmrkl/config.toml` with environment
//! variable overrides. Validates all settings at load time.

use rmrkl_core::tool::ToolDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Environment variable overriding `default_model`.
pub const ENV_MODEL: &str = "RMRKL_MODEL";
/// Environment variable overriding `default_temperature`.
pub const ENV_TEMPERATURE: &str = "RMRKL_TEMPERATURE";

/// The root configuration structure.
///
/// Maps directly to `~/.rmrkl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model name passed to the provider
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Max tokens per model response (provider default when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_max_tokens: Option<u32>,

    /// Prompt template overrides
    #[serde(default)]
    pub prompt: PromptConfig,

    /// Agent settings
    #[serde(default)]
    pub agent: AgentSection,

    /// Tools described to the model, in prompt order
    #[serde(default)]
    pub tools: Vec<ToolDescriptor>,
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}
fn default_temperature() -> f32 {
    0.0
}

/// Overrides for the two prompt templates. `None` keeps the built-in text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Human message template; must contain `{input}` and `{agent_scratchpad}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,

    /// System message template; must contain `{tool_names}` and `{tool_strings}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_instructions: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentSection {
    /// Free-form settings handed to the agent untouched
    /// (e.g. `max_iterations` for the loop that drives it)
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.rmrkl/config.toml).
    ///
    /// `RMRKL_MODEL` and `RMRKL_TEMPERATURE` take priority over the file.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
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
        tracing::debug!(
            path = %path.display(),
            tools = config.tools.len(),
            "Loaded config"
        );
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in `load`).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup(ENV_MODEL) {
            self.default_model = model;
        }

        if let Some(raw) = lookup(ENV_TEMPERATURE) {
            self.default_temperature = raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("{ENV_TEMPERATURE} is not a number: {raw}"))
            })?;
        }

        self.validate()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.default_temperature) {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.default_model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "default_model must not be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for tool in &self.tools {
            if tool.name.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "tool names must not be empty".into(),
                ));
            }
            if !seen.insert(tool.name.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "tool '{}' is declared more than once",
                    tool.name
                )));
            }
        }

        Ok(())
    }

    /// Generate a default config TOML string.
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".rmrkl")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: None,
            prompt: PromptConfig::default(),
            agent: AgentSection::default(),
            tools: vec![],
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
        assert_eq!(config.default_model, "gpt-4o-mini");
        assert!(config.tools.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let mut config = AppConfig::default();
        config.tools.push(ToolDescriptor::new("search", "web search"));
        config
            .agent
            .extra
            .insert("max_iterations".into(), serde_json::json!(15));
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_model, config.default_model);
        assert_eq!(parsed.tools, config.tools);
        assert_eq!(parsed.agent.extra["max_iterations"], 15);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            default_temperature: 5.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn duplicate_tools_rejected() {
        let config = AppConfig {
            tools: vec![
                ToolDescriptor::new("search", "web search"),
                ToolDescriptor::new("search", "Web Search"),
            ],
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn blank_tool_name_rejected() {
        let config = AppConfig {
            tools: vec![ToolDescriptor::new("  ", "nothing")],
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let result = AppConfig::load_from(Path::new("/nonexistent/config.toml"));
        let config = result.unwrap();
        assert_eq!(config.default_model, "gpt-4o-mini");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
default_model = "gpt-4o"
default_max_tokens = 512

[prompt]
suffix = "Question: {{input}}\n{{agent_scratchpad}}"

[agent.extra]
max_iterations = 10

[[tools]]
name = "search"
description = "web search"

[[tools]]
name = "calc"
description = "arithmetic"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.default_model, "gpt-4o");
        assert_eq!(config.default_max_tokens, Some(512));
        assert_eq!(
            config.prompt.suffix.as_deref(),
            Some("Question: {input}\n{agent_scratchpad}")
        );
        assert!(config.prompt.format_instructions.is_none());
        assert_eq!(config.agent.extra["max_iterations"], 10);
        let names: Vec<&str> = config.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["search", "calc"]);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "default_model = [").unwrap();
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn overrides_take_priority() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(|key| match key {
                ENV_MODEL => Some("claude-sonnet".into()),
                ENV_TEMPERATURE => Some("0.3".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.default_model, "claude-sonnet");
        assert!((config.default_temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn bad_temperature_override_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(|key| (key == ENV_TEMPERATURE).then(|| "warm".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("gpt-4o-mini"));
    }
}
