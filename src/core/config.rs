//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.confab/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The API key is deliberately not defaulted: credentials are injected
//! configuration, required before the UI starts.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConfabConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub model: Option<String>,
    pub max_reply_tokens: Option<u32>,
    pub system_prompt: Option<String>,
    pub greeting: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_REPLY_TOKENS: u32 = 150;
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const DEFAULT_GREETING: &str = "Welcome to Confab! Ask me anything.";

// ============================================================================
// Resolved Config (concrete values, no Options except the credential)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub model_name: String,
    pub max_reply_tokens: u32,
    pub system_prompt: String,
    pub greeting: String,
    /// None means unconfigured; provider construction rejects that.
    pub api_key: Option<String>,
    pub base_url: String,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.confab/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".confab").join("config.toml"))
}

/// Load config from `~/.confab/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ConfabConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ConfabConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ConfabConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ConfabConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ConfabConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Confab Configuration
# All settings are optional except the API key — defaults are used for
# anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# model = "gpt-4o-mini"
# max_reply_tokens = 150
# system_prompt = "You are a helpful assistant."
# greeting = "Welcome to Confab! Ask me anything."

# [openai]
# api_key = "sk-..."                 # Or set OPENAI_API_KEY env var
# base_url = "https://api.openai.com/v1"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_model` is the `--model` flag (None = not specified).
pub fn resolve(config: &ConfabConfig, cli_model: Option<&str>) -> ResolvedConfig {
    // Model: CLI → env → config → default
    let model_name = cli_model
        .map(|s| s.to_string())
        .or_else(|| std::env::var("CONFAB_MODEL").ok())
        .or_else(|| config.general.model.clone())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    // API key: env → config (no default — required, validated at startup)
    let api_key = std::env::var("OPENAI_API_KEY")
        .ok()
        .or_else(|| config.openai.api_key.clone());

    // Base URL: env → config → default
    let base_url = std::env::var("OPENAI_BASE_URL")
        .ok()
        .or_else(|| config.openai.base_url.clone())
        .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string());

    ResolvedConfig {
        model_name,
        max_reply_tokens: config
            .general
            .max_reply_tokens
            .unwrap_or(DEFAULT_MAX_REPLY_TOKENS),
        system_prompt: config
            .general
            .system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
        greeting: config
            .general
            .greeting
            .clone()
            .unwrap_or_else(|| DEFAULT_GREETING.to_string()),
        api_key,
        base_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = ConfabConfig::default();
        assert!(config.general.model.is_none());
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = ConfabConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.max_reply_tokens, DEFAULT_MAX_REPLY_TOKENS);
        assert_eq!(resolved.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(resolved.greeting, DEFAULT_GREETING);
        assert_eq!(resolved.base_url, DEFAULT_OPENAI_BASE_URL);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ConfabConfig {
            general: GeneralConfig {
                model: Some("my-model".to_string()),
                max_reply_tokens: Some(512),
                system_prompt: Some("Custom prompt.".to_string()),
                greeting: Some("Hi.".to_string()),
            },
            openai: OpenAiConfig {
                api_key: Some("sk-test-123".to_string()),
                base_url: Some("http://localhost:8080/v1".to_string()),
            },
        };
        let resolved = resolve(&config, None);
        assert_eq!(resolved.model_name, "my-model");
        assert_eq!(resolved.max_reply_tokens, 512);
        assert_eq!(resolved.system_prompt, "Custom prompt.");
        assert_eq!(resolved.greeting, "Hi.");
        assert_eq!(resolved.api_key.as_deref(), Some("sk-test-123"));
        assert_eq!(resolved.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_resolve_cli_model_wins() {
        let config = ConfabConfig {
            general: GeneralConfig {
                model: Some("config-model".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("cli-model"));
        assert_eq!(resolved.model_name, "cli-model");
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
model = "gpt-4o-mini"
max_reply_tokens = 150
system_prompt = "Be brief."

[openai]
api_key = "sk-test-123"
base_url = "http://192.168.1.100:8080/v1"
"#;
        let config: ConfabConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.model.as_deref(), Some("gpt-4o-mini"));
        assert_eq!(config.general.max_reply_tokens, Some(150));
        assert_eq!(config.general.system_prompt.as_deref(), Some("Be brief."));
        assert_eq!(config.general.greeting, None);
        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test-123"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[general]
model = "my-model"
"#;
        let config: ConfabConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.model.as_deref(), Some("my-model"));
        assert!(config.general.max_reply_tokens.is_none());
        assert!(config.openai.api_key.is_none());
    }
}
