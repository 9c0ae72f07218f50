//! services/portal/src/config.rs
//!
//! Defines the portal's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development. Every value has a default; a missing API
//! key is a supported state in which the AI helper reports itself unavailable.

use std::time::Duration;
use tracing::Level;

/// Gemini's OpenAI-compatible endpoint.
pub const DEFAULT_CHAT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: Level,
    pub chat_api_key: Option<String>,
    pub chat_api_base: String,
    pub chat_model: String,
    /// Simulated verification latency on the sign-in form.
    pub login_delay: Duration,
    /// How long after sign-in the grade notice shows up.
    pub grade_notice_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: Level::INFO,
            chat_api_key: None,
            chat_api_base: DEFAULT_CHAT_API_BASE.to_string(),
            chat_model: "gemini-2.5-flash".to_string(),
            login_delay: Duration::from_millis(1500),
            grade_notice_delay: Duration::from_millis(8000),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let log_level = match var("RUST_LOG") {
            Some(raw) => raw.parse::<Level>().map_err(|_| {
                ConfigError::InvalidValue(
                    "RUST_LOG".to_string(),
                    format!("'{}' is not a valid log level", raw),
                )
            })?,
            None => defaults.log_level,
        };

        // --- Load the API key (as optional) ---
        let chat_api_key = var("GEMINI_API_KEY").or_else(|| var("API_KEY"));

        let chat_api_base = var("CHAT_API_BASE").unwrap_or(defaults.chat_api_base);
        let chat_model = var("CHAT_MODEL").unwrap_or(defaults.chat_model);

        let login_delay = millis(var("LOGIN_DELAY_MS"), "LOGIN_DELAY_MS")?
            .unwrap_or(defaults.login_delay);
        let grade_notice_delay = millis(var("GRADE_NOTICE_DELAY_MS"), "GRADE_NOTICE_DELAY_MS")?
            .unwrap_or(defaults.grade_notice_delay);

        Ok(Self {
            log_level,
            chat_api_key,
            chat_api_base,
            chat_model,
            login_delay,
            grade_notice_delay,
        })
    }
}

fn millis(raw: Option<String>, name: &str) -> Result<Option<Duration>, ConfigError> {
    raw.map(|raw| {
        raw.trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string()))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_without_variables() {
        let config = load(&[]).unwrap();
        assert!(config.chat_api_key.is_none());
        assert_eq!(config.chat_model, "gemini-2.5-flash");
        assert_eq!(config.chat_api_base, DEFAULT_CHAT_API_BASE);
        assert_eq!(config.login_delay, Duration::from_millis(1500));
        assert_eq!(config.grade_notice_delay, Duration::from_secs(8));
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn api_key_falls_back_and_ignores_blank() {
        let config = load(&[("GEMINI_API_KEY", "  "), ("API_KEY", "secret")]).unwrap();
        assert_eq!(config.chat_api_key.as_deref(), Some("secret"));

        let config = load(&[("GEMINI_API_KEY", "primary"), ("API_KEY", "secret")]).unwrap();
        assert_eq!(config.chat_api_key.as_deref(), Some("primary"));
    }

    #[test]
    fn overrides_and_invalid_values() {
        let config = load(&[("LOGIN_DELAY_MS", "10"), ("RUST_LOG", "debug")]).unwrap();
        assert_eq!(config.login_delay, Duration::from_millis(10));
        assert_eq!(config.log_level, Level::DEBUG);

        let err = load(&[("GRADE_NOTICE_DELAY_MS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref var, _) if var == "GRADE_NOTICE_DELAY_MS"));
        assert!(load(&[("RUST_LOG", "chatty")]).is_err());
    }
}
