//! Engine configuration.
//!
//! ```rust
//! use rulekit_validate::{Validation, ValidationConfig, Validators};
//!
//! let config = ValidationConfig::from_json(r#"{ "locale": "pt_BR" }"#).unwrap();
//! assert_eq!(config.locale, "pt-br");
//!
//! let validation = Validation::with_config(&config, Validators::default());
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Environment variable holding the message locale.
pub const LOCALE_VAR: &str = "RULEKIT_LOCALE";
/// Environment variable holding the fallback message locale.
pub const FALLBACK_LOCALE_VAR: &str = "RULEKIT_FALLBACK_LOCALE";

/// Error type for configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A locale is not a language tag such as `en` or `pt-br`.
    #[error("Invalid locale '{value}' in {source_name}")]
    InvalidLocale { source_name: String, value: String },

    /// The configuration document could not be parsed.
    #[error("Configuration error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Locale settings for rendered error messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub locale: String,
    pub fallback_locale: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            locale: rulekit_i18n::DEFAULT_LOCALE.to_string(),
            fallback_locale: rulekit_i18n::DEFAULT_LOCALE.to_string(),
        }
    }
}

impl ValidationConfig {
    /// Read `RULEKIT_LOCALE` and `RULEKIT_FALLBACK_LOCALE`. Unset variables
    /// keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Parse a JSON document. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.normalized("json")
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(locale) = lookup(LOCALE_VAR) {
            config.locale = parse_locale(LOCALE_VAR, &locale)?;
        }
        if let Some(locale) = lookup(FALLBACK_LOCALE_VAR) {
            config.fallback_locale = parse_locale(FALLBACK_LOCALE_VAR, &locale)?;
        }
        tracing::debug!(
            locale = %config.locale,
            fallback_locale = %config.fallback_locale,
            "Loaded validation config"
        );
        Ok(config)
    }

    fn normalized(self, source_name: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            locale: parse_locale(source_name, &self.locale)?,
            fallback_locale: parse_locale(source_name, &self.fallback_locale)?,
        })
    }
}

fn locale_regex() -> &'static Regex {
    static LOCALE_REGEX: OnceLock<Regex> = OnceLock::new();
    LOCALE_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z]{2,3}(?:[-_][A-Za-z0-9]{2,8})*$").unwrap())
}

/// Validate a language tag and normalize it to lowercase with `-`.
fn parse_locale(source_name: &str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if !locale_regex().is_match(trimmed) {
        return Err(ConfigError::InvalidLocale {
            source_name: source_name.to_string(),
            value: value.to_string(),
        });
    }
    Ok(trimmed.to_lowercase().replace('_', "-"))
}
