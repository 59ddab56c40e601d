//! Locale-aware message rendering.

use crate::catalog;
use crate::format::{format_message, MessageArgs};
use std::collections::HashMap;
use std::fmt;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Catalog domain holding the validation messages.
pub const VALIDATION_DOMAIN: &str = "validation";

/// Trait for rendering validation messages.
///
/// Implement this to plug a different localization system into the
/// validation engine.
pub trait MessageRenderer: Send + Sync {
    /// Render the catalog entry `key` of `domain` with `args`.
    fn render(&self, domain: &str, key: &str, args: &MessageArgs) -> String;

    /// Format a caller-supplied template with `args`.
    fn format_message(&self, template: &str, args: &MessageArgs) -> String {
        format_message(template, args)
    }
}

type Catalog = HashMap<String, String>;

/// In-memory message catalogs with a current and a fallback locale.
#[derive(Clone)]
pub struct Language {
    locale: String,
    fallback_locale: String,
    catalogs: HashMap<(String, String), Catalog>,
}

impl Language {
    /// Create a language renderer for `locale`, falling back to English.
    ///
    /// The built-in `validation` catalogs are registered automatically.
    pub fn new(locale: impl Into<String>) -> Self {
        let mut language = Self {
            locale: normalize(&locale.into()),
            fallback_locale: DEFAULT_LOCALE.to_string(),
            catalogs: HashMap::new(),
        };
        for (locale, entries) in catalog::builtin() {
            language.add_messages(locale, VALIDATION_DOMAIN, entries.iter().copied());
        }
        language
    }

    /// Set the locale used when a key is missing from the current locale.
    pub fn with_fallback(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = normalize(&locale.into());
        self
    }

    /// Change the current locale.
    pub fn set_locale(&mut self, locale: impl Into<String>) -> &mut Self {
        self.locale = normalize(&locale.into());
        self
    }

    /// Current locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Fallback locale.
    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    /// Locales that have at least one catalog registered.
    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.catalogs.keys().map(|(l, _)| l.as_str()).collect();
        locales.sort_unstable();
        locales.dedup();
        locales
    }

    /// Register or override messages for `(locale, domain)`.
    pub fn add_messages<K, V>(
        &mut self,
        locale: &str,
        domain: &str,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let catalog = self
            .catalogs
            .entry((normalize(locale), domain.to_string()))
            .or_default();
        for (key, message) in entries {
            catalog.insert(key.into(), message.into());
        }
        self
    }

    /// Look up the raw template for `key`, honoring the fallback locale.
    pub fn template(&self, domain: &str, key: &str) -> Option<&str> {
        [&self.locale, &self.fallback_locale]
            .into_iter()
            .find_map(|locale| {
                self.catalogs
                    .get(&(locale.clone(), domain.to_string()))
                    .and_then(|catalog| catalog.get(key))
            })
            .map(String::as_str)
    }

    /// Keys defined in `domain` for `locale`, sorted.
    pub fn keys(&self, locale: &str, domain: &str) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .catalogs
            .get(&(normalize(locale), domain.to_string()))
            .map(|catalog| catalog.keys().map(String::as_str).collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl MessageRenderer for Language {
    fn render(&self, domain: &str, key: &str, args: &MessageArgs) -> String {
        match self.template(domain, key) {
            Some(template) => format_message(template, args),
            None => {
                tracing::debug!(domain, key, locale = %self.locale, "Missing message key");
                format!("{domain}.{key}")
            }
        }
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("locale", &self.locale)
            .field("fallback_locale", &self.fallback_locale)
            .field("locales", &self.locales())
            .finish()
    }
}

fn normalize(locale: &str) -> String {
    locale.trim().replace('_', "-").to_lowercase()
}
