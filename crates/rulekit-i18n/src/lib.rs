//! # rulekit i18n
//!
//! Localized message catalogs for rulekit validation errors.
//!
//! Messages are templates with `{name}` placeholders. A [`MessageRenderer`]
//! renders a catalog entry by `(domain, key)` or formats a caller-supplied
//! template directly. [`Language`] is the default renderer and ships the
//! `validation` domain in English (`en`) and Brazilian Portuguese (`pt-br`).
//!
//! ## Example
//!
//! ```rust
//! use rulekit_i18n::{Language, MessageArgs, MessageRenderer};
//!
//! let language = Language::new("en");
//! let mut args = MessageArgs::new();
//! args.insert("field".to_string(), "name".to_string());
//! args.insert("0".to_string(), "5".to_string());
//!
//! assert_eq!(
//!     language.render("validation", "minLength", &args),
//!     "The name field requires 5 or more characters in length."
//! );
//! ```

mod catalog;
mod format;
mod language;

pub use format::{format_message, MessageArgs};
pub use language::{Language, MessageRenderer, DEFAULT_LOCALE, VALIDATION_DOMAIN};

/// Built-in catalog entries, keyed by locale.
pub mod catalogs {
    pub use crate::catalog::{builtin, EN_VALIDATION, PT_BR_VALIDATION};
}
