//! # rulekit validate
//!
//! Declarative, string-based data validation. Each field gets a compact rule
//! spec such as `"required|minLength:5"`; the engine evaluates it against
//! JSON-like input and produces a pass/fail result plus a localized message
//! per failing field.
//!
//! ## Example
//!
//! ```rust
//! use rulekit_validate::prelude::*;
//! use serde_json::json;
//!
//! let mut validation = Validation::new();
//! validation
//!     .set_rule("name", "required|minLength:5")
//!     .set_rule("email", Rules::new().optional().email())
//!     .set_label("name", "Name");
//!
//! let data = json!({ "name": "Ada" });
//! assert!(!validation.validate(&data).unwrap());
//! assert_eq!(
//!     validation.error("name").unwrap(),
//!     "The Name field requires 5 or more characters in length."
//! );
//! ```
//!
//! ## Rule spec syntax
//!
//! - Rules are separated by `|`, arguments follow the first `:` and are
//!   separated by `,`
//! - `\|` and `\,` escape the delimiters inside arguments
//! - An argument written as `{key}` is replaced by the top-level `data[key]`
//! - `optional`, `blank`, `null` and `empty` let a field pass early
//!
//! ## Errors
//!
//! A failing rule is recorded per field and never returned as an error. A
//! [`ValidationError`] means the rule setup itself is broken (unknown rule,
//! bad argument, invalid pattern) and aborts the run.

pub mod access;
mod builder;
mod config;
mod error;
pub mod grammar;
mod registry;
mod report;
pub mod rules;
mod validation;

pub use builder::Rules;
pub use config::{ConfigError, ValidationConfig, FALLBACK_LOCALE_VAR, LOCALE_VAR};
pub use error::{Result, ValidationError};
pub use grammar::{extract_rules, parse_rule, ParsedRule};
pub use registry::{
    PredicateFn, PredicateTable, RuleSource, Validators, ValidatorsBuilder, PSEUDO_RULES,
};
pub use report::{ErrorRecord, Report};
pub use rules::{BaseRules, FileRules, RuleCall, UploadError, UploadedFile, UploadedFiles};
pub use validation::{FieldRuleset, RuleDescription, Validation};

/// Prelude module for validation
pub mod prelude {
    pub use crate::builder::Rules;
    pub use crate::error::ValidationError;
    pub use crate::registry::{PredicateTable, RuleSource, Validators};
    pub use crate::report::Report;
    pub use crate::rules::{RuleCall, UploadedFile, UploadedFiles};
    pub use crate::validation::Validation;
}
