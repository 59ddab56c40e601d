//! # rulekit
//!
//! Declarative, string-based data validation.
//!
//! Describe each field with a compact rule spec and validate JSON-like input
//! against it. Failing fields get a localized, parameterized message.
//!
//! ## Quick Start
//!
//! ```rust
//! use rulekit::prelude::*;
//!
//! let mut validation = Validation::new();
//! validation
//!     .set_rule("username", "required|alphaNumber|length:8")
//!     .set_rule("age", Rules::new().optional().int().between(18, 120))
//!     .set_label("username", "Username");
//!
//! let data = json!({ "username": "ada", "age": 36 });
//! assert!(!validation.validate(&data).unwrap());
//! assert_eq!(
//!     validation.errors()["username"],
//!     "The Username field requires exactly 8 characters in length."
//! );
//! ```
//!
//! ## Crates
//!
//! - [`validate`] - rule grammar, predicate library, registry and engine
//! - [`i18n`] - message catalogs and the [`MessageRenderer`](i18n::MessageRenderer) trait

pub use rulekit_i18n as i18n;
pub use rulekit_validate as validate;

pub use rulekit_validate::{
    ConfigError, ErrorRecord, FieldRuleset, ParsedRule, PredicateTable, Report, Result, RuleCall,
    RuleDescription, RuleSource, Rules, UploadError, UploadedFile, UploadedFiles, Validation,
    ValidationConfig, ValidationError, Validators,
};

/// Prelude module - import everything you need with `use rulekit::prelude::*`
pub mod prelude {
    pub use rulekit_i18n::{Language, MessageArgs, MessageRenderer};
    pub use rulekit_validate::prelude::*;
    pub use rulekit_validate::{ErrorRecord, ValidationConfig};

    // Re-export commonly used external types
    pub use serde_json::{json, Value};
}
