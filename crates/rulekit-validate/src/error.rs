//! Error types for rule configuration mistakes.
//!
//! A failing predicate is not an error: it becomes an
//! [`ErrorRecord`](crate::ErrorRecord) on the report. The variants here abort
//! the whole validation run because they point at a broken rule setup.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Validation rule '{rule}' not found on field '{field}'")]
    UnknownRule { rule: String, field: String },

    #[error("Invalid argument for rule '{rule}' on field '{field}': {reason}")]
    InvalidArgument {
        rule: String,
        field: String,
        reason: String,
    },

    #[error("Invalid regex pattern '{pattern}' on field '{field}': {source}")]
    InvalidPattern {
        field: String,
        pattern: String,
        source: regex::Error,
    },
}

impl ValidationError {
    /// Create an unknown rule error.
    pub fn unknown_rule(rule: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownRule {
            rule: rule.into(),
            field: field.into(),
        }
    }

    /// Create an invalid argument error.
    pub fn invalid_argument(
        rule: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            rule: rule.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the rule that caused the error, when known.
    pub fn rule(&self) -> Option<&str> {
        match self {
            Self::UnknownRule { rule, .. } | Self::InvalidArgument { rule, .. } => Some(rule),
            Self::InvalidPattern { .. } => None,
        }
    }

    /// Field whose rules caused the error.
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownRule { field, .. }
            | Self::InvalidArgument { field, .. }
            | Self::InvalidPattern { field, .. } => field,
        }
    }
}

pub type Result<T, E = ValidationError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_rule_message() {
        let error = ValidationError::unknown_rule("foo", "name");
        assert_eq!(
            error.to_string(),
            "Validation rule 'foo' not found on field 'name'"
        );
        assert_eq!(error.rule(), Some("foo"));
        assert_eq!(error.field(), "name");
    }

    #[test]
    fn invalid_argument_message() {
        let error = ValidationError::invalid_argument("ip", "addr", "Invalid IP Version: 5");
        assert_eq!(
            error.to_string(),
            "Invalid argument for rule 'ip' on field 'addr': Invalid IP Version: 5"
        );
    }

    #[test]
    fn invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let error = ValidationError::InvalidPattern {
            field: "code".to_string(),
            pattern: "(".to_string(),
            source,
        };
        assert!(std::error::Error::source(&error).is_some());
        assert_eq!(error.field(), "code");
        assert_eq!(error.rule(), None);
    }
}
