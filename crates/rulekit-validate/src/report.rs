//! Per-run validation results.

use crate::grammar::ParsedRule;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The single failure recorded for a field: the rule that failed and the
/// arguments it ran with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub rule: String,
    pub args: Vec<String>,
}

impl ErrorRecord {
    pub fn new<I, S>(rule: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rule: rule.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<ParsedRule> for ErrorRecord {
    fn from(rule: ParsedRule) -> Self {
        Self {
            rule: rule.name,
            args: rule.args,
        }
    }
}

/// Outcome of one validation run.
///
/// Holds at most one [`ErrorRecord`] per field, in evaluation order. A
/// report without errors passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    errors: IndexMap<String, ErrorRecord>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &IndexMap<String, ErrorRecord> {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&ErrorRecord> {
        self.errors.get(field)
    }

    /// Fields that failed, in evaluation order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a failure, replacing any earlier one for the same field.
    pub fn insert(&mut self, field: impl Into<String>, record: ErrorRecord) {
        self.errors.insert(field.into(), record);
    }

    pub fn into_errors(self) -> IndexMap<String, ErrorRecord> {
        self.errors
    }
}
