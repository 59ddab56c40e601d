//! Built-in predicate sources.
//!
//! [`BaseRules`] holds the general purpose predicates, [`FileRules`] the
//! upload checks. Both are plain [`RuleSource`](crate::RuleSource)s and can
//! be combined with custom sources in a [`Validators`](crate::Validators)
//! registry.

mod base;
mod datetime;
mod files;

pub use base::{BaseRules, SPECIAL_CHARACTERS};
pub use datetime::DEFAULT_FORMAT as DEFAULT_DATETIME_FORMAT;
pub use files::{FileRules, UploadError, UploadedFile, UploadedFiles};

use crate::access;
use crate::error::{Result, ValidationError};
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::OnceLock;

/// One predicate invocation: the rule being evaluated, the field it runs on,
/// the full input data and the rule's arguments after placeholder
/// substitution.
#[derive(Debug, Clone, Copy)]
pub struct RuleCall<'a> {
    pub rule: &'a str,
    pub field: &'a str,
    pub data: &'a Value,
    pub args: &'a [String],
}

impl<'a> RuleCall<'a> {
    pub fn new(rule: &'a str, field: &'a str, data: &'a Value, args: &'a [String]) -> Self {
        Self {
            rule,
            field,
            data,
            args,
        }
    }

    /// Raw value of the field, before string coercion.
    pub fn value(&self) -> Option<&'a Value> {
        access::value(self.field, self.data)
    }

    /// Field value coerced to a string, `None` if absent or not a scalar.
    pub fn scalar(&self) -> Option<String> {
        access::scalar(self.field, self.data)
    }

    /// Required argument at `index`.
    pub fn arg(&self, index: usize) -> Result<&'a str> {
        self.args
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.invalid(format!("missing argument #{}", index + 1)))
    }

    /// Optional argument at `index`.
    pub fn arg_or(&self, index: usize, default: &'a str) -> &'a str {
        self.args.get(index).map(String::as_str).unwrap_or(default)
    }

    /// Required integer argument at `index`.
    pub fn int_arg(&self, index: usize) -> Result<i64> {
        let raw = self.arg(index)?;
        self.parse_int(raw)
    }

    /// Optional integer argument at `index`.
    pub fn int_arg_or(&self, index: usize, default: i64) -> Result<i64> {
        match self.args.get(index) {
            Some(raw) => self.parse_int(raw),
            None => Ok(default),
        }
    }

    /// Build a configuration error for this call.
    pub fn invalid(&self, reason: impl Into<String>) -> ValidationError {
        ValidationError::invalid_argument(self.rule, self.field, reason)
    }

    fn parse_int(&self, raw: &str) -> Result<i64> {
        raw.trim()
            .parse()
            .map_err(|_| self.invalid(format!("expected an integer, got '{raw}'")))
    }
}

/// Whitespace allowed around numeric strings.
const NUMERIC_WHITESPACE: &[char] = &[' ', '\t', '\n', '\r', '\x0B', '\x0C'];

fn numeric_regex() -> &'static regex::Regex {
    static NUMERIC_REGEX: OnceLock<regex::Regex> = OnceLock::new();
    NUMERIC_REGEX.get_or_init(|| {
        regex::Regex::new(
            r"^[ \t\n\r\x0B\x0C]*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?[ \t\n\r\x0B\x0C]*$",
        )
        .unwrap()
    })
}

/// Whether `value` is a numeric string: optional surrounding ASCII
/// whitespace, sign, digits with an optional decimal part, optional exponent.
pub fn is_numeric(value: &str) -> bool {
    numeric_regex().is_match(value)
}

/// Compare two operands numerically when both are numeric strings,
/// otherwise byte-wise. Integer operands compare exactly.
pub fn compare(left: &str, right: &str) -> Ordering {
    if is_numeric(left) && is_numeric(right) {
        let (left, right) = (
            left.trim_matches(NUMERIC_WHITESPACE),
            right.trim_matches(NUMERIC_WHITESPACE),
        );
        if let (Some(l), Some(r)) = (parse_integer(left), parse_integer(right)) {
            return l.cmp(&r);
        }
        if let (Ok(l), Ok(r)) = (left.parse::<f64>(), right.parse::<f64>()) {
            return l.partial_cmp(&r).unwrap_or(Ordering::Equal);
        }
    }
    left.cmp(right)
}

fn parse_integer(value: &str) -> Option<i128> {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_strings() {
        for numeric in ["1", "-1", "+1.5", "1.", ".5", "1e3", "2.5E-3", " 42 "] {
            assert!(is_numeric(numeric), "{numeric}");
        }
        for other in ["", ".", "abc", "1a", "0x1A", "1e", "- 1", "\u{a0}1"] {
            assert!(!is_numeric(other), "{other}");
        }
    }

    #[test]
    fn numeric_comparison() {
        assert_eq!(compare("10", "9"), Ordering::Greater);
        assert_eq!(compare("1e2", "100"), Ordering::Equal);
        assert_eq!(compare("-5", "3"), Ordering::Less);
    }

    #[test]
    fn integer_comparison_is_exact() {
        assert_eq!(
            compare("9007199254740993", "9007199254740992"),
            Ordering::Greater
        );
        assert_eq!(
            compare("-9223372036854775808", "-9223372036854775807"),
            Ordering::Less
        );
        assert_eq!(compare("+7", " 7 "), Ordering::Equal);
        assert_eq!(compare("10", "9.5"), Ordering::Greater);
    }

    #[test]
    fn lexical_comparison() {
        assert_eq!(compare("10", "9a"), Ordering::Less);
        assert_eq!(compare("b", "a"), Ordering::Greater);
        assert_eq!(compare("abc", "abc"), Ordering::Equal);
    }

    #[test]
    fn rule_call_arguments() {
        let data = json!({});
        let args = vec!["5".to_string(), "x".to_string()];
        let call = RuleCall::new("minLength", "name", &data, &args);

        assert_eq!(call.int_arg(0).unwrap(), 5);
        assert_eq!(call.int_arg_or(2, 7).unwrap(), 7);
        assert_eq!(call.arg_or(3, "d"), "d");
        assert!(matches!(
            call.int_arg(1),
            Err(ValidationError::InvalidArgument { .. })
        ));
        assert!(call.arg(2).is_err());
    }
}
