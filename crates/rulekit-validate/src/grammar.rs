//! Rule-spec grammar.
//!
//! A rule spec is a `|`-separated list of rules. Each rule is a name,
//! optionally followed by `:` and a `,`-separated argument list:
//!
//! ```text
//! required|minLength:5|in:a,b\,c
//! ```
//!
//! A delimiter preceded by a backslash is not a split point. `\|` is
//! unescaped when the spec is split into rules and `\,` when a rule's
//! arguments are split. Unescaping is single-pass, so `\\,` becomes `\,`.
//! Only the first `:` separates the name from its arguments; later colons
//! belong to the arguments.
//!
//! Parsing never fails. Unknown rule names are reported when the rule is
//! evaluated.

use serde::{Deserialize, Serialize};
use std::fmt;

const RULE_DELIMITER: char = '|';
const ARG_DELIMITER: char = ',';
const NAME_DELIMITER: char = ':';
const ESCAPE: char = '\\';

/// A single parsed rule: its name and raw string arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParsedRule {
    /// Predicate name, matched case-sensitively
    pub name: String,
    /// Unescaped, unconverted arguments
    #[serde(default)]
    pub args: Vec<String>,
}

impl ParsedRule {
    /// Create a parsed rule.
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a rule without arguments.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }
}

impl fmt::Display for ParsedRule {
    /// Serializes back to rule-spec syntax, escaping commas in arguments.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.args.is_empty() {
            return Ok(());
        }
        let args: Vec<String> = self.args.iter().map(|arg| escape_arg(arg)).collect();
        write!(f, "{}{}", NAME_DELIMITER, args.join(","))
    }
}

/// Split a full rule spec into parsed rules.
pub fn extract_rules(spec: &str) -> Vec<ParsedRule> {
    split_unescaped(spec, RULE_DELIMITER)
        .into_iter()
        .map(|token| parse_rule(&unescape(token, RULE_DELIMITER)))
        .collect()
}

/// Parse a single rule token into its name and arguments.
pub fn parse_rule(token: &str) -> ParsedRule {
    match token.split_once(NAME_DELIMITER) {
        Some((name, blob)) => ParsedRule {
            name: name.to_string(),
            args: split_unescaped(blob, ARG_DELIMITER)
                .into_iter()
                .map(|arg| unescape(arg, ARG_DELIMITER))
                .collect(),
        },
        None => ParsedRule::named(token),
    }
}

/// Escape commas so `arg` survives as a single rule argument.
pub fn escape_arg(arg: &str) -> String {
    arg.replace(ARG_DELIMITER, "\\,")
}

/// Escape commas and pipes so `arg` survives a full rule-spec round trip.
pub fn escape_spec_arg(arg: &str) -> String {
    escape_arg(arg).replace(RULE_DELIMITER, "\\|")
}

/// Split on `delimiter` wherever it is not directly preceded by a backslash.
///
/// Always yields at least one (possibly empty) piece.
fn split_unescaped(input: &str, delimiter: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut previous = None;

    for (index, c) in input.char_indices() {
        if c == delimiter && previous != Some(ESCAPE) {
            pieces.push(&input[start..index]);
            start = index + c.len_utf8();
        }
        previous = Some(c);
    }

    pieces.push(&input[start..]);
    pieces
}

/// Replace each `\<delimiter>` with `<delimiter>`, scanning left to right once.
fn unescape(input: &str, delimiter: char) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ESCAPE && chars.peek() == Some(&delimiter) {
            result.push(delimiter);
            chars.next();
        } else {
            result.push(c);
        }
    }

    result
}
