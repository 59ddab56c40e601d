//! Fluent construction of rule specs.
//!
//! ```rust
//! use rulekit_validate::Rules;
//!
//! let spec = Rules::new().optional().min_length(5).in_list(&["a,b", "c"]);
//! assert_eq!(spec.to_string(), r"optional|minLength:5|in:a\,b,c");
//! ```
//!
//! Arguments are escaped so that any value, commas and pipes included,
//! reaches the predicate unchanged.

use crate::grammar::escape_spec_arg;
use crate::rules::{DEFAULT_DATETIME_FORMAT, SPECIAL_CHARACTERS};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered list of rule tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    rules: Vec<String>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens in the order they were added.
    pub fn tokens(&self) -> &[String] {
        &self.rules
    }

    fn push(mut self, name: &str) -> Self {
        self.rules.push(name.to_string());
        self
    }

    fn push_args<I, S>(mut self, name: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args
            .into_iter()
            .map(|arg| escape_spec_arg(arg.as_ref()))
            .collect();
        self.rules.push(format!("{name}:{}", args.join(",")));
        self
    }

    // Pseudo-rules

    pub fn optional(self) -> Self {
        self.push("optional")
    }

    pub fn blank(self) -> Self {
        self.push("blank")
    }

    pub fn null(self) -> Self {
        self.push("null")
    }

    pub fn empty(self) -> Self {
        self.push("empty")
    }

    // Character classes and formats

    pub fn alpha(self) -> Self {
        self.push("alpha")
    }

    pub fn number(self) -> Self {
        self.push("number")
    }

    pub fn alpha_number(self) -> Self {
        self.push("alphaNumber")
    }

    pub fn uuid(self) -> Self {
        self.push("uuid")
    }

    pub fn timezone(self) -> Self {
        self.push("timezone")
    }

    pub fn base64(self) -> Self {
        self.push("base64")
    }

    pub fn md5(self) -> Self {
        self.push("md5")
    }

    pub fn hex(self) -> Self {
        self.push("hex")
    }

    pub fn hex_color(self) -> Self {
        self.push("hexColor")
    }

    pub fn json(self) -> Self {
        self.push("json")
    }

    pub fn latin(self) -> Self {
        self.push("latin")
    }

    pub fn regex(self, pattern: &str) -> Self {
        self.push_args("regex", [pattern])
    }

    pub fn not_regex(self, pattern: &str) -> Self {
        self.push_args("notRegex", [pattern])
    }

    /// `0` accepts both IPv4 and IPv6.
    pub fn ip(self, version: u8) -> Self {
        self.push_args("ip", [version.to_string()])
    }

    pub fn url(self) -> Self {
        self.push("url")
    }

    /// Date/time in the `Y-m-d H:i:s` format.
    pub fn datetime(self) -> Self {
        self.datetime_format(DEFAULT_DATETIME_FORMAT)
    }

    pub fn datetime_format(self, format: &str) -> Self {
        self.push_args("datetime", [format])
    }

    pub fn email(self) -> Self {
        self.push("email")
    }

    // Cross-field and sets

    pub fn equals(self, field: &str) -> Self {
        self.push_args("equals", [field])
    }

    pub fn not_equals(self, field: &str) -> Self {
        self.push_args("notEquals", [field])
    }

    pub fn in_list(self, allowed: &[&str]) -> Self {
        self.push_args("in", allowed)
    }

    pub fn not_in_list(self, denied: &[&str]) -> Self {
        self.push_args("notIn", denied)
    }

    // Comparison

    pub fn between(self, min: impl fmt::Display, max: impl fmt::Display) -> Self {
        self.push_args("between", [min.to_string(), max.to_string()])
    }

    pub fn not_between(self, min: impl fmt::Display, max: impl fmt::Display) -> Self {
        self.push_args("notBetween", [min.to_string(), max.to_string()])
    }

    pub fn greater(self, than: impl fmt::Display) -> Self {
        self.push_args("greater", [than.to_string()])
    }

    pub fn greater_or_equal(self, to: impl fmt::Display) -> Self {
        self.push_args("greaterOrEqual", [to.to_string()])
    }

    pub fn less(self, than: impl fmt::Display) -> Self {
        self.push_args("less", [than.to_string()])
    }

    pub fn less_or_equal(self, to: impl fmt::Display) -> Self {
        self.push_args("lessOrEqual", [to.to_string()])
    }

    // Length

    pub fn max_length(self, length: usize) -> Self {
        self.push_args("maxLength", [length.to_string()])
    }

    pub fn min_length(self, length: usize) -> Self {
        self.push_args("minLength", [length.to_string()])
    }

    pub fn length(self, length: usize) -> Self {
        self.push_args("length", [length.to_string()])
    }

    // Presence and types

    pub fn required(self) -> Self {
        self.push("required")
    }

    pub fn isset(self) -> Self {
        self.push("isset")
    }

    pub fn array(self) -> Self {
        self.push("array")
    }

    pub fn bool(self) -> Self {
        self.push("bool")
    }

    pub fn float(self) -> Self {
        self.push("float")
    }

    pub fn int(self) -> Self {
        self.push("int")
    }

    pub fn object(self) -> Self {
        self.push("object")
    }

    pub fn string(self) -> Self {
        self.push("string")
    }

    /// At least `quantity` distinct characters from the OWASP special
    /// character list.
    pub fn special_char(self, quantity: usize) -> Self {
        self.special_char_from(quantity, SPECIAL_CHARACTERS)
    }

    pub fn special_char_from(self, quantity: usize, characters: &str) -> Self {
        self.push_args("specialChar", [quantity.to_string(), characters.to_string()])
    }

    // Uploads

    pub fn uploaded(self) -> Self {
        self.push("uploaded")
    }

    /// Maximum size in kilobytes.
    pub fn max_size(self, kilobytes: u64) -> Self {
        self.push_args("maxSize", [kilobytes.to_string()])
    }

    pub fn mimes(self, allowed: &[&str]) -> Self {
        self.push_args("mimes", allowed)
    }

    pub fn ext(self, allowed: &[&str]) -> Self {
        self.push_args("ext", allowed)
    }

    pub fn image(self) -> Self {
        self.push("image")
    }

    pub fn max_dim(self, width: u32, height: u32) -> Self {
        self.push_args("maxDim", [width.to_string(), height.to_string()])
    }

    pub fn min_dim(self, width: u32, height: u32) -> Self {
        self.push_args("minDim", [width.to_string(), height.to_string()])
    }

    pub fn dim(self, width: u32, height: u32) -> Self {
        self.push_args("dim", [width.to_string(), height.to_string()])
    }
}

impl fmt::Display for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rules.join("|"))
    }
}

impl From<Rules> for String {
    fn from(rules: Rules) -> Self {
        rules.to_string()
    }
}

impl From<&Rules> for String {
    fn from(rules: &Rules) -> Self {
        rules.to_string()
    }
}
