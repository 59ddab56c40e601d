//! General purpose predicates.

use super::datetime;
use super::{compare, is_numeric, RuleCall};
use crate::access;
use crate::error::{Result, ValidationError};
use crate::registry::RuleSource;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::OnceLock;
use validator::ValidateEmail;

/// Default character set of the `specialChar` rule (OWASP password special
/// characters).
pub const SPECIAL_CHARACTERS: &str = r##"!"#$%&'()*+,-./:;=<>?@[\]^_`{|}~"##;

type Predicate = fn(&RuleCall<'_>) -> Result<bool>;

const PREDICATES: &[(&str, Predicate)] = &[
    ("alpha", alpha),
    ("number", number),
    ("alphaNumber", alpha_number),
    ("uuid", uuid),
    ("timezone", timezone),
    ("base64", base64),
    ("md5", md5),
    ("hex", hex),
    ("hexColor", hex_color),
    ("json", json),
    ("regex", regex),
    ("notRegex", not_regex),
    ("equals", equals),
    ("notEquals", not_equals),
    ("between", between),
    ("notBetween", not_between),
    ("in", in_list),
    ("notIn", not_in_list),
    ("ip", ip),
    ("url", url),
    ("datetime", datetime),
    ("email", email),
    ("greater", greater),
    ("greaterOrEqual", greater_or_equal),
    ("less", less),
    ("lessOrEqual", less_or_equal),
    ("latin", latin),
    ("maxLength", max_length),
    ("minLength", min_length),
    ("length", length),
    ("required", required),
    ("isset", isset),
    ("array", array),
    ("bool", bool),
    ("float", float),
    ("int", int),
    ("object", object),
    ("string", string),
    ("specialChar", special_char),
];

fn table() -> &'static HashMap<&'static str, Predicate> {
    static TABLE: OnceLock<HashMap<&'static str, Predicate>> = OnceLock::new();
    TABLE.get_or_init(|| PREDICATES.iter().copied().collect())
}

/// The built-in predicate library.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseRules;

impl BaseRules {
    pub const NAME: &'static str = "base";
}

impl RuleSource for BaseRules {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn rule_names(&self) -> Vec<&str> {
        PREDICATES.iter().map(|(name, _)| *name).collect()
    }

    fn has_rule(&self, rule: &str) -> bool {
        table().contains_key(rule)
    }

    fn call(&self, call: &RuleCall<'_>) -> Option<Result<bool>> {
        table().get(call.rule).map(|predicate| predicate(call))
    }
}

// Pre-compiled regex patterns

fn uuid_regex() -> &'static Regex {
    static UUID_REGEX: OnceLock<Regex> = OnceLock::new();
    UUID_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}$")
            .unwrap()
    })
}

fn md5_regex() -> &'static Regex {
    static MD5_REGEX: OnceLock<Regex> = OnceLock::new();
    MD5_REGEX.get_or_init(|| Regex::new(r"^[a-f0-9]{32}$").unwrap())
}

fn hex_color_regex() -> &'static Regex {
    static HEX_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
    HEX_COLOR_REGEX.get_or_init(|| Regex::new(r"^#(?:[0-9A-Fa-f]{3}){1,2}$").unwrap())
}

fn latin_regex() -> &'static Regex {
    static LATIN_REGEX: OnceLock<Regex> = OnceLock::new();
    LATIN_REGEX.get_or_init(|| Regex::new(r"^\p{Latin}+$").unwrap())
}

fn url_prefix_regex() -> &'static Regex {
    static URL_PREFIX_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_PREFIX_REGEX.get_or_init(|| Regex::new(r"^(?s)(?:([^:]*):)?//(.+)$").unwrap())
}

// Character classes

fn alpha(call: &RuleCall<'_>) -> Result<bool> {
    Ok(call
        .scalar()
        .is_some_and(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_alphabetic())))
}

fn number(call: &RuleCall<'_>) -> Result<bool> {
    Ok(call.scalar().is_some_and(|v| is_numeric(&v)))
}

fn alpha_number(call: &RuleCall<'_>) -> Result<bool> {
    Ok(call
        .scalar()
        .is_some_and(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_alphanumeric())))
}

fn hex(call: &RuleCall<'_>) -> Result<bool> {
    Ok(call
        .scalar()
        .is_some_and(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_hexdigit())))
}

fn latin(call: &RuleCall<'_>) -> Result<bool> {
    Ok(call.scalar().is_some_and(|v| latin_regex().is_match(&v)))
}

// Formats

fn uuid(call: &RuleCall<'_>) -> Result<bool> {
    let Some(value) = call.scalar() else {
        return Ok(false);
    };
    if !uuid_regex().is_match(&value) {
        return Ok(false);
    }
    Ok(uuid::Uuid::parse_str(&value).is_ok_and(|id| !id.is_nil()))
}

/// Any IANA tz database name, including backward-compatible links such as
/// `US/Eastern`.
fn timezone(call: &RuleCall<'_>) -> Result<bool> {
    Ok(call
        .scalar()
        .is_some_and(|v| v.parse::<chrono_tz::Tz>().is_ok()))
}

fn base64(call: &RuleCall<'_>) -> Result<bool> {
    let Some(value) = call.scalar() else {
        return Ok(false);
    };
    match STANDARD.decode(&value) {
        Ok(decoded) if !decoded.is_empty() => Ok(STANDARD.encode(decoded) == value),
        _ => Ok(false),
    }
}

fn md5(call: &RuleCall<'_>) -> Result<bool> {
    Ok(call.scalar().is_some_and(|v| md5_regex().is_match(&v)))
}

fn hex_color(call: &RuleCall<'_>) -> Result<bool> {
    Ok(call.scalar().is_some_and(|v| hex_color_regex().is_match(&v)))
}

fn json(call: &RuleCall<'_>) -> Result<bool> {
    Ok(call
        .scalar()
        .is_some_and(|v| serde_json::from_str::<Value>(&v).is_ok()))
}

fn datetime(call: &RuleCall<'_>) -> Result<bool> {
    let format = call.arg_or(0, datetime::DEFAULT_FORMAT);
    Ok(call
        .scalar()
        .is_some_and(|v| datetime::matches_format(&v, format)))
}

fn ip(call: &RuleCall<'_>) -> Result<bool> {
    let version = call.int_arg_or(0, 0)?;
    if !matches!(version, 0 | 4 | 6) {
        return Err(call.invalid(format!("Invalid IP Version: {version}")));
    }
    let Some(value) = call.scalar() else {
        return Ok(false);
    };
    Ok(match version {
        4 => value.parse::<Ipv4Addr>().is_ok(),
        6 => value.parse::<Ipv6Addr>().is_ok(),
        _ => value.parse::<IpAddr>().is_ok(),
    })
}

fn url(call: &RuleCall<'_>) -> Result<bool> {
    let Some(value) = call.scalar() else {
        return Ok(false);
    };
    let rest = match url_prefix_regex().captures(&value) {
        Some(captures) => {
            let scheme = captures.get(1).map_or("", |m| m.as_str());
            if scheme != "http" && scheme != "https" {
                return Ok(false);
            }
            captures.get(2).map_or("", |m| m.as_str()).to_string()
        }
        None => value.clone(),
    };
    if rest.chars().any(char::is_whitespace) {
        return Ok(false);
    }
    Ok(url::Url::parse(&format!("http://{rest}"))
        .is_ok_and(|parsed| parsed.host_str().is_some_and(|host| !host.is_empty())))
}

fn email(call: &RuleCall<'_>) -> Result<bool> {
    Ok(call.scalar().is_some_and(|v| v.validate_email()))
}

fn regex(call: &RuleCall<'_>) -> Result<bool> {
    let pattern = call.arg(0)?;
    let compiled = Regex::new(pattern).map_err(|source| ValidationError::InvalidPattern {
        field: call.field.to_string(),
        pattern: pattern.to_string(),
        source,
    })?;
    Ok(call.scalar().is_some_and(|v| compiled.is_match(&v)))
}

fn not_regex(call: &RuleCall<'_>) -> Result<bool> {
    regex(call).map(|matched| !matched)
}

// Cross-field and set membership

fn equals(call: &RuleCall<'_>) -> Result<bool> {
    let other = call.arg(0)?;
    let (Some(value), Some(other)) = (call.scalar(), access::scalar(other, call.data)) else {
        return Ok(false);
    };
    Ok(value == other)
}

fn not_equals(call: &RuleCall<'_>) -> Result<bool> {
    equals(call).map(|equal| !equal)
}

fn in_list(call: &RuleCall<'_>) -> Result<bool> {
    call.arg(0)?;
    Ok(call
        .scalar()
        .is_some_and(|v| call.args.iter().any(|allowed| *allowed == v)))
}

fn not_in_list(call: &RuleCall<'_>) -> Result<bool> {
    in_list(call).map(|found| !found)
}

// Ordinal comparison

fn compare_with(call: &RuleCall<'_>, accept: fn(Ordering) -> bool) -> Result<bool> {
    let operand = call.arg(0)?;
    Ok(call.scalar().is_some_and(|v| accept(compare(&v, operand))))
}

fn between(call: &RuleCall<'_>) -> Result<bool> {
    let min = call.arg(0)?;
    let max = call.arg(1)?;
    Ok(call.scalar().is_some_and(|v| {
        compare(&v, min) != Ordering::Less && compare(&v, max) != Ordering::Greater
    }))
}

fn not_between(call: &RuleCall<'_>) -> Result<bool> {
    between(call).map(|inside| !inside)
}

fn greater(call: &RuleCall<'_>) -> Result<bool> {
    compare_with(call, Ordering::is_gt)
}

fn greater_or_equal(call: &RuleCall<'_>) -> Result<bool> {
    compare_with(call, Ordering::is_ge)
}

fn less(call: &RuleCall<'_>) -> Result<bool> {
    compare_with(call, Ordering::is_lt)
}

fn less_or_equal(call: &RuleCall<'_>) -> Result<bool> {
    compare_with(call, Ordering::is_le)
}

// Length

fn char_length(call: &RuleCall<'_>) -> Option<i64> {
    call.scalar().map(|v| v.chars().count() as i64)
}

fn max_length(call: &RuleCall<'_>) -> Result<bool> {
    let max = call.int_arg(0)?;
    Ok(char_length(call).is_some_and(|len| len <= max))
}

fn min_length(call: &RuleCall<'_>) -> Result<bool> {
    let min = call.int_arg(0)?;
    Ok(char_length(call).is_some_and(|len| len >= min))
}

fn length(call: &RuleCall<'_>) -> Result<bool> {
    let exact = call.int_arg(0)?;
    Ok(char_length(call).is_some_and(|len| len == exact))
}

// Presence

/// Characters stripped before the `required` emptiness check.
const BLANK_CHARACTERS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

fn required(call: &RuleCall<'_>) -> Result<bool> {
    Ok(call
        .scalar()
        .is_some_and(|v| !v.trim_matches(BLANK_CHARACTERS).is_empty()))
}

fn isset(call: &RuleCall<'_>) -> Result<bool> {
    Ok(call.scalar().is_some())
}

// Raw types

fn array(call: &RuleCall<'_>) -> Result<bool> {
    Ok(matches!(call.value(), Some(Value::Array(_))))
}

fn bool(call: &RuleCall<'_>) -> Result<bool> {
    Ok(matches!(call.value(), Some(Value::Bool(_))))
}

fn float(call: &RuleCall<'_>) -> Result<bool> {
    Ok(matches!(call.value(), Some(Value::Number(n)) if n.is_f64()))
}

fn int(call: &RuleCall<'_>) -> Result<bool> {
    Ok(matches!(call.value(), Some(Value::Number(n)) if n.is_i64() || n.is_u64()))
}

fn object(call: &RuleCall<'_>) -> Result<bool> {
    Ok(matches!(call.value(), Some(Value::Object(_))))
}

fn string(call: &RuleCall<'_>) -> Result<bool> {
    Ok(matches!(call.value(), Some(Value::String(_))))
}

fn special_char(call: &RuleCall<'_>) -> Result<bool> {
    let quantity = call.int_arg_or(0, 1)?;
    if quantity < 1 {
        return Err(call.invalid("Special characters quantity must be greater than 0"));
    }
    let characters = call.arg_or(1, SPECIAL_CHARACTERS);
    let Some(value) = call.scalar() else {
        return Ok(false);
    };

    let mut seen = Vec::new();
    let mut found = 0;
    for c in characters.chars() {
        if seen.contains(&c) {
            continue;
        }
        seen.push(c);
        if value.contains(c) {
            found += 1;
            if found == quantity {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
