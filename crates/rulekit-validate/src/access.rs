//! Field path resolution against nested input data.
//!
//! A field path is a key optionally followed by bracketed segments, as
//! submitted by HTML forms: `user[address][city]`, `tags[0]`. Object
//! segments index by key, array segments by decimal index.

use serde_json::Value;

/// Resolve `path` against `data`.
///
/// Returns `None` when any segment is missing. A `null` value that exists
/// resolves to `Some(&Value::Null)`.
pub fn value<'a>(path: &str, data: &'a Value) -> Option<&'a Value> {
    segments(path)
        .into_iter()
        .try_fold(data, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Whether `path` resolves to any value, `null` included.
pub fn is_present(path: &str, data: &Value) -> bool {
    value(path, data).is_some()
}

/// Resolve `path` and coerce the value to a string if it is a scalar.
pub fn scalar(path: &str, data: &Value) -> Option<String> {
    value(path, data).and_then(scalar_string)
}

/// String form of a scalar value.
///
/// Strings are returned verbatim, numbers in their JSON form, `true` as `"1"`
/// and `false` as the empty string. `null`, arrays and objects are not
/// scalars.
pub fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("1".to_string()),
        Value::Bool(false) => Some(String::new()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Whether `value` counts as empty for the `empty` pseudo-rule.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Split a field path into its segments.
///
/// A path with unbalanced brackets is treated as a single literal key.
fn segments(path: &str) -> Vec<&str> {
    let Some(open) = path.find('[') else {
        return vec![path];
    };

    let mut result = vec![&path[..open]];
    let mut rest = &path[open..];

    while !rest.is_empty() {
        let Some(inner) = rest.strip_prefix('[') else {
            return vec![path];
        };
        let Some(close) = inner.find(']') else {
            return vec![path];
        };
        result.push(&inner[..close]);
        rest = &inner[close + 1..];
    }

    result
}
