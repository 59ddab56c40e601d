//! Placeholder formatting for message templates.

use std::collections::HashMap;

/// Arguments interpolated into a message template.
///
/// Keys are placeholder names without braces: `field`, `args`, `0`, `1`, ...
pub type MessageArgs = HashMap<String, String>;

/// Replace every `{name}` placeholder whose name is present in `args`.
///
/// Unknown placeholders and unbalanced braces are copied through unchanged.
/// Substitution is single-pass: a replacement value that itself contains a
/// placeholder is not expanded again.
pub fn format_message(template: &str, args: &MessageArgs) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let tail = &rest[open..];

        let Some(close) = tail[1..].find(|c: char| c == '{' || c == '}') else {
            result.push_str(tail);
            return result;
        };
        let close = close + 1;

        // A second '{' before any '}' means the first brace is literal.
        if tail.as_bytes()[close] == b'{' {
            result.push_str(&tail[..close]);
            rest = &tail[close..];
            continue;
        }

        let name = &tail[1..close];
        match args.get(name) {
            Some(value) => result.push_str(value),
            None => result.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }

    result.push_str(rest);
    result
}
