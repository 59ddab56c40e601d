//! Date/time format checks using the PHP-style token alphabet common in form
//! validation (`Y-m-d H:i:s`).

use chrono::format::{parse, ParseResult, Parsed, StrftimeItems};
use std::fmt::Write;

/// Default format of the `datetime` rule.
pub const DEFAULT_FORMAT: &str = "Y-m-d H:i:s";

/// Translate a PHP-style date format into a chrono strftime format.
///
/// Returns `None` when the format uses a token that has no chrono
/// equivalent.
pub fn to_strftime(format: &str) -> Option<String> {
    let mut result = String::with_capacity(format.len() * 2);
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        let item = match c {
            '\\' => {
                match chars.next() {
                    Some('%') => result.push_str("%%"),
                    Some(literal) => result.push(literal),
                    None => result.push('\\'),
                }
                continue;
            }
            'd' => "%d",
            'j' => "%-d",
            'D' => "%a",
            'l' => "%A",
            'N' => "%u",
            'w' => "%w",
            'z' => "%-j",
            'm' => "%m",
            'n' => "%-m",
            'M' => "%b",
            'F' => "%B",
            'Y' => "%Y",
            'y' => "%y",
            'a' => "%P",
            'A' => "%p",
            'g' => "%-I",
            'h' => "%I",
            'G' => "%-H",
            'H' => "%H",
            'i' => "%M",
            's' => "%S",
            'v' => "%3f",
            'u' => "%6f",
            'U' => "%s",
            'O' => "%z",
            'P' => "%:z",
            '%' => "%%",
            'e' | 'T' | 'I' | 'B' | 'L' | 'o' | 'W' | 't' | 'S' | 'Z' | 'c' | 'r' | 'p' => {
                return None
            }
            literal => {
                result.push(literal);
                continue;
            }
        };
        result.push_str(item);
    }

    Some(result)
}

/// Whether `value` parses under `format` and formats back to exactly `value`.
///
/// Components the format does not mention default to 1970-01-01 00:00:00.
pub fn matches_format(value: &str, format: &str) -> bool {
    let Some(strftime) = to_strftime(format) else {
        tracing::debug!(format, "Unsupported datetime format token");
        return false;
    };

    let mut parsed = Parsed::new();
    if parse(&mut parsed, value, StrftimeItems::new(&strftime)).is_err() {
        return false;
    }
    if fill_defaults(&mut parsed).is_err() {
        return false;
    }

    let formatted = match parsed.offset() {
        Some(_) => parsed
            .to_datetime()
            .ok()
            .and_then(|datetime| reformat(datetime.format(&strftime))),
        None => parsed
            .to_naive_datetime_with_offset(0)
            .ok()
            .and_then(|datetime| reformat(datetime.format(&strftime))),
    };
    formatted.as_deref() == Some(value)
}

fn fill_defaults(parsed: &mut Parsed) -> ParseResult<()> {
    if parsed.timestamp().is_some() {
        return Ok(());
    }

    let has_year = parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some()
        || parsed.isoyear().is_some();
    if !has_year {
        parsed.set_year(1970)?;
    }

    let has_week = parsed.isoweek().is_some()
        || parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some();
    if parsed.ordinal().is_none() && !has_week {
        if parsed.month().is_none() {
            parsed.set_month(1)?;
        }
        if parsed.day().is_none() {
            parsed.set_day(1)?;
        }
    }

    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        (None, Some(_)) => parsed.set_ampm(false)?,
        (Some(_), None) => parsed.set_hour12(12)?,
        (Some(_), Some(_)) => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    if parsed.second().is_none() {
        parsed.set_second(0)?;
    }
    Ok(())
}

/// Render a delayed format, `None` if it asks for fields the value lacks.
fn reformat(formatted: impl std::fmt::Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{formatted}").ok()?;
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_default_format() {
        assert_eq!(to_strftime(DEFAULT_FORMAT).as_deref(), Some("%Y-%m-%d %H:%M:%S"));
        assert_eq!(to_strftime(r"d/m/Y \a\t H").as_deref(), Some("%d/%m/%Y at %H"));
        assert_eq!(to_strftime("e"), None);
    }

    #[test]
    fn default_format() {
        assert!(matches_format("2024-02-29 13:45:00", DEFAULT_FORMAT));
        assert!(!matches_format("2023-02-29 13:45:00", DEFAULT_FORMAT));
        assert!(!matches_format("2024-02-29", DEFAULT_FORMAT));
        assert!(!matches_format("2024-2-29 13:45:00", DEFAULT_FORMAT));
    }

    #[test]
    fn date_and_time_only_formats() {
        assert!(matches_format("2024-01-31", "Y-m-d"));
        assert!(!matches_format("2024-01-32", "Y-m-d"));
        assert!(matches_format("23:59", "H:i"));
        assert!(!matches_format("24:00", "H:i"));
        assert!(matches_format("5/1/2024", "j/n/Y"));
    }

    #[test]
    fn partial_formats_fill_missing_components() {
        assert!(matches_format("2024-05", "Y-m"));
        assert!(!matches_format("2024-13", "Y-m"));
        assert!(!matches_format("2024-5", "Y-m"));
        assert!(matches_format("05/2024", "m/Y"));
        assert!(matches_format("2024", "Y"));
        assert!(!matches_format("24", "Y"));
        assert!(matches_format("10", "H"));
        assert!(!matches_format("25", "H"));
        assert!(matches_format("07:30 pm", "h:i a"));
        assert!(matches_format("31", "d"));
    }

    #[test]
    fn offsets_round_trip() {
        assert!(matches_format("2024-05-01 10:00:00 +0200", "Y-m-d H:i:s O"));
        assert!(matches_format("2024-05-01T10:00:00+02:00", r"Y-m-d\TH:i:sP"));
    }
}
