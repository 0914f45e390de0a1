//! Front-matter: the `key: value` block at the top of a post.
//!
//! Two layouts are accepted:
//!
//! ```text
//! ---                          title: Hello
//! title: Hello                 date: 2024-01-15
//! date: 2024-01-15
//! ---                          Body starts after the first blank line.
//! Body...
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

lazy_static! {
    static ref META_LINE: Regex = Regex::new(r"^([A-Za-z_][A-Za-z0-9_-]*)\s*:\s*(.*)$").unwrap();
}

const FENCE: &str = "---";

/// Date+time layouts tried after RFC 3339, in order.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Date-only layouts tried last, in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%B %d, %Y", "%d %B %Y"];

/// Sort key for posts whose date could not be parsed; sorts after every real date.
pub const UNKNOWN_DATE: NaiveDateTime = NaiveDateTime::MIN;

/// Split a raw post into its metadata and markdown body.
pub fn split(raw: &str) -> (BTreeMap<String, String>, &str) {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    if let Some(rest) = strip_fence_line(raw) {
        let mut offset = 0;
        for line in rest.split_inclusive('\n') {
            if line.trim() == FENCE {
                let meta = parse_lines(&rest[..offset]).unwrap_or_default();
                return (meta, &rest[offset + line.len()..]);
            }
            offset += line.len();
        }
        // Unterminated fence: treat everything as body.
        return (BTreeMap::new(), raw);
    }

    let (head, body) = match raw.find("\n\n").or_else(|| raw.find("\r\n\r\n")) {
        Some(idx) => (&raw[..idx], raw[idx..].trim_start_matches(['\r', '\n'])),
        None => (raw, ""),
    };
    match parse_lines(head) {
        Some(meta) if !meta.is_empty() => (meta, body),
        _ => (BTreeMap::new(), raw),
    }
}

fn strip_fence_line(raw: &str) -> Option<&str> {
    let (first, rest) = raw.split_once('\n')?;
    (first.trim() == FENCE).then_some(rest)
}

/// Parse `key: value` lines; `None` if any non-empty line isn't one.
fn parse_lines(block: &str) -> Option<BTreeMap<String, String>> {
    let mut meta = BTreeMap::new();
    for line in block.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            continue;
        }
        let caps = META_LINE.captures(line)?;
        meta.insert(caps[1].to_lowercase(), unquote(caps[2].trim()).to_string());
    }
    Some(meta)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Try every supported layout in order.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Parse a post date, substituting [`UNKNOWN_DATE`] (with a warning) when no
/// layout matches.
pub fn date_or_sentinel(path: &str, raw: &str) -> NaiveDateTime {
    parse_date(raw).unwrap_or_else(|| {
        tracing::warn!(path = %path, date = %raw, "unparseable post date, sorting it last");
        UNKNOWN_DATE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_split_fenced() {
        let (meta, body) = split("---\ntitle: Hello\ndate: 2024-01-15\n---\n# Heading\n");
        assert_eq!(meta["title"], "Hello");
        assert_eq!(meta["date"], "2024-01-15");
        assert_eq!(body, "# Heading\n");
    }

    #[test]
    fn test_split_unfenced_until_blank_line() {
        let (meta, body) = split("title: Hola\ndate: 2023-05-01\n\nCuerpo del post.");
        assert_eq!(meta["title"], "Hola");
        assert_eq!(body, "Cuerpo del post.");
    }

    #[test]
    fn test_split_without_metadata_keeps_whole_body() {
        let raw = "# Note: plain markdown\n\nNo metadata here.";
        let (meta, body) = split(raw);
        assert!(meta.is_empty());
        assert_eq!(body, raw);
    }

    #[test]
    fn test_split_unterminated_fence() {
        let raw = "---\ntitle: Broken\nbody text";
        let (meta, body) = split(raw);
        assert!(meta.is_empty());
        assert_eq!(body, raw);
    }

    #[test]
    fn test_split_strips_quotes_and_lowercases_keys() {
        let (meta, _) = split("---\nTitle: \"Quoted: yes\"\n---\n");
        assert_eq!(meta["title"], "Quoted: yes");
    }

    #[test]
    fn test_parse_date_formats() {
        let d = parse_date("2024-01-15").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2024, 1, 15));

        let d = parse_date("2024-01-15 08:30:00").unwrap();
        assert_eq!(d.hour(), 8);

        let d = parse_date("2024-01-15 08:30").unwrap();
        assert_eq!(d.minute(), 30);

        let d = parse_date("2024-01-15T10:00:00+02:00").unwrap();
        assert_eq!(d.hour(), 8);

        let d = parse_date("15/01/2024").unwrap();
        assert_eq!((d.month(), d.day()), (1, 15));

        let d = parse_date("March 05, 2023").unwrap();
        assert_eq!((d.year(), d.month(), d.day()), (2023, 3, 5));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("someday").is_none());
        assert!(parse_date("").is_none());
        assert!(parse_date("2024-13-45").is_none());
    }

    #[test]
    fn test_date_or_sentinel_sorts_before_everything() {
        let sentinel = date_or_sentinel("en/x", "not a date");
        assert_eq!(sentinel, UNKNOWN_DATE);
        assert!(sentinel < parse_date("1900-01-01").unwrap());
    }
}
