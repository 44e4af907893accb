//! Small text/date utilities shared by the tree builder and normalizers.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Trim leading/trailing whitespace. `None` for a whitespace-only or empty
/// string, mirroring the tree builder's close-tag rule: "whitespace-only
/// text is deleted, otherwise trimmed".
pub fn trim_or_none(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}

/// Best-effort coercion of a date string into UTC, trying RFC 2822 (RSS
/// `pubDate`/`lastBuildDate`), RFC 3339 (Atom `published`/`updated`), and a
/// handful of common variants seen in the wild (missing weekday, `Z`-less
/// offsets, space instead of `T`).
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(d) = DateTime::parse_from_rfc2822(t) {
        return Some(d.with_timezone(&Utc));
    }
    if let Ok(d) = DateTime::parse_from_rfc3339(t) {
        return Some(d.with_timezone(&Utc));
    }
    const FORMATS: &[&str] = &[
        "%d %b %Y %H:%M:%S %z",
        "%a, %d %b %Y %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
    ];
    for fmt in FORMATS {
        if let Ok(d) = DateTime::parse_from_str(t, fmt) {
            return Some(d.with_timezone(&Utc));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(t, fmt) {
            return Some(DateTime::<Utc>::from_utc(naive, Utc));
        }
    }
    None
}

/// Deduplicate by string equality after trim, preserving first-seen order
/// (spec §8 invariant 5; §9 decides case-sensitive comparison).
pub fn dedup_preserve_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if seen.insert(item.clone()) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace_only_to_none() {
        assert_eq!(trim_or_none("   \n\t "), None);
        assert_eq!(trim_or_none("  hi  "), Some("hi".to_string()));
    }

    #[test]
    fn parses_rfc2822_pubdate() {
        let d = parse_date("Mon, 01 Jan 2024 00:00:00 GMT").unwrap();
        assert_eq!(d.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn parses_rfc3339_atom_date() {
        let d = parse_date("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(d.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn dedup_preserves_first_seen_order_case_sensitive() {
        let items = vec!["news".to_string(), "tech".to_string(), "news".to_string(), "Tech".to_string()];
        assert_eq!(dedup_preserve_order(items), vec!["news".to_string(), "tech".to_string(), "Tech".to_string()]);
    }

    #[test]
    fn unparseable_date_is_none() {
        assert_eq!(parse_date("not a date"), None);
    }
}
