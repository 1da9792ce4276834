use chrono::{DateTime, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
];

/// Parses server timestamps with or without offset. Offsets are dropped, the
/// wall-clock time is kept as sent.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// `YYYY-MM-DD HH:MM`, or the input unchanged when it cannot be parsed.
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// Short axis label: `MM-DD HH:MM`.
pub fn format_axis_label(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%m-%d %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// True for the `YYYY-MM-DDTHH:MM` values a `datetime-local` input yields.
pub fn is_datetime_local(raw: &str) -> bool {
    NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%dT%H:%M:%S").is_ok()
}
