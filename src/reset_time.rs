//! Human-relative rendering of quota reset timestamps.
//!
//! Reset instants arrive as ISO-8601 strings, sometimes with fractional
//! seconds, sometimes absent entirely. The rendering keeps the menu-line
//! vocabulary: a countdown within the current day, "Tomorrow" for the next
//! day, an abbreviated date beyond that.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Format an optional reset timestamp relative to now.
pub fn format_reset_time(iso_time: Option<&str>) -> String {
    format_reset_time_at(iso_time, Utc::now())
}

/// Format an optional reset timestamp relative to an explicit `now`.
///
/// - missing or empty input renders "--"
/// - unparsable input renders "?"
/// - same day (whole-day difference 0): "{h}h {m}m", or "{m}m" when under
///   an hour
/// - whole-day difference 1: "Tomorrow"
/// - anything else: abbreviated month and zero-padded day, e.g. "Mar 05"
///
/// The whole-day difference floors toward negative infinity, so an instant
/// in the past never lands in the countdown branch.
pub fn format_reset_time_at(iso_time: Option<&str>, now: DateTime<Utc>) -> String {
    let raw = match iso_time {
        Some(s) if !s.is_empty() => s,
        _ => return "--".to_string(),
    };

    let reset = match parse_reset_instant(raw) {
        Some(dt) => dt,
        None => return "?".to_string(),
    };

    let delta = reset.signed_duration_since(now).num_seconds();
    let days = delta.div_euclid(86_400);
    let remainder = delta.rem_euclid(86_400);

    match days {
        0 => {
            let hours = remainder / 3600;
            let minutes = (remainder % 3600) / 60;
            if hours > 0 {
                format!("{}h {}m", hours, minutes)
            } else {
                format!("{}m", minutes)
            }
        }
        1 => "Tomorrow".to_string(),
        _ => reset.format("%b %d").to_string(),
    }
}

/// Parse an ISO-8601 reset timestamp, stripping fractional seconds first.
fn parse_reset_instant(raw: &str) -> Option<DateTime<Utc>> {
    let clean = strip_fractional_seconds(raw);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&clean) {
        return Some(dt.with_timezone(&Utc));
    }

    // Naive timestamps are taken as UTC.
    if let Ok(naive) = NaiveDateTime::parse_from_str(&clean, "%Y-%m-%dT%H:%M:%S") {
        return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
    }

    None
}

fn strip_fractional_seconds(raw: &str) -> String {
    match raw.find('.') {
        Some(dot) => {
            let digits = raw[dot + 1..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .count();
            format!("{}{}", &raw[..dot], &raw[dot + 1 + digits..])
        }
        None => raw.to_string(),
    }
}
