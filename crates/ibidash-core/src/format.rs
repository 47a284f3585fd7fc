// ── Cell formatting helpers ──
//
// Everything that turns a loosely typed wire field into display text.
// Absent values always become `-`.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};

use ibidash_api::{Scalar, Timestamp};

/// Placeholder for absent values.
pub const DASH: &str = "-";

/// How many hosts are listed before collapsing into `+N more`.
const HOSTS_SHOWN: usize = 3;

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Optional text, or `-`.
pub fn text(value: Option<&str>) -> String {
    match value {
        Some(s) if !s.is_empty() => s.to_owned(),
        _ => DASH.to_owned(),
    }
}

/// Optional scalar rendered verbatim, or `-`.
pub fn scalar(value: Option<&Scalar>) -> String {
    value.map_or_else(|| DASH.to_owned(), ToString::to_string)
}

/// Duration in seconds, suffixed with `s`.
pub fn seconds(value: Option<&Scalar>) -> String {
    value.map_or_else(|| DASH.to_owned(), |v| format!("{v}s"))
}

/// Up to three hosts, then `+N more`.
pub fn hosts(hosts: &[String]) -> String {
    if hosts.is_empty() {
        return DASH.to_owned();
    }
    let shown = hosts
        .iter()
        .take(HOSTS_SHOWN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    match hosts.len().saturating_sub(HOSTS_SHOWN) {
        0 => shown,
        more => format!("{shown} +{more} more"),
    }
}

/// Timestamp in local time as `YYYY-MM-DD HH:MM`.
pub fn timestamp(value: Option<&Timestamp>) -> String {
    timestamp_in(value, &Local)
}

/// Timestamp rendered in an explicit time zone.
///
/// RFC 3339 text and epoch seconds are converted; offset-less ISO text
/// is read as wall-clock time in `tz`. Text that parses as neither is
/// shown verbatim.
pub fn timestamp_in<Tz>(value: Option<&Timestamp>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match value {
        None => DASH.to_owned(),
        Some(Timestamp::Epoch(secs)) => epoch(*secs).map_or_else(
            || secs.to_string(),
            |dt| dt.with_timezone(tz).format(DISPLAY_FORMAT).to_string(),
        ),
        Some(Timestamp::Text(s)) if s.trim().is_empty() => DASH.to_owned(),
        Some(Timestamp::Text(s)) => {
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return dt.with_timezone(tz).format(DISPLAY_FORMAT).to_string();
            }
            naive(s)
                .and_then(|n| tz.from_local_datetime(&n).earliest())
                .map_or_else(|| s.clone(), |dt| dt.format(DISPLAY_FORMAT).to_string())
        }
    }
}

#[allow(clippy::as_conversions, clippy::cast_possible_truncation)]
fn epoch(secs: f64) -> Option<DateTime<chrono::Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let whole = secs.trunc();
    let nanos = ((secs - whole) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    DateTime::from_timestamp(whole as i64, nanos)
}

fn naive(s: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}
