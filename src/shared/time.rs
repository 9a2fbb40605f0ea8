//! Timestamp parsing and the relative/remaining-time strings shown on cards.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Float(f64),
    Text(String),
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD`, or epoch milliseconds
/// (as a number or a numeric string).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(millis) = raw.parse::<i64>() {
        return Utc.timestamp_millis_opt(millis).single();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn from_raw(raw: RawTimestamp) -> Option<DateTime<Utc>> {
    match raw {
        RawTimestamp::Millis(ms) => Utc.timestamp_millis_opt(ms).single(),
        RawTimestamp::Float(ms) => Utc.timestamp_millis_opt(ms as i64).single(),
        RawTimestamp::Text(text) => parse_timestamp(&text),
    }
}

/// Serde adapter for required timestamps. Unparseable values fall back to the
/// Unix epoch so a single bad row sorts last instead of failing the whole list.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(raw.and_then(from_raw).unwrap_or_default())
}

/// Serde adapter for optional timestamps; empty strings read as `None`.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(raw.and_then(from_raw))
}

/// Serde adapter for epoch-millisecond instants such as an ad's expiry.
pub fn deserialize_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(raw
        .and_then(from_raw)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0))
}

/// "3 days ago" style label. A unit is used only once strictly more than one
/// of it has elapsed.
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const UNITS: [(f64, &str); 5] = [
        (31_536_000.0, "years"),
        (2_592_000.0, "months"),
        (86_400.0, "days"),
        (3_600.0, "hours"),
        (60.0, "minutes"),
    ];

    let seconds = (now - timestamp).num_seconds() as f64;
    for (unit_seconds, label) in UNITS {
        let interval = seconds / unit_seconds;
        if interval > 1.0 {
            return format!("{} {} ago", interval.floor() as i64, label);
        }
    }
    "just now".to_string()
}

/// Whole hours until `expiry_ms`, rounded up, never negative.
pub fn hours_left(expiry_ms: i64, now_ms: i64) -> i64 {
    const HOUR_MS: i64 = 60 * 60 * 1000;
    let remaining = expiry_ms - now_ms;
    if remaining <= 0 {
        return 0;
    }
    (remaining + HOUR_MS - 1) / HOUR_MS
}
