use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Prayer times as `HH:MM` (24-hour, empty when not set) and the masjid staff
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NamazTimings {
    pub fajr: String,
    pub zuhar: String,
    pub asar: String,
    pub maghrib: String,
    pub isha: String,
    pub jumma: String,
    pub imam: String,
    pub moazin: String,
    pub khadim: String,
}

impl Default for NamazTimings {
    fn default() -> Self {
        Self {
            fajr: "06:10".to_string(),
            zuhar: "13:30".to_string(),
            asar: "16:45".to_string(),
            maghrib: "18:00".to_string(),
            isha: "20:00".to_string(),
            jumma: "14:00".to_string(),
            imam: "janab zulfiqar sahab".to_string(),
            moazin: "janab salman sahab".to_string(),
            khadim: "janab khalil sahab".to_string(),
        }
    }
}

impl NamazTimings {
    /// (label, key, raw time) in display order
    pub fn prayers(&self) -> [(&'static str, &'static str, &str); 6] {
        [
            ("Fajr", "fajr", self.fajr.as_str()),
            ("Zuhar", "zuhar", self.zuhar.as_str()),
            ("Asar", "asar", self.asar.as_str()),
            ("Maghrib", "maghrib", self.maghrib.as_str()),
            ("Isha", "isha", self.isha.as_str()),
            ("Jumma", "jumma", self.jumma.as_str()),
        ]
    }

    /// (role, key, name) in display order
    pub fn staff(&self) -> [(&'static str, &'static str, &str); 3] {
        [
            ("Imam", "imam", self.imam.as_str()),
            ("Moazin", "moazin", self.moazin.as_str()),
            ("Khadim", "khadim", self.khadim.as_str()),
        ]
    }
}

/// Renders a stored time for display: `01:30 PM`, `Not set` when empty,
/// `Invalid Time` when it is not a numeric `H:M` pair.
pub fn format_time(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "Not set".to_string();
    }

    let mut parts = raw.splitn(2, ':');
    let hours = parts.next().and_then(|h| h.trim().parse::<u32>().ok());
    let minutes = parts.next().and_then(|m| m.trim().parse::<u32>().ok());

    match (hours, minutes) {
        (Some(h), Some(m)) => NaiveTime::from_hms_opt(h, m, 0)
            .map(|t| t.format("%I:%M %p").to_string())
            .unwrap_or_else(|| "Invalid Time".to_string()),
        _ => "Invalid Time".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time("06:10"), "06:10 AM");
        assert_eq!(format_time("13:30"), "01:30 PM");
        assert_eq!(format_time("00:05"), "12:05 AM");
        assert_eq!(format_time("12:00"), "12:00 PM");
        assert_eq!(format_time("7:5"), "07:05 AM");
    }

    #[test]
    fn test_format_time_unset_and_invalid() {
        assert_eq!(format_time(""), "Not set");
        assert_eq!(format_time("   "), "Not set");
        assert_eq!(format_time("noon"), "Invalid Time");
        assert_eq!(format_time("12"), "Invalid Time");
        assert_eq!(format_time("ab:30"), "Invalid Time");
        assert_eq!(format_time("25:00"), "Invalid Time");
    }

    #[test]
    fn test_defaults() {
        let timings = NamazTimings::default();
        assert_eq!(timings.prayers()[5], ("Jumma", "jumma", "14:00"));
        assert_eq!(timings.staff()[0].2, "janab zulfiqar sahab");
    }
}
