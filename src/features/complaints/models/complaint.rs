use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::shared::cells::{deserialize_flag, deserialize_text};
use crate::shared::time::{deserialize_optional_timestamp, deserialize_timestamp};

/// Complaint row as returned by `getComplaints`, after key normalization
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub villa: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub noted: bool,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub resolved: bool,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub resolved_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub pin: String,
}
