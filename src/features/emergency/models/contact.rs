use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::cells::{deserialize_count, deserialize_text};
use crate::shared::time::deserialize_timestamp;

/// Emergency contact row as returned by `getEmergencyContacts`
#[derive(Debug, Clone, Deserialize)]
pub struct EmergencyContact {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "deserialize_text")]
    pub contact_type: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub phone: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub likes: u64,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub dislikes: u64,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Like,
    Dislike,
}

impl Vote {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vote::Like => "like",
            Vote::Dislike => "dislike",
        }
    }
}
