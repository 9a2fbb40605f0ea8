use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::cells::deserialize_text;
use crate::shared::time::deserialize_optional_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum MartStatus {
    #[serde(rename = "Mart is Open")]
    Open,
    #[serde(rename = "Mart is Closed")]
    Closed,
    #[serde(rename = "Namaz-Break")]
    NamazBreak,
    #[serde(rename = "Lunch/Dinner Break")]
    MealBreak,
}

impl MartStatus {
    pub const ALL: [MartStatus; 4] = [
        MartStatus::Open,
        MartStatus::Closed,
        MartStatus::NamazBreak,
        MartStatus::MealBreak,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MartStatus::Open => "Mart is Open",
            MartStatus::Closed => "Mart is Closed",
            MartStatus::NamazBreak => "Namaz-Break",
            MartStatus::MealBreak => "Lunch/Dinner Break",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw.trim())
    }

    pub fn indicator(&self) -> Indicator {
        match self {
            MartStatus::Open => Indicator::Green,
            MartStatus::Closed => Indicator::Red,
            MartStatus::NamazBreak | MartStatus::MealBreak => Indicator::Yellow,
        }
    }
}

/// Colour of the status dot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Indicator {
    Green,
    Red,
    Yellow,
}

/// Payload of `getMartStatus`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MartStatusRow {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub last_updated: Option<DateTime<Utc>>,
}
