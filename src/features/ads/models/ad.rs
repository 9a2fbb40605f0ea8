use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::cells::deserialize_text;
use crate::shared::time::{deserialize_millis, deserialize_timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AdCategory {
    Property,
    Food,
    #[serde(rename = "Ladies Items")]
    LadiesItems,
    #[serde(rename = "Tution Center")]
    TutionCenter,
    #[serde(rename = "Missing Goods")]
    MissingGoods,
    #[serde(rename = "Health & Medicine")]
    HealthAndMedicine,
    Others,
}

impl AdCategory {
    pub const ALL: [AdCategory; 7] = [
        AdCategory::Property,
        AdCategory::Food,
        AdCategory::LadiesItems,
        AdCategory::TutionCenter,
        AdCategory::MissingGoods,
        AdCategory::HealthAndMedicine,
        AdCategory::Others,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AdCategory::Property => "Property",
            AdCategory::Food => "Food",
            AdCategory::LadiesItems => "Ladies Items",
            AdCategory::TutionCenter => "Tution Center",
            AdCategory::MissingGoods => "Missing Goods",
            AdCategory::HealthAndMedicine => "Health & Medicine",
            AdCategory::Others => "Others",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }
}

/// Ad row as returned by `getAds`, after key normalization
#[derive(Debug, Clone, Deserialize)]
pub struct Ad {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub phone: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub category: String,
    /// Epoch milliseconds
    #[serde(default, deserialize_with = "deserialize_millis")]
    pub expiry: i64,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub pin: String,
}

impl Ad {
    pub fn is_active(&self, now_ms: i64) -> bool {
        self.expiry > now_ms
    }
}
