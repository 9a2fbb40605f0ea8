use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Directory entry as stored in the villa data file, keyed by villa number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Villa {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub block: String,
    #[serde(default)]
    pub residents: String,
    #[serde(default)]
    pub map_link: String,
}
