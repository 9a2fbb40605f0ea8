use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::mart::models::{Indicator, MartStatus};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateMartStatusDto {
    pub status: MartStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MartStatusResponseDto {
    pub status: MartStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    pub indicator: Indicator,
}

impl MartStatusResponseDto {
    pub fn new(status: MartStatus, last_updated: Option<DateTime<Utc>>) -> Self {
        Self {
            status,
            last_updated,
            indicator: status.indicator(),
        }
    }
}
