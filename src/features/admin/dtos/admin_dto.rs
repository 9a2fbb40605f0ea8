use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::cells::deserialize_text;

/// The management password, both as read from the script and as submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ManagementPasswordDto {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub password: String,
}
