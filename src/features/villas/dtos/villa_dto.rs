use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::features::villas::models::Villa;

/// Query params for searching the directory. All filters are
/// case-insensitive; `q` matches the villa number or resident names.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct VillaQueryDto {
    pub category: Option<String>,
    pub street: Option<String>,
    pub block: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VillaResponseDto {
    pub number: String,
    pub category: String,
    pub street: String,
    pub block: String,
    pub residents: String,
    pub map_link: String,
}

impl VillaResponseDto {
    pub fn new(number: &str, villa: &Villa) -> Self {
        Self {
            number: number.to_string(),
            category: villa.category.clone(),
            street: villa.street.clone(),
            block: villa.block.clone(),
            residents: villa.residents.clone(),
            map_link: villa.map_link.clone(),
        }
    }
}
