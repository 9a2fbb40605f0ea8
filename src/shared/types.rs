use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl Meta {
    pub fn total(len: usize) -> Self {
        Self { total: len as i64 }
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    /// Shorthand for a list payload with `meta.total` filled in
    pub fn list(items: Vec<T>) -> ApiResponse<Vec<T>> {
        let meta = Meta::total(items.len());
        ApiResponse::success(Some(items), None, Some(meta))
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

/// Per-record PIN presented to edit or delete an ad or complaint
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct RecordPinDto {
    pub pin: Option<String>,
}
