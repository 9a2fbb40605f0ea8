use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::core::error::Result;
use crate::features::villas::dtos::{VillaQueryDto, VillaResponseDto};
use crate::features::villas::services::VillaService;
use crate::shared::types::ApiResponse;

/// Search the villa directory
#[utoipa::path(
    get,
    path = "/api/villas",
    params(VillaQueryDto),
    responses(
        (status = 200, description = "Matching villas", body = ApiResponse<Vec<VillaResponseDto>>),
    ),
    tag = "villas"
)]
pub async fn list_villas(
    State(service): State<Arc<VillaService>>,
    Query(query): Query<VillaQueryDto>,
) -> Result<Json<ApiResponse<Vec<VillaResponseDto>>>> {
    Ok(Json(ApiResponse::list(service.search(&query))))
}

/// Look up one villa; the number is normalized first (`a-7` finds `A-007`)
#[utoipa::path(
    get,
    path = "/api/villas/{number}",
    params(
        ("number" = String, Path, description = "Villa number")
    ),
    responses(
        (status = 200, description = "Villa found", body = ApiResponse<VillaResponseDto>),
        (status = 404, description = "Villa not found")
    ),
    tag = "villas"
)]
pub async fn get_villa(
    State(service): State<Arc<VillaService>>,
    Path(number): Path<String>,
) -> Result<Json<ApiResponse<VillaResponseDto>>> {
    let villa = service.get(&number)?;
    Ok(Json(ApiResponse::success(Some(villa), None, None)))
}
