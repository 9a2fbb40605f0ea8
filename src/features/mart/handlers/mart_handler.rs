use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireMartOwner;
use crate::features::mart::dtos::{MartStatusResponseDto, UpdateMartStatusDto};
use crate::features::mart::services::MartService;
use crate::shared::types::ApiResponse;

/// Current mart status
#[utoipa::path(
    get,
    path = "/api/mart/status",
    responses(
        (status = 200, description = "Mart status", body = ApiResponse<MartStatusResponseDto>),
    ),
    tag = "mart"
)]
pub async fn get_status(
    State(service): State<Arc<MartService>>,
) -> Result<Json<ApiResponse<MartStatusResponseDto>>> {
    let status = service.current().await;
    Ok(Json(ApiResponse::success(Some(status), None, None)))
}

/// Every status the mart can be in
#[utoipa::path(
    get,
    path = "/api/mart/statuses",
    responses(
        (status = 200, description = "Statuses", body = ApiResponse<Vec<MartStatusResponseDto>>),
    ),
    tag = "mart"
)]
pub async fn list_statuses(
    State(service): State<Arc<MartService>>,
) -> Result<Json<ApiResponse<Vec<MartStatusResponseDto>>>> {
    Ok(Json(ApiResponse::list(service.statuses())))
}

/// Set the mart status
#[utoipa::path(
    put,
    path = "/api/mart/status",
    request_body = UpdateMartStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<MartStatusResponseDto>),
        (status = 401, description = "Login required"),
        (status = 403, description = "Mart owner access required"),
        (status = 502, description = "Remote store rejected the update")
    ),
    security(("bearer_auth" = [])),
    tag = "mart"
)]
pub async fn update_status(
    State(service): State<Arc<MartService>>,
    RequireMartOwner(_session): RequireMartOwner,
    AppJson(dto): AppJson<UpdateMartStatusDto>,
) -> Result<Json<ApiResponse<MartStatusResponseDto>>> {
    let status = service.update(dto.status).await?;
    Ok(Json(ApiResponse::success(
        Some(status),
        Some("Mart status updated!".to_string()),
        None,
    )))
}
