use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::admin::dtos::ManagementPasswordDto;
use crate::features::admin::services::AdminService;
use crate::features::auth::guards::RequireAdmin;
use crate::shared::types::ApiResponse;

/// Read the current management password
#[utoipa::path(
    get,
    path = "/api/admin/management-password",
    responses(
        (status = 200, description = "Management password", body = ApiResponse<ManagementPasswordDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_management_password(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<AdminService>>,
) -> Result<Json<ApiResponse<ManagementPasswordDto>>> {
    let password = service.management_password().await?;
    Ok(Json(ApiResponse::success(Some(password), None, None)))
}

/// Change the management password
#[utoipa::path(
    put,
    path = "/api/admin/management-password",
    request_body = ManagementPasswordDto,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Empty password"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin access required")
    ),
    tag = "admin",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn set_management_password(
    RequireAdmin(_session): RequireAdmin,
    State(service): State<Arc<AdminService>>,
    AppJson(dto): AppJson<ManagementPasswordDto>,
) -> Result<Json<ApiResponse<()>>> {
    service.set_management_password(&dto.password).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Management password updated.".to_string()),
        None,
    )))
}
