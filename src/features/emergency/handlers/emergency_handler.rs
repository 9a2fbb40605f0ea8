use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::guards::RequireAdmin;
use crate::features::emergency::dtos::{
    CreateEmergencyContactDto, EmergencyContactResponseDto, RateContactDto,
};
use crate::features::emergency::services::EmergencyService;
use crate::shared::types::ApiResponse;

/// List emergency contacts
#[utoipa::path(
    get,
    path = "/api/emergency-contacts",
    responses(
        (status = 200, description = "Contacts", body = ApiResponse<Vec<EmergencyContactResponseDto>>),
        (status = 502, description = "Remote store unavailable")
    ),
    tag = "emergency"
)]
pub async fn list_contacts(
    State(service): State<Arc<EmergencyService>>,
) -> Result<Json<ApiResponse<Vec<EmergencyContactResponseDto>>>> {
    let contacts = service.list().await?;
    Ok(Json(ApiResponse::list(contacts)))
}

/// Add an emergency contact
#[utoipa::path(
    post,
    path = "/api/emergency-contacts",
    request_body = CreateEmergencyContactDto,
    responses(
        (status = 201, description = "Contact added", body = ApiResponse<EmergencyContactResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Login required"),
        (status = 403, description = "Admin access required")
    ),
    security(("bearer_auth" = [])),
    tag = "emergency"
)]
pub async fn create_contact(
    State(service): State<Arc<EmergencyService>>,
    RequireAdmin(_session): RequireAdmin,
    AppJson(dto): AppJson<CreateEmergencyContactDto>,
) -> Result<(StatusCode, Json<ApiResponse<EmergencyContactResponseDto>>)> {
    dto.validate()?;

    let contact = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(contact),
            Some("Contact added successfully!".to_string()),
            None,
        )),
    ))
}

/// Like or dislike a contact
#[utoipa::path(
    post,
    path = "/api/emergency-contacts/{id}/rating",
    params(
        ("id" = String, Path, description = "Contact ID")
    ),
    request_body = RateContactDto,
    responses(
        (status = 200, description = "Vote recorded"),
        (status = 400, description = "Unknown vote")
    ),
    tag = "emergency"
)]
pub async fn rate_contact(
    State(service): State<Arc<EmergencyService>>,
    Path(id): Path<String>,
    AppJson(dto): AppJson<RateContactDto>,
) -> Result<Json<ApiResponse<()>>> {
    service.rate(&id, dto.vote).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Thank you for your feedback!".to_string()),
        None,
    )))
}
