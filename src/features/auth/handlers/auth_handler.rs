use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    LoginRequestDto, LogoutRequestDto, SessionStatusDto, SessionTokenDto,
};
use crate::features::auth::guards::MaybeSession;
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Log in as one of the portal roles
///
/// A bearer token already held by the caller is extended with the new role.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<SessionTokenDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid password")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    MaybeSession(session): MaybeSession,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<SessionTokenDto>>> {
    dto.validate()?;

    let token = service.login(dto, session).await?;
    Ok(Json(ApiResponse::success(Some(token), None, None)))
}

/// Drop one role from the current session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = LogoutRequestDto,
    responses(
        (status = 200, description = "Role logged out", body = ApiResponse<SessionTokenDto>)
    ),
    tag = "auth",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn logout(
    State(service): State<Arc<AuthService>>,
    MaybeSession(session): MaybeSession,
    AppJson(dto): AppJson<LogoutRequestDto>,
) -> Result<Json<ApiResponse<SessionTokenDto>>> {
    let token = service.logout(dto.role, session)?;
    Ok(Json(ApiResponse::success(Some(token), None, None)))
}

/// Current login flags
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Session flags", body = ApiResponse<SessionStatusDto>),
        (status = 401, description = "Invalid or expired token")
    ),
    tag = "auth",
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn get_session(
    State(service): State<Arc<AuthService>>,
    MaybeSession(session): MaybeSession,
) -> Result<Json<ApiResponse<SessionStatusDto>>> {
    let status = service.status(session.as_ref());
    Ok(Json(ApiResponse::success(Some(status), None, None)))
}
