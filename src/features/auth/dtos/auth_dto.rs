use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::auth::models::{Role, Session};

/// Request DTO for role login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    pub role: Role,

    #[validate(length(min = 1, message = "Password is required."))]
    pub password: String,
}

/// Request DTO for dropping one role from the current session
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LogoutRequestDto {
    pub role: Role,
}

/// The three login flags a client renders from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusDto {
    pub is_admin_logged_in: bool,
    pub is_management_logged_in: bool,
    pub is_mart_owner_logged_in: bool,
}

impl From<&Session> for SessionStatusDto {
    fn from(session: &Session) -> Self {
        Self {
            is_admin_logged_in: session.has_role(Role::Admin),
            is_management_logged_in: session.has_role(Role::Management),
            is_mart_owner_logged_in: session.has_role(Role::MartOwner),
        }
    }
}

/// Response DTO carrying a fresh session token.
/// After the last role logs out the token carries no roles.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokenDto {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub session: SessionStatusDto,
}
