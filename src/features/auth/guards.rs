//! Role guards for portal handlers.
//!
//! The session middleware places a [`Session`] in request extensions whenever a
//! valid bearer token is presented. These extractors check it:
//!
//! - admin: everything, including PIN bypass
//! - management: announcements and complaint triage
//! - mart_owner: the mart status indicator
//!
//! Admin passes every guard.

use crate::core::error::AppError;
use crate::features::auth::models::Session;
use axum::{extract::FromRequestParts, http::request::Parts};

fn session_from(parts: &Parts) -> Result<&Session, AppError> {
    parts
        .extensions
        .get::<Session>()
        .ok_or_else(|| AppError::Unauthorized("Login required".to_string()))
}

/// Optional session; `None` for anonymous callers.
///
/// # Example
/// ```ignore
/// pub async fn handler(MaybeSession(session): MaybeSession) { ... }
/// ```
pub struct MaybeSession(pub Option<Session>);

impl<S> FromRequestParts<S> for MaybeSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeSession(parts.extensions.get::<Session>().cloned()))
    }
}

/// Guard for admin-only operations.
pub struct RequireAdmin(pub Session);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from(parts)?;

        if !session.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(session.clone()))
    }
}

/// Guard for management operations. Allows management or admin.
pub struct RequireManagement(pub Session);

impl<S> FromRequestParts<S> for RequireManagement
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from(parts)?;

        if !session.can_manage() {
            return Err(AppError::Forbidden(
                "Management access required".to_string(),
            ));
        }

        Ok(RequireManagement(session.clone()))
    }
}

/// Guard for mart status updates. Allows mart owner or admin.
pub struct RequireMartOwner(pub Session);

impl<S> FromRequestParts<S> for RequireMartOwner
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from(parts)?;

        if !session.can_update_mart() {
            return Err(AppError::Forbidden(
                "Mart owner access required".to_string(),
            ));
        }

        Ok(RequireMartOwner(session.clone()))
    }
}

/// PIN gate for editing or deleting a record. Admin sessions skip it;
/// everyone else must present the PIN stored with the record.
pub fn verify_record_pin(
    record_pin: &str,
    supplied: Option<&str>,
    session: Option<&Session>,
) -> Result<(), AppError> {
    if session.is_some_and(Session::is_admin) {
        return Ok(());
    }

    let supplied = supplied
        .map(str::trim)
        .filter(|pin| !pin.is_empty())
        .ok_or_else(|| AppError::BadRequest("PIN required".to_string()))?;

    let stored = record_pin.trim();
    // Sheets store "0042" as the number 42
    let stored = if !stored.is_empty() && stored.chars().all(|c| c.is_ascii_digit()) {
        format!("{:0>4}", stored)
    } else {
        stored.to_string()
    };

    if stored.is_empty() || supplied != stored {
        return Err(AppError::Forbidden("Incorrect PIN.".to_string()));
    }

    Ok(())
}
