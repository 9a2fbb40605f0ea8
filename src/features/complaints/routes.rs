use std::sync::Arc;

use axum::{
    routing::{get, patch, put},
    Router,
};

use crate::features::complaints::handlers;
use crate::features::complaints::services::ComplaintService;

/// Complaint routes. Status changes need a management session.
pub fn routes(service: Arc<ComplaintService>) -> Router {
    Router::new()
        .route(
            "/api/complaints",
            get(handlers::list_complaints).post(handlers::create_complaint),
        )
        .route(
            "/api/complaints/{id}",
            put(handlers::update_complaint).delete(handlers::delete_complaint),
        )
        .route(
            "/api/complaints/{id}/status",
            patch(handlers::update_complaint_status),
        )
        .with_state(service)
}
