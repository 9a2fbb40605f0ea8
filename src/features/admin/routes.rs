use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::admin::handlers;
use crate::features::admin::services::AdminService;

/// Admin routes (all require the admin role); nested under `/api/admin`
pub fn routes(admin_service: Arc<AdminService>) -> Router {
    Router::new()
        .route(
            "/management-password",
            get(handlers::get_management_password).put(handlers::set_management_password),
        )
        .with_state(admin_service)
}
