use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::mart::handlers;
use crate::features::mart::services::MartService;

pub fn routes(service: Arc<MartService>) -> Router {
    Router::new()
        .route(
            "/api/mart/status",
            get(handlers::get_status).put(handlers::update_status),
        )
        .route("/api/mart/statuses", get(handlers::list_statuses))
        .with_state(service)
}
