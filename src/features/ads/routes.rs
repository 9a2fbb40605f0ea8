use std::sync::Arc;

use axum::{
    routing::{get, put},
    Router,
};

use crate::features::ads::handlers;
use crate::features::ads::services::AdService;

/// Ad routes. Posting is open; edits and deletes are PIN-gated in the service.
pub fn routes(service: Arc<AdService>) -> Router {
    Router::new()
        .route("/api/ads", get(handlers::list_ads).post(handlers::create_ad))
        .route("/api/ads/categories", get(handlers::list_categories))
        .route(
            "/api/ads/{id}",
            put(handlers::update_ad).delete(handlers::delete_ad),
        )
        .with_state(service)
}
