use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::villas::handlers;
use crate::features::villas::services::VillaService;

/// Villa directory routes (public)
pub fn routes(service: Arc<VillaService>) -> Router {
    Router::new()
        .route("/api/villas", get(handlers::list_villas))
        .route("/api/villas/{number}", get(handlers::get_villa))
        .with_state(service)
}
