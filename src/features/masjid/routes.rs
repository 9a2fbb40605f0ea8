use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::masjid::handlers;
use crate::features::masjid::services::MasjidService;

pub fn routes(service: Arc<MasjidService>) -> Router {
    Router::new()
        .route(
            "/api/masjid/timings",
            get(handlers::get_timings).put(handlers::update_timings),
        )
        .with_state(service)
}
