use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::management::handlers;
use crate::features::management::services::ManagementService;

/// Management post routes. Reads are public; writes check the session in
/// the handler.
pub fn routes(service: Arc<ManagementService>) -> Router {
    Router::new()
        .route(
            "/api/management/posts",
            get(handlers::list_posts).post(handlers::create_post),
        )
        .route("/api/management/post-types", get(handlers::list_post_types))
        .route(
            "/api/management/posts/{id}",
            get(handlers::get_post)
                .put(handlers::update_post)
                .delete(handlers::delete_post),
        )
        .route("/api/management/posts/{id}/stream", get(handlers::stream_post))
        .with_state(service)
}
