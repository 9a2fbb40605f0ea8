use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::emergency::handlers;
use crate::features::emergency::services::EmergencyService;

pub fn routes(service: Arc<EmergencyService>) -> Router {
    Router::new()
        .route(
            "/api/emergency-contacts",
            get(handlers::list_contacts).post(handlers::create_contact),
        )
        .route(
            "/api/emergency-contacts/{id}/rating",
            post(handlers::rate_contact),
        )
        .with_state(service)
}
