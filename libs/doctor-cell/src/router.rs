use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};

use shared_config::AppConfig;

use crate::handlers;

pub fn intake_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/reference", get(handlers::get_reference_data))
        .route("/options", post(handlers::get_visible_options))
        .route("/validate", post(handlers::validate_intake_form))
        .route("/submit", post(handlers::submit_intake_form))
        .with_state(state)
}
