use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use doctor_cell::router::intake_routes;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Doctor intake API is running!" }))
        .nest("/intake", intake_routes(state))
}
