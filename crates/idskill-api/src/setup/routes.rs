//! Route configuration and setup

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use idskill_infra::request_id_middleware;

use crate::handlers;
use crate::state::AppState;

/// Invocation events are small JSON documents
const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(handlers::skill::invoke_skill))
        .route("/skill", post(handlers::skill::invoke_skill))
        .route("/health", get(handlers::health::health_check))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
}
