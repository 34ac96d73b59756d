use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{analytics, healthz, readyz};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/.netlify/functions/analytics", any(analytics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
