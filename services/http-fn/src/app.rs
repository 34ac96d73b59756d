use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{cors, healthz, method_not_allowed, readyz, track};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/api/analytics", post(track).fallback(method_not_allowed))
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
