use axum::{
    extract::{Request, State},
    http::{HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use relay_forwarder::error::ForwardError;
use relay_forwarder::forward;
use relay_forwarder::models::{InboundEventRequest, TrackResponse};

use crate::state::AppState;

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// Answer browser pre-flight requests inline and stamp the CORS headers on
/// every other response.
pub async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return with_cors_headers(StatusCode::OK.into_response());
    }
    with_cors_headers(next.run(request).await)
}

fn with_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
    headers.insert(
        "access-control-allow-methods",
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        "access-control-allow-headers",
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// The body is taken raw so an unreadable payload maps to the same response
/// as one with the required fields missing.
pub async fn track(State(state): State<AppState>, body: String) -> Response {
    let request = match serde_json::from_str::<InboundEventRequest>(&body) {
        Ok(request) => request,
        Err(err) => {
            tracing::warn!(error = %err, "unreadable event body");
            return error_response(&ForwardError::InvalidRequest);
        }
    };

    match forward::handle(request, &state.deps).await {
        Ok(tracked) => (StatusCode::OK, Json(TrackResponse::from(tracked))).into_response(),
        Err(err) => error_response(&err),
    }
}

pub async fn method_not_allowed() -> Response {
    error_response(&ForwardError::MethodNotAllowed)
}

fn error_response(err: &ForwardError) -> Response {
    let status =
        StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(err.body())).into_response()
}
