use axum::{
    body::Body,
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use relay_forwarder::error::ForwardError;
use relay_forwarder::forward::{self, Deps};
use relay_forwarder::models::{InboundEventRequest, TrackResponse};

use crate::models::{LambdaEvent, LambdaResponse};
use crate::state::AppState;

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// Route handler: only translates framework request and reply to and from
/// the lambda shapes; all semantics live in `respond`.
pub async fn analytics(
    method: Method,
    State(state): State<AppState>,
    body: String,
) -> Response {
    let event = LambdaEvent {
        http_method: method.as_str().to_string(),
        body: if body.is_empty() { None } else { Some(body) },
    };
    into_framework(respond(event, &state.deps).await)
}

/// The lambda handler proper: method gate, body parse, forward, map.
pub async fn respond(event: LambdaEvent, deps: &Deps) -> LambdaResponse {
    if event.http_method.eq_ignore_ascii_case("OPTIONS") {
        return LambdaResponse::empty(200);
    }
    if !event.http_method.eq_ignore_ascii_case("POST") {
        return LambdaResponse::error(&ForwardError::MethodNotAllowed);
    }

    let request = match event
        .body
        .as_deref()
        .map(serde_json::from_str::<InboundEventRequest>)
    {
        Some(Ok(request)) => request,
        Some(Err(err)) => {
            tracing::warn!(error = %err, "unreadable event body");
            return LambdaResponse::error(&ForwardError::InvalidRequest);
        }
        None => return LambdaResponse::error(&ForwardError::InvalidRequest),
    };

    match forward::handle(request, deps).await {
        Ok(tracked) => LambdaResponse::json(200, &TrackResponse::from(tracked)),
        Err(err) => LambdaResponse::error(&err),
    }
}

fn into_framework(reply: LambdaResponse) -> Response {
    let mut builder = Response::builder().status(reply.status_code);
    for (name, value) in reply.headers {
        builder = builder.header(name, value);
    }
    builder
        .body(Body::from(reply.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
