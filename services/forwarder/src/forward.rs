use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde_json::Value;

use crate::collector::CollectorClient;
use crate::config::{ConfigSource, API_SECRET_KEY};
use crate::error::ForwardError;
use crate::models::{CollectorEvent, CollectorPayload, InboundEventRequest, TrackedEvent};

/// Flat engagement duration reported with every event; the relay does not
/// measure real engagement time.
const ENGAGEMENT_TIME_MSEC: u64 = 100;

/// Capabilities injected into one forwarding attempt.
#[derive(Clone)]
pub struct Deps {
    pub config: Arc<dyn ConfigSource>,
    pub collector: Arc<dyn CollectorClient>,
}

/// Validate one inbound event, relay it to the collector, and report the
/// outcome. Exactly one outbound call is made per valid, configured request;
/// nothing is retried.
pub async fn handle(
    request: InboundEventRequest,
    deps: &Deps,
) -> Result<TrackedEvent, ForwardError> {
    let (measurement_id, event_name) = match (
        non_empty(request.measurement_id.as_deref()),
        non_empty(request.event_name.as_deref()),
    ) {
        (Some(id), Some(name)) => (id.to_string(), name.to_string()),
        _ => return Err(ForwardError::InvalidRequest),
    };

    let api_secret = match deps.config.get(API_SECRET_KEY) {
        Some(secret) => secret,
        None => {
            tracing::error!(key = API_SECRET_KEY, "collector credential not set");
            return Err(ForwardError::ServerMisconfigured);
        }
    };

    let client_id = non_empty(request.client_id.as_deref())
        .map(str::to_string)
        .unwrap_or_else(synthesize_client_id);

    let mut params = request.event_params.unwrap_or_default();
    params.insert(
        "engagement_time_msec".to_string(),
        Value::from(ENGAGEMENT_TIME_MSEC),
    );

    let payload = CollectorPayload {
        client_id,
        events: vec![CollectorEvent {
            name: event_name.clone(),
            params,
        }],
    };

    tracing::info!(
        event = %event_name,
        client_id = %payload.client_id,
        "sending event to collector"
    );

    let response = deps
        .collector
        .send(&measurement_id, &api_secret, &payload)
        .await
        .map_err(|err| {
            tracing::error!(event = %event_name, error = %err, "collector request failed");
            ForwardError::Transport(err)
        })?;

    if !(200..300).contains(&response.status) {
        tracing::error!(
            event = %event_name,
            status = response.status,
            "collector rejected event"
        );
        return Err(ForwardError::Upstream {
            status: response.status,
            body: response.body,
        });
    }

    tracing::info!(event = %event_name, "event tracked");
    Ok(TrackedEvent {
        event: event_name,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

/// Fallback identifier when the caller supplies none: unix millis plus a
/// short base36 suffix. Practically collision resistant, deliberately not
/// unique.
pub fn synthesize_client_id() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| char::from_digit(rng.gen_range(0..36), 36).unwrap_or('0'))
        .collect();
    format!("extension-{millis}-{suffix}")
}
