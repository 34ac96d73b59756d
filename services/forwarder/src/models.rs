use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body accepted on the tracking route. Every field is optional at the wire
/// level so that shape problems surface as validation failures instead of
/// deserialization faults; `forward::handle` enforces the required fields.
#[derive(Debug, Default, Deserialize)]
pub struct InboundEventRequest {
    #[serde(default)]
    pub measurement_id: Option<String>,
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub event_params: Option<Map<String, Value>>,
    /// Accepted from callers but not echoed back; the success timestamp is
    /// stamped server side.
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub client_id: Option<String>,
}

/// Measurement Protocol submission: one event per inbound request.
#[derive(Debug, Serialize)]
pub struct CollectorPayload {
    pub client_id: String,
    pub events: Vec<CollectorEvent>,
}

#[derive(Debug, Serialize)]
pub struct CollectorEvent {
    pub name: String,
    pub params: Map<String, Value>,
}

/// Successful forward outcome.
#[derive(Debug)]
pub struct TrackedEvent {
    pub event: String,
    pub timestamp: String,
}

/// Wire shape of the 200 response.
#[derive(Debug, Serialize)]
pub struct TrackResponse {
    pub success: bool,
    pub message: &'static str,
    pub event: String,
    pub timestamp: String,
}

impl From<TrackedEvent> for TrackResponse {
    fn from(tracked: TrackedEvent) -> Self {
        Self {
            success: true,
            message: "Event tracked successfully",
            event: tracked.event,
            timestamp: tracked.timestamp,
        }
    }
}

/// Wire shape of every error response; `details` appears only for upstream
/// and transport failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inbound_request_tolerates_missing_fields() {
        let request: InboundEventRequest = serde_json::from_str("{}").expect("parse");
        assert!(request.measurement_id.is_none());
        assert!(request.event_name.is_none());
        assert!(request.event_params.is_none());
        assert!(request.client_id.is_none());
    }

    #[test]
    fn error_body_omits_absent_details() {
        let body = ErrorBody {
            error: "Missing required fields",
            details: None,
        };
        let value = serde_json::to_value(&body).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({"error": "Missing required fields"})
        );
    }

    #[test]
    fn track_response_carries_success_envelope() {
        let response = TrackResponse::from(TrackedEvent {
            event: "page_view".to_string(),
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
        });
        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(value["success"], serde_json::json!(true));
        assert_eq!(value["message"], "Event tracked successfully");
        assert_eq!(value["event"], "page_view");
    }
}
