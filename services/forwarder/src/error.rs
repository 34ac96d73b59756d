use crate::models::ErrorBody;

/// Failure taxonomy for one forwarding attempt. Nothing here is retried; each
/// variant maps straight to an HTTP status and JSON body.
#[derive(Debug)]
pub enum ForwardError {
    /// `measurement_id` or `event_name` missing or empty.
    InvalidRequest,
    /// Wrong HTTP verb on the tracking route.
    MethodNotAllowed,
    /// Collector credential absent from configuration; operator error.
    ServerMisconfigured,
    /// Collector answered outside the success range.
    Upstream { status: u16, body: String },
    /// The outbound call itself never completed.
    Transport(String),
}

impl ForwardError {
    pub fn status(&self) -> u16 {
        match self {
            ForwardError::InvalidRequest => 400,
            ForwardError::MethodNotAllowed => 405,
            ForwardError::ServerMisconfigured
            | ForwardError::Upstream { .. }
            | ForwardError::Transport(_) => 500,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            ForwardError::InvalidRequest => ErrorBody {
                error: "Missing required fields",
                details: None,
            },
            ForwardError::MethodNotAllowed => ErrorBody {
                error: "Method not allowed",
                details: None,
            },
            ForwardError::ServerMisconfigured => ErrorBody {
                error: "Server configuration error",
                details: None,
            },
            ForwardError::Upstream { status, body } => ErrorBody {
                error: "Failed to track event",
                details: Some(format!("collector request failed: {status} - {body}")),
            },
            ForwardError::Transport(message) => ErrorBody {
                error: "Failed to track event",
                details: Some(message.clone()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ForwardError;

    #[test]
    fn status_mapping() {
        assert_eq!(ForwardError::InvalidRequest.status(), 400);
        assert_eq!(ForwardError::MethodNotAllowed.status(), 405);
        assert_eq!(ForwardError::ServerMisconfigured.status(), 500);
        assert_eq!(
            ForwardError::Upstream {
                status: 400,
                body: "bad request".to_string()
            }
            .status(),
            500
        );
        assert_eq!(ForwardError::Transport("refused".to_string()).status(), 500);
    }

    #[test]
    fn client_errors_have_no_details() {
        assert!(ForwardError::InvalidRequest.body().details.is_none());
        assert!(ForwardError::MethodNotAllowed.body().details.is_none());
        assert!(ForwardError::ServerMisconfigured.body().details.is_none());
    }

    #[test]
    fn upstream_details_embed_status_and_body() {
        let err = ForwardError::Upstream {
            status: 400,
            body: "bad request".to_string(),
        };
        let body = err.body();
        assert_eq!(body.error, "Failed to track event");
        let details = body.details.expect("details");
        assert!(details.contains("400"));
        assert!(details.contains("bad request"));
    }

    #[test]
    fn transport_details_carry_the_underlying_message() {
        let err = ForwardError::Transport("connection refused".to_string());
        let body = err.body();
        assert_eq!(body.error, "Failed to track event");
        assert_eq!(body.details.as_deref(), Some("connection refused"));
    }
}
