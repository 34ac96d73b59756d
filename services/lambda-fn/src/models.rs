use serde::Serialize;

use relay_forwarder::error::ForwardError;

/// One function invocation as the hosting platform frames it: the HTTP
/// method plus the raw request body, nothing framework specific.
#[derive(Debug)]
pub struct LambdaEvent {
    pub http_method: String,
    pub body: Option<String>,
}

/// The function's reply; the route handler translates it back into
/// framework terms without touching its contents.
#[derive(Debug)]
pub struct LambdaResponse {
    pub status_code: u16,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: String,
}

const CORS_HEADERS: [(&'static str, &'static str); 3] = [
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "POST, OPTIONS"),
    ("access-control-allow-headers", "Content-Type"),
];

impl LambdaResponse {
    pub fn empty(status_code: u16) -> Self {
        Self {
            status_code,
            headers: CORS_HEADERS.to_vec(),
            body: String::new(),
        }
    }

    pub fn json<T: Serialize>(status_code: u16, body: &T) -> Self {
        let mut headers = CORS_HEADERS.to_vec();
        headers.push(("content-type", "application/json"));
        Self {
            status_code,
            headers,
            body: serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string()),
        }
    }

    pub fn error(err: &ForwardError) -> Self {
        Self::json(err.status(), &err.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_reply_carries_the_cors_headers() {
        let empty = LambdaResponse::empty(200);
        let error = LambdaResponse::error(&ForwardError::MethodNotAllowed);
        for reply in [&empty, &error] {
            for (name, value) in CORS_HEADERS {
                assert!(reply.headers.contains(&(name, value)));
            }
        }
        assert!(empty.body.is_empty());
        assert_eq!(error.status_code, 405);
    }
}
