use std::future::Future;
use std::pin::Pin;

use reqwest::Client;

use crate::models::CollectorPayload;

/// Measurement Protocol collection endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.google-analytics.com/mp/collect";

/// The upstream outcome as the core sees it: status plus body text. A
/// transport failure never produces one of these.
#[derive(Debug)]
pub struct CollectorResponse {
    pub status: u16,
    pub body: String,
}

/// One-shot delivery to the collector. Boxed futures keep the trait object
/// safe behind `Arc<dyn CollectorClient>`.
pub trait CollectorClient: Send + Sync {
    fn send<'a>(
        &'a self,
        measurement_id: &'a str,
        api_secret: &'a str,
        payload: &'a CollectorPayload,
    ) -> Pin<Box<dyn Future<Output = Result<CollectorResponse, String>> + Send + 'a>>;
}

/// Production client: POSTs the payload as JSON with the measurement id and
/// secret in the query string.
pub struct GaCollector {
    client: Client,
    endpoint: String,
}

impl GaCollector {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

impl CollectorClient for GaCollector {
    fn send<'a>(
        &'a self,
        measurement_id: &'a str,
        api_secret: &'a str,
        payload: &'a CollectorPayload,
    ) -> Pin<Box<dyn Future<Output = Result<CollectorResponse, String>> + Send + 'a>> {
        Box::pin(async move {
            let response = self
                .client
                .post(&self.endpoint)
                .query(&[
                    ("measurement_id", measurement_id),
                    ("api_secret", api_secret),
                ])
                .json(payload)
                .send()
                .await
                .map_err(|err| err.to_string())?;

            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Ok(CollectorResponse { status, body })
        })
    }
}
