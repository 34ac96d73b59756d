use std::sync::Arc;

use relay_common::env_or;
use relay_forwarder::collector::{GaCollector, DEFAULT_ENDPOINT};
use relay_forwarder::config::EnvConfig;
use relay_forwarder::forward::Deps;

#[derive(Clone)]
pub struct AppState {
    pub deps: Deps,
}

impl AppState {
    /// One shared outbound client per process; the secret itself is read per
    /// invocation through the `ConfigSource` capability.
    pub fn from_env() -> Self {
        let endpoint = env_or("COLLECTOR_ENDPOINT", DEFAULT_ENDPOINT.to_string());
        Self {
            deps: Deps {
                config: Arc::new(EnvConfig),
                collector: Arc::new(GaCollector::new(reqwest::Client::new(), endpoint)),
            },
        }
    }
}
