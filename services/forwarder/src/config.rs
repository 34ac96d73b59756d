use std::env;

/// Key of the collector credential in process configuration.
pub const API_SECRET_KEY: &str = "GA4_API_SECRET";

/// Read-only configuration lookup, injected so the core can be exercised
/// without touching the process environment.
pub trait ConfigSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Production source backed by environment variables. An empty value counts
/// as unset.
pub struct EnvConfig;

impl ConfigSource for EnvConfig {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok().filter(|value| !value.is_empty())
    }
}
