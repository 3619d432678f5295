//! Counter Client - Interface to the remote counter service
//!
//! This crate provides a typed client for the service that stores named
//! running totals ("pushups", "jumping jacks", ...). The skill handlers
//! consume it for the two domain operations:
//!
//! ```text
//! Skill handlers  -->  CounterClient  -->  counter service
//!                      (this crate)        (HTTP routes or invoke endpoint)
//! ```
//!
//! The service is the sole system of record for counts. Two transport
//! backends exist behind one trait: direct HTTP routes
//! (`GET /get/{thing}`, `GET /add/{num}/{thing}`) and a
//! function-invocation endpoint taking an `{action, thing, num?}` payload.
//! Calls are never retried: `add` is not idempotent, and a retry after an
//! ambiguous failure could double-apply the delta. Failures surface to the
//! caller, who asks the user to re-issue the command.

mod backend;
mod types;

pub use backend::{CounterBackend, HttpBackend, InvokeBackend};
pub use types::CounterResult;

use std::sync::Arc;

use tracing::debug;

/// Default counter service URL for local development
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8200";

/// Error types for counter service operations
#[derive(Debug, thiserror::Error)]
pub enum CounterError {
    #[error("counter service not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        source: reqwest::Error,
    },

    #[error("counter service returned error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed counter service response: {0}")]
    MalformedResponse(String),
}

/// Which transport the client talks to the counter service over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Direct HTTP routes on the service itself
    Http,
    /// A function-invocation endpoint wrapping the service
    Invoke,
}

/// Counter service connection settings, normally read from the environment
#[derive(Debug, Clone)]
pub struct CounterConfig {
    pub backend: BackendKind,
    pub service_url: String,
}

impl CounterConfig {
    /// Read `COUNTER_BACKEND` (`http` | `invoke`) and `COUNTER_SERVICE_URL`
    /// from the environment, falling back to the local-development defaults.
    pub fn from_env() -> Self {
        let backend = match std::env::var("COUNTER_BACKEND").as_deref() {
            Ok("invoke") => BackendKind::Invoke,
            _ => BackendKind::Http,
        };
        let service_url = std::env::var("COUNTER_SERVICE_URL")
            .unwrap_or_else(|_| DEFAULT_SERVICE_URL.to_string());

        Self {
            backend,
            service_url,
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Http,
            service_url: DEFAULT_SERVICE_URL.to_string(),
        }
    }
}

/// Client for the remote counter service
#[derive(Clone)]
pub struct CounterClient {
    backend: Arc<dyn CounterBackend>,
}

impl CounterClient {
    /// Client over the direct HTTP routes backend
    pub fn http(base_url: &str) -> Self {
        Self::from_backend(Arc::new(HttpBackend::new(base_url)))
    }

    /// Client over the function-invocation backend
    pub fn invoke(invoke_url: &str) -> Self {
        Self::from_backend(Arc::new(InvokeBackend::new(invoke_url)))
    }

    /// Client over an arbitrary backend. Tests use this to substitute a stub.
    pub fn from_backend(backend: Arc<dyn CounterBackend>) -> Self {
        Self { backend }
    }

    pub fn from_config(config: &CounterConfig) -> Self {
        match config.backend {
            BackendKind::Http => Self::http(&config.service_url),
            BackendKind::Invoke => Self::invoke(&config.service_url),
        }
    }

    /// Fetch the current total for a counted thing.
    pub async fn fetch_total(&self, thing: &str) -> Result<CounterResult, CounterError> {
        let result = self.backend.get(thing).await?;
        debug!("fetched total for {}: {}", thing, result.count);
        Ok(result)
    }

    /// Add to the total for a counted thing and return the new total.
    ///
    /// `num` is passed through to the service as spoken; the service is the
    /// one that rejects non-numeric input. Exactly one call is made — do not
    /// wrap this in a retry loop, the operation is not idempotent.
    pub async fn add_to_total(&self, thing: &str, num: &str) -> Result<CounterResult, CounterError> {
        let result = self.backend.add(thing, num).await?;
        debug!("added {} to {}: total now {}", num, thing, result.count);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_to_http() {
        let config = CounterConfig::default();
        assert_eq!(config.backend, BackendKind::Http);
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_client_from_config() {
        let config = CounterConfig {
            backend: BackendKind::Invoke,
            service_url: "http://192.168.1.100:9000".to_string(),
        };
        // Just exercises construction of each backend variant.
        let _ = CounterClient::from_config(&config);
        let _ = CounterClient::from_config(&CounterConfig::default());
    }
}
