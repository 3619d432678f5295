//! Transport backends for the counter service.
//!
//! The service is reachable two ways: its own HTTP routes, or a
//! function-invocation endpoint that wraps it and nests the result under
//! `body.data`. Both decode to the same [`CounterResult`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::{CounterError, CounterResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// One transport to the counter service. Exactly one network call per
/// operation, no retries.
#[async_trait]
pub trait CounterBackend: Send + Sync {
    async fn get(&self, thing: &str) -> Result<CounterResult, CounterError>;
    async fn add(&self, thing: &str, num: &str) -> Result<CounterResult, CounterError>;
}

fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .expect("Failed to build HTTP client")
}

/// Pull the `count` field out of a direct-route response body.
fn decode_direct(value: &Value) -> Result<CounterResult, CounterError> {
    value
        .get("count")
        .and_then(Value::as_i64)
        .map(|count| CounterResult { count })
        .ok_or_else(|| CounterError::MalformedResponse("missing count field".to_string()))
}

/// Pull the `count` field out of an invocation result, which nests the
/// service response under `body.data`.
fn decode_invoke(value: &Value) -> Result<CounterResult, CounterError> {
    value
        .pointer("/body/data/count")
        .and_then(Value::as_i64)
        .map(|count| CounterResult { count })
        .ok_or_else(|| CounterError::MalformedResponse("missing body.data.count field".to_string()))
}

/// Payload for the function-invocation endpoint.
fn invoke_payload(action: &str, thing: &str, num: Option<&str>) -> Value {
    let mut payload = json!({
        "action": action,
        "thing": thing,
    });
    if let Some(num) = num {
        payload["num"] = Value::String(num.to_string());
    }
    payload
}

/// Backend talking to the counter service's own HTTP routes:
/// `GET {base}/get/{thing}` and `GET {base}/add/{num}/{thing}`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(),
        }
    }

    async fn fetch(&self, url: String) -> Result<CounterResult, CounterError> {
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CounterError::NotReachable {
                url: self.base_url.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CounterError::Api { status, body });
        }

        let value: Value = resp
            .json()
            .await
            .map_err(|e| CounterError::MalformedResponse(e.to_string()))?;
        decode_direct(&value)
    }
}

#[async_trait]
impl CounterBackend for HttpBackend {
    async fn get(&self, thing: &str) -> Result<CounterResult, CounterError> {
        let url = format!("{}/get/{}", self.base_url, urlencoding::encode(thing));
        self.fetch(url).await
    }

    async fn add(&self, thing: &str, num: &str) -> Result<CounterResult, CounterError> {
        let url = format!(
            "{}/add/{}/{}",
            self.base_url,
            urlencoding::encode(num),
            urlencoding::encode(thing)
        );
        self.fetch(url).await
    }
}

/// Backend invoking a named function endpoint with an
/// `{action, thing, num?}` JSON payload. The invocation result nests the
/// service response under `body.data`.
#[derive(Debug, Clone)]
pub struct InvokeBackend {
    invoke_url: String,
    client: reqwest::Client,
}

impl InvokeBackend {
    pub fn new(invoke_url: &str) -> Self {
        Self {
            invoke_url: invoke_url.trim_end_matches('/').to_string(),
            client: build_client(),
        }
    }

    async fn invoke(&self, payload: Value) -> Result<CounterResult, CounterError> {
        let resp = self
            .client
            .post(&self.invoke_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| CounterError::NotReachable {
                url: self.invoke_url.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CounterError::Api { status, body });
        }

        let value: Value = resp
            .json()
            .await
            .map_err(|e| CounterError::MalformedResponse(e.to_string()))?;
        decode_invoke(&value)
    }
}

#[async_trait]
impl CounterBackend for InvokeBackend {
    async fn get(&self, thing: &str) -> Result<CounterResult, CounterError> {
        self.invoke(invoke_payload("get", thing, None)).await
    }

    async fn add(&self, thing: &str, num: &str) -> Result<CounterResult, CounterError> {
        self.invoke(invoke_payload("add", thing, Some(num))).await
    }
}
