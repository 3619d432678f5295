//! HTTP surface for the skill: the envelope endpoint the voice platform
//! posts to, plus a health probe.

use std::sync::Arc;

use axum::{
    extract::State,
    response::Json as ResponseJson,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use skill::{RequestEnvelope, ResponseEnvelope, Skill};

/// One platform request in, one response out. Every parseable envelope
/// gets a well-formed response, whatever happened downstream.
pub async fn handle_request(
    State(skill): State<Arc<Skill>>,
    Json(envelope): Json<RequestEnvelope>,
) -> ResponseJson<ResponseEnvelope> {
    ResponseJson(skill.handle_request(&envelope).await)
}

pub async fn health_check() -> ResponseJson<Value> {
    ResponseJson(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub fn router(skill: Arc<Skill>) -> Router {
    Router::new()
        .route("/", post(handle_request))
        .route("/health", get(health_check))
        .with_state(skill)
}
