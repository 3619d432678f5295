//! Inbound request envelope, as delivered by the voice platform.
//!
//! Only the fields the dispatcher reads are modeled: the request type,
//! the intent name, and the raw slot values. Everything else in the
//! envelope (session state, device context) belongs to the platform and
//! is carried opaquely or ignored.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// One platform request. Lifetime is a single request/response cycle.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default)]
    pub version: Option<String>,
    /// Opaque platform session block, not interpreted here.
    #[serde(default)]
    pub session: Option<Value>,
    pub request: Request,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    #[serde(rename = "type")]
    pub request_type: RequestType,
    #[serde(default)]
    pub request_id: Option<String>,
    /// Present only when `request_type` is [`RequestType::IntentRequest`].
    #[serde(default)]
    pub intent: Option<Intent>,
}

/// Request types the dispatcher recognizes. Anything else deserializes
/// to `Unknown` and falls through to the fallback tier rather than
/// failing at the parse boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RequestType {
    LaunchRequest,
    IntentRequest,
    SessionEndedRequest,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

/// A named parameter extracted from user speech, delivered raw.
#[derive(Debug, Clone, Deserialize)]
pub struct Slot {
    #[serde(default)]
    pub value: Option<String>,
}

impl RequestEnvelope {
    pub fn request_type(&self) -> RequestType {
        self.request.request_type
    }

    pub fn intent_name(&self) -> Option<&str> {
        self.request.intent.as_ref().map(|i| i.name.as_str())
    }

    /// Raw value of a named slot, if the intent carries one.
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.request
            .intent
            .as_ref()
            .and_then(|i| i.slots.get(name))
            .and_then(|s| s.value.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_intent_request() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "version": "1.0",
            "session": {"new": false},
            "request": {
                "type": "IntentRequest",
                "requestId": "req-1",
                "intent": {
                    "name": "GetIntent",
                    "slots": {
                        "countedThing": {"value": "the pushups"}
                    }
                }
            }
        }))
        .unwrap();

        assert_eq!(envelope.request_type(), RequestType::IntentRequest);
        assert_eq!(envelope.intent_name(), Some("GetIntent"));
        assert_eq!(envelope.slot_value("countedThing"), Some("the pushups"));
        assert_eq!(envelope.slot_value("whatToAdd"), None);
    }

    #[test]
    fn test_deserialize_launch_request() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "request": {"type": "LaunchRequest"}
        }))
        .unwrap();

        assert_eq!(envelope.request_type(), RequestType::LaunchRequest);
        assert_eq!(envelope.intent_name(), None);
    }

    #[test]
    fn test_unrecognized_request_type_is_unknown() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "request": {"type": "System.ExceptionEncountered"}
        }))
        .unwrap();

        assert_eq!(envelope.request_type(), RequestType::Unknown);
    }

    #[test]
    fn test_slot_with_no_value() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "request": {
                "type": "IntentRequest",
                "intent": {
                    "name": "GetIntent",
                    "slots": {"countedThing": {}}
                }
            }
        }))
        .unwrap();

        assert_eq!(envelope.slot_value("countedThing"), None);
    }
}
