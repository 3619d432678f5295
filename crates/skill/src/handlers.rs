//! Intent handlers and the ordered dispatcher.
//!
//! Each handler exposes a predicate and an action; [`Skill`] walks the
//! handler table in declaration order and the first matching predicate
//! wins. Predicates are not mutually exclusive, so the order below is a
//! contract, not a convenience. A request no predicate claims, or a
//! handler that returns an error, is answered by the infallible
//! fallback apology.

use async_trait::async_trait;
use counter_client::CounterClient;
use tracing::{error, warn};

use crate::envelope::{RequestEnvelope, RequestType};
use crate::parse::{normalize_thing_name, parse_add_utterance};
use crate::response::{ResponseBuilder, ResponseEnvelope};
use crate::{Result, SkillError};

pub const WELCOME_SPEECH: &str = "Welcome to the Alexa Skills Kit, you can say hello!";
pub const HELLO_SPEECH: &str = "Hello World!";
pub const HELP_SPEECH: &str = "You can say hello to me!";
pub const GOODBYE_SPEECH: &str = "Goodbye!";
pub const GET_ERROR_SPEECH: &str =
    "An error occurred for the get intent. You may want to try again later.";
pub const ADD_ERROR_SPEECH: &str =
    "An error occurred for the add intent. You may want to try again later.";
pub const ADD_GUIDANCE_SPEECH: &str =
    "This command requires both a number and what to count. For example, add 50 jumping jacks.";
pub const FALLBACK_SPEECH: &str = "Sorry, I can't understand the command. Please say again.";

const HELLO_CARD_TITLE: &str = "Hello World";
const GET_CARD_TITLE: &str = "Get current total";
const ADD_CARD_TITLE: &str = "Add intent detected";

/// One entry in the dispatch table.
#[async_trait]
pub trait RequestHandler: Send + Sync {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool;
    async fn handle(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope>;
}

fn is_intent(envelope: &RequestEnvelope, name: &str) -> bool {
    envelope.request_type() == RequestType::IntentRequest && envelope.intent_name() == Some(name)
}

struct LaunchHandler;

#[async_trait]
impl RequestHandler for LaunchHandler {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.request_type() == RequestType::LaunchRequest
    }

    async fn handle(&self, _envelope: &RequestEnvelope) -> Result<ResponseEnvelope> {
        Ok(ResponseBuilder::new()
            .speak(WELCOME_SPEECH)
            .reprompt(WELCOME_SPEECH)
            .simple_card(HELLO_CARD_TITLE, WELCOME_SPEECH)
            .build())
    }
}

struct HelloWorldHandler;

#[async_trait]
impl RequestHandler for HelloWorldHandler {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        is_intent(envelope, "HelloWorldIntent")
    }

    async fn handle(&self, _envelope: &RequestEnvelope) -> Result<ResponseEnvelope> {
        Ok(ResponseBuilder::new()
            .speak(HELLO_SPEECH)
            .simple_card(HELLO_CARD_TITLE, HELLO_SPEECH)
            .build())
    }
}

struct GetCountHandler {
    client: CounterClient,
}

#[async_trait]
impl RequestHandler for GetCountHandler {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        is_intent(envelope, "GetIntent")
    }

    async fn handle(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope> {
        let raw = envelope
            .slot_value("countedThing")
            .ok_or(SkillError::MissingSlot("countedThing"))?;
        let thing = normalize_thing_name(raw);

        // A count of zero is a real total; only a failed call or an
        // absent count field is an error.
        let speech = match self.client.fetch_total(thing).await {
            Ok(result) => format!("The {} total is {}.", thing, result.count),
            Err(e) => {
                warn!("get total for {} failed: {}", thing, e);
                GET_ERROR_SPEECH.to_string()
            }
        };

        Ok(ResponseBuilder::new()
            .speak(&speech)
            .simple_card(GET_CARD_TITLE, &speech)
            .build())
    }
}

struct AddCountHandler {
    client: CounterClient,
}

#[async_trait]
impl RequestHandler for AddCountHandler {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        is_intent(envelope, "AddIntent")
    }

    async fn handle(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope> {
        let raw = envelope
            .slot_value("whatToAdd")
            .ok_or(SkillError::MissingSlot("whatToAdd"))?;

        // Only "add X" (a single word) was spoken or heard.
        let Ok(add) = parse_add_utterance(raw) else {
            return Ok(ResponseBuilder::new()
                .speak(ADD_GUIDANCE_SPEECH)
                .simple_card(ADD_CARD_TITLE, ADD_GUIDANCE_SPEECH)
                .build());
        };

        // The add path keeps the thing name as spoken, article and all.
        let speech = match self.client.add_to_total(add.thing, add.num).await {
            Ok(result) => format!("Done. The {} total is now {}.", add.thing, result.count),
            Err(e) => {
                warn!("add {} to {} failed: {}", add.num, add.thing, e);
                ADD_ERROR_SPEECH.to_string()
            }
        };

        Ok(ResponseBuilder::new()
            .speak(&speech)
            .simple_card(ADD_CARD_TITLE, &speech)
            .build())
    }
}

struct HelpHandler;

#[async_trait]
impl RequestHandler for HelpHandler {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        is_intent(envelope, "AMAZON.HelpIntent")
    }

    async fn handle(&self, _envelope: &RequestEnvelope) -> Result<ResponseEnvelope> {
        Ok(ResponseBuilder::new()
            .speak(HELP_SPEECH)
            .reprompt(HELP_SPEECH)
            .simple_card(HELLO_CARD_TITLE, HELP_SPEECH)
            .build())
    }
}

struct CancelOrStopHandler;

#[async_trait]
impl RequestHandler for CancelOrStopHandler {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        is_intent(envelope, "AMAZON.CancelIntent") || is_intent(envelope, "AMAZON.StopIntent")
    }

    async fn handle(&self, _envelope: &RequestEnvelope) -> Result<ResponseEnvelope> {
        // The only handler that ends the session explicitly.
        Ok(ResponseBuilder::new()
            .speak(GOODBYE_SPEECH)
            .simple_card(HELLO_CARD_TITLE, GOODBYE_SPEECH)
            .end_session()
            .build())
    }
}

struct SessionEndedHandler;

#[async_trait]
impl RequestHandler for SessionEndedHandler {
    fn can_handle(&self, envelope: &RequestEnvelope) -> bool {
        envelope.request_type() == RequestType::SessionEndedRequest
    }

    async fn handle(&self, _envelope: &RequestEnvelope) -> Result<ResponseEnvelope> {
        // Platform-level cleanup hook; nothing to clean up and nothing
        // to say.
        Ok(ResponseBuilder::new().build())
    }
}

/// Fixed apology for requests nothing claimed and handlers that failed.
/// Static text and no I/O, so this tier itself cannot fail.
fn fallback_response() -> ResponseEnvelope {
    ResponseBuilder::new()
        .speak(FALLBACK_SPEECH)
        .reprompt(FALLBACK_SPEECH)
        .build()
}

/// The skill: an ordered handler table plus the fallback tier.
///
/// Stateless across requests; share one instance behind an `Arc` for
/// concurrent invocations.
pub struct Skill {
    handlers: Vec<Box<dyn RequestHandler>>,
}

impl Skill {
    pub fn new(client: CounterClient) -> Self {
        // Priority order is a binding contract.
        Self {
            handlers: vec![
                Box::new(LaunchHandler),
                Box::new(HelloWorldHandler),
                Box::new(GetCountHandler {
                    client: client.clone(),
                }),
                Box::new(AddCountHandler { client }),
                Box::new(HelpHandler),
                Box::new(CancelOrStopHandler),
                Box::new(SessionEndedHandler),
            ],
        }
    }

    /// Dispatch one request. Always produces a well-formed response,
    /// whatever the request or the remote service did.
    pub async fn handle_request(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        for handler in &self.handlers {
            if handler.can_handle(envelope) {
                return match handler.handle(envelope).await {
                    Ok(response) => response,
                    Err(e) => {
                        error!("handler failed: {}", e);
                        fallback_response()
                    }
                };
            }
        }

        warn!(
            "no handler matched request type {:?} (intent {:?})",
            envelope.request_type(),
            envelope.intent_name()
        );
        fallback_response()
    }
}
