//! Outbound response envelope and its builder.
//!
//! The platform expects a versioned envelope wrapping the speech, an
//! optional card for devices with a screen, an optional reprompt, and
//! the session-termination flag. Handlers assemble it with
//! [`ResponseBuilder`]; a fresh envelope is built per request and never
//! persisted.

use serde::Serialize;

/// The envelope handed back to the voice platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: ResponsePayload,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

/// Synthesized speech content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
}

/// Visual companion to the spoken response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Card {
    Simple { title: String, content: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

impl ResponseEnvelope {
    /// The spoken text, if the response speaks at all.
    pub fn speech_text(&self) -> Option<&str> {
        match &self.response.output_speech {
            Some(OutputSpeech::PlainText { text }) => Some(text),
            None => None,
        }
    }

    pub fn card_title(&self) -> Option<&str> {
        match &self.response.card {
            Some(Card::Simple { title, .. }) => Some(title),
            None => None,
        }
    }

    pub fn ends_session(&self) -> bool {
        self.response.should_end_session
    }
}

/// Builder mirroring the speak/reprompt/card/end-session chain the
/// platform SDKs expose.
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    payload: ResponsePayload,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speak(mut self, text: &str) -> Self {
        self.payload.output_speech = Some(OutputSpeech::PlainText {
            text: text.to_string(),
        });
        self
    }

    pub fn reprompt(mut self, text: &str) -> Self {
        self.payload.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::PlainText {
                text: text.to_string(),
            },
        });
        self
    }

    pub fn simple_card(mut self, title: &str, content: &str) -> Self {
        self.payload.card = Some(Card::Simple {
            title: title.to_string(),
            content: content.to_string(),
        });
        self
    }

    pub fn end_session(mut self) -> Self {
        self.payload.should_end_session = true;
        self
    }

    pub fn build(self) -> ResponseEnvelope {
        ResponseEnvelope {
            version: "1.0".to_string(),
            response: self.payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_full_response_wire_shape() {
        let envelope = ResponseBuilder::new()
            .speak("Goodbye!")
            .simple_card("Hello World", "Goodbye!")
            .end_session()
            .build();

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "version": "1.0",
                "response": {
                    "outputSpeech": {"type": "PlainText", "text": "Goodbye!"},
                    "card": {"type": "Simple", "title": "Hello World", "content": "Goodbye!"},
                    "shouldEndSession": true
                }
            })
        );
    }

    #[test]
    fn test_reprompt_wire_shape() {
        let envelope = ResponseBuilder::new()
            .speak("You can say hello to me!")
            .reprompt("You can say hello to me!")
            .build();

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value["response"]["reprompt"]["outputSpeech"]["text"],
            "You can say hello to me!"
        );
        assert_eq!(value["response"]["shouldEndSession"], false);
    }

    #[test]
    fn test_empty_response_omits_optional_fields() {
        let envelope = ResponseBuilder::new().build();
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "version": "1.0",
                "response": {"shouldEndSession": false}
            })
        );
        assert_eq!(envelope.speech_text(), None);
        assert_eq!(envelope.card_title(), None);
        assert!(!envelope.ends_session());
    }
}
