//! # Counter Skill Core
//!
//! Voice-skill backend for keeping running totals of counted things
//! ("add 50 jumping jacks", "what's my pushups total"). The hosting
//! voice platform does the listening and speaking; this crate takes the
//! platform's request envelope, routes it through an ordered handler
//! table, talks to the remote counter service where a handler needs it,
//! and produces the spoken response plus its companion card.
//!
//! ## Architecture
//!
//! ```text
//! platform envelope
//!        │
//!   ┌────▼────┐   first matching predicate wins
//!   │  Skill  │──────────────────────────────────┐
//!   └────┬────┘                                  │
//!        │ Launch / Hello / Get / Add / Help /   │ no match or
//!        │ CancelOrStop / SessionEnded           │ handler error
//!   ┌────▼────────────┐                     ┌────▼─────┐
//!   │ RequestHandler  │──▶ CounterClient    │ fallback │
//!   └────┬────────────┘    (get/add only)   └────┬─────┘
//!        │                                       │
//!   ┌────▼───────────────────────────────────────▼────┐
//!   │              ResponseEnvelope                   │
//!   └─────────────────────────────────────────────────┘
//! ```
//!
//! Nothing persists across requests; the counter service owns the
//! stored totals.

pub mod envelope;
pub mod handlers;
pub mod parse;
pub mod response;


pub use envelope::{Intent, Request, RequestEnvelope, RequestType, Slot};
pub use handlers::{RequestHandler, Skill};
pub use parse::{normalize_thing_name, parse_add_utterance, AddRequest, MalformedUtterance};
pub use response::{Card, OutputSpeech, ResponseBuilder, ResponseEnvelope};

/// Error types for skill request handling.
///
/// Remote-service and utterance problems are absorbed inside the get/add
/// handlers and spoken back as guidance; only conditions the handler
/// cannot answer (a request shape it was promised but not given) escape
/// here, and the dispatcher answers those with the fallback apology.
#[derive(Debug, thiserror::Error)]
pub enum SkillError {
    #[error("intent request carried no intent")]
    MissingIntent,

    #[error("missing slot value: {0}")]
    MissingSlot(&'static str),
}

pub type Result<T> = std::result::Result<T, SkillError>;
