//! Utterance parsing for the two domain intents.
//!
//! Slot values arrive as raw transcribed speech, so the rules here are
//! deliberately small and literal. The get path strips a leading
//! article; the add path splits "number, then everything else" at the
//! first space and leaves the name untouched.

/// Strip exactly one leading `"the "` from a counted-thing name.
///
/// Byte-for-byte prefix match only: `"thesaurus"` and mid-string
/// articles pass through unchanged, and `"the the gym"` loses a single
/// article. No case-folding, no whitespace trimming.
pub fn normalize_thing_name(raw: &str) -> &str {
    raw.strip_prefix("the ").unwrap_or(raw)
}

/// A parsed add utterance: the spoken delta and what it applies to.
///
/// `num` is not validated as numeric here; it is forwarded to the
/// counter service as spoken, and the service rejects what it cannot
/// use. `thing` is everything after the first space, unsplit and
/// un-normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddRequest<'a> {
    pub num: &'a str,
    pub thing: &'a str,
}

/// The add utterance held only one word, so there is no number/name
/// split to make. Surfaced to the user as a guided prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("add utterance needs both a number and a thing to count")]
pub struct MalformedUtterance;

/// Split an add utterance of the form `"<number> <name...>"` at the
/// first space.
pub fn parse_add_utterance(raw: &str) -> Result<AddRequest<'_>, MalformedUtterance> {
    let (num, thing) = raw.split_once(' ').ok_or(MalformedUtterance)?;
    Ok(AddRequest { num, thing })
}
