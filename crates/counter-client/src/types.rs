use serde::{Deserialize, Serialize};

/// Decoded outcome of a counter service call.
///
/// `count` is whatever integer the service reported — zero and negative
/// values are valid totals. "Field absent" is a decode failure, never a
/// zero; the distinction matters to callers that speak the total back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterResult {
    pub count: i64,
}
