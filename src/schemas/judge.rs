//! Grading endpoint schema definitions

use serde::{Deserialize, Serialize};

/// Inbound grading request: `{poemText, card, reasoning}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPhysicsRequest {
    /// The poem line(s) the explanation refers to
    pub poem_text: String,

    /// Physics concept label on the played card
    pub card: String,

    /// The player's free-text explanation
    pub reasoning: String,
}

/// Verdict shape the model is instructed to produce.
///
/// Used for logging only; the response body relays whatever the model
/// returned once it parses as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub pass: bool,
    pub score: i64,
    pub comment: String,
}

impl Verdict {
    /// Read a parsed reply as a verdict, if it has the expected shape
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        serde_json::from_value(value.clone()).ok()
    }

    /// Whether the score lies in the documented 0..=100 range
    pub fn score_in_range(&self) -> bool {
        (0..=100).contains(&self.score)
    }
}
