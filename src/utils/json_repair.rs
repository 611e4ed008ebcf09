//! Tolerant JSON parsing for model replies
//!
//! Models asked for strict JSON still occasionally wrap it in a markdown
//! code fence. The only recognized wrappings are triple-backtick fences,
//! with or without a `json` language tag.

use serde_json::Value;

/// Opening fence with language tag
const JSON_FENCE: &str = "```json";

/// Bare fence (opening or closing)
const FENCE: &str = "```";

/// Remove every code-fence marker and surrounding whitespace.
///
/// Text without fences is returned trimmed, otherwise unchanged.
pub fn strip_code_fences(text: &str) -> String {
    text.replace(JSON_FENCE, "")
        .replace(FENCE, "")
        .trim()
        .to_string()
}

/// Parse a model reply as JSON, retrying once with code fences stripped.
///
/// The error of the second attempt is returned if both fail.
pub fn recover_json(text: &str) -> Result<Value, serde_json::Error> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(first) => {
            tracing::debug!(error = %first, "Reply is not plain JSON, stripping code fences");
            serde_json::from_str(&strip_code_fences(text))
        }
    }
}
