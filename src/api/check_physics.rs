//! Grading endpoint
//!
//! POST /api/check-physics with `{poemText, card, reasoning}`. Success relays
//! the model's parsed verdict with 200; every failure becomes
//! `{"error": <message>}` with 500.

use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;

use crate::error::ApiError;
use crate::schemas::CheckPhysicsRequest;
use crate::server::state::AppState;

/// POST /api/check-physics - Grade a physics explanation of a poem
///
/// The body is parsed as JSON whatever its `Content-Type`, so plain
/// `fetch(url, {body: JSON.stringify(..)})` callers sending `text/plain`
/// are accepted.
pub async fn check_physics(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request = parse_request(&body)?;

    tracing::debug!(
        card = %request.card,
        poem_chars = request.poem_text.chars().count(),
        reasoning_chars = request.reasoning.chars().count(),
        "Grading request received"
    );

    let verdict = state.judge.grade(&request).await?;

    Ok(Json(verdict))
}

fn parse_request(body: &[u8]) -> Result<CheckPhysicsRequest, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        ApiError::internal_error("invalid_request", format!("Invalid request body: {}", e))
    })
}
