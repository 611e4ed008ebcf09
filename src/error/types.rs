//! Error types
//!
//! `JudgeError` is the internal taxonomy of the grading pipeline. `ApiError`
//! is the HTTP boundary: every failure leaves the service as
//! `{"error": <message>}` with status 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Generic label used when the upstream error body carries no message
pub const GENERIC_UPSTREAM_ERROR: &str = "DeepSeek API Error";

/// Message returned when no upstream credential is configured
pub const MISSING_API_KEY_MESSAGE: &str = "Server Configuration Error: API Key missing";

/// Errors raised while grading a single request
#[derive(Error, Debug)]
pub enum JudgeError {
    #[error("{}", MISSING_API_KEY_MESSAGE)]
    MissingApiKey,

    /// Non-2xx upstream response; carries the upstream's message or the generic label
    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// The completion content is not JSON, even after fence-stripping
    #[error("{0}")]
    InvalidVerdict(#[from] serde_json::Error),
}

impl JudgeError {
    /// Short machine-readable label, recorded in logs only
    pub fn kind(&self) -> &'static str {
        match self {
            JudgeError::MissingApiKey => "configuration_error",
            JudgeError::Upstream { .. } => "upstream_error",
            JudgeError::Transport(_) => "transport_error",
            JudgeError::MalformedResponse(_) => "malformed_response",
            JudgeError::InvalidVerdict(_) => "verdict_parse_error",
        }
    }

    /// HTTP status reported by the upstream, for upstream API errors
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            JudgeError::Upstream { status, .. } => Some(*status),
            JudgeError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// HTTP-facing error
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
    pub upstream_status: Option<u16>,
}

impl ApiError {
    pub fn internal_error(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind,
            message: message.into(),
            upstream_status: None,
        }
    }
}

impl From<JudgeError> for ApiError {
    fn from(err: JudgeError) -> Self {
        Self {
            upstream_status: err.upstream_status(),
            ..Self::internal_error(err.kind(), err.to_string())
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(
            kind = self.kind,
            status = self.status.as_u16(),
            upstream_status = ?self.upstream_status,
            error = %self.message,
            "Grading request failed"
        );

        let body = Json(ErrorResponse {
            error: self.message,
        });

        (self.status, body).into_response()
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}
