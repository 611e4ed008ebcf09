//! Error handling module

pub mod types;

pub use types::{ApiError, JudgeError, GENERIC_UPSTREAM_ERROR, MISSING_API_KEY_MESSAGE};
