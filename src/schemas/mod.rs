//! API schema definitions
//!
//! Request and response types for the grading endpoint and the upstream
//! chat-completion API.

pub mod deepseek;
pub mod judge;

pub use judge::{CheckPhysicsRequest, Verdict};
