//! Business logic services module
//!
//! Contains prompt assembly, the chat-completion backend, and the grading
//! pipeline built on them.

pub mod completion;
pub mod judge;
pub mod prompt;

pub use completion::{CompletionBackend, DeepSeekClient};
pub use judge::JudgeService;
