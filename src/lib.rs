//! Physics poem judge library
//!
//! Grades a player's physics explanation of a poem by relaying it, with a
//! fixed rubric, to a chat-completion API and returning the model's verdict.

// Public modules
pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod schemas;
pub mod server;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use error::{ApiError, JudgeError};
pub use server::{App, AppState};
pub use services::{CompletionBackend, DeepSeekClient, JudgeService};
