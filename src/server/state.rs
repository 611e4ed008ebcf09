//! Application state container
//!
//! This module defines the shared application state that is passed
//! to all request handlers via Axum's state extraction.

use crate::config::Settings;
use crate::services::{CompletionBackend, DeepSeekClient, JudgeService};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
///
/// Cheaply cloneable and read-only; requests never share mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Grading pipeline
    pub judge: Arc<JudgeService>,

    /// Application start time (for uptime calculation)
    pub start_time: Instant,
}

impl AppState {
    /// Create a new application state backed by the DeepSeek HTTP client
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        tracing::debug!("Creating DeepSeek client");
        let backend = DeepSeekClient::new(&settings.upstream)?;
        Ok(Self::with_backend(settings, Arc::new(backend)))
    }

    /// Create application state around an arbitrary completion backend
    pub fn with_backend(settings: Settings, backend: Arc<dyn CompletionBackend>) -> Self {
        let judge = Arc::new(JudgeService::new(settings.upstream.clone(), backend));

        tracing::info!(
            api_key_configured = judge.has_api_key(),
            "Application state initialized successfully"
        );

        Self {
            settings: Arc::new(settings),
            judge,
            start_time: Instant::now(),
        }
    }

    /// Get the application uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
