//! Application settings and configuration
//!
//! This module provides configuration management for the application,
//! loading settings from environment variables with sensible defaults.

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Default upstream base URL (DeepSeek, OpenAI-compatible)
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.deepseek.com";

/// Default upstream model identifier
pub const DEFAULT_UPSTREAM_MODEL: &str = "deepseek-chat";

/// Default sampling temperature for grading
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Application environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[value(alias = "dev")]
    Development,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => anyhow::bail!(
                "Invalid environment: {}. Expected: development, staging, or production",
                s
            ),
        }
    }
}

/// Upstream chat-completion API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Bearer credential for the upstream API.
    /// Checked for presence on every grading request, never validated locally.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Base URL; `/chat/completions` is appended
    pub base_url: String,

    pub model: String,

    pub temperature: f32,

    /// Client timeout for the outbound call. `None` waits indefinitely.
    pub timeout_seconds: Option<u64>,
}

impl UpstreamConfig {
    /// Whether a non-empty credential is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full URL of the chat-completion endpoint
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_UPSTREAM_BASE_URL.to_string(),
            model: DEFAULT_UPSTREAM_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout_seconds: None,
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    // App settings
    pub app_name: String,
    pub app_version: String,
    pub environment: Environment,
    pub log_level: String,

    // Server settings
    pub host: String,
    pub port: u16,

    // Upstream settings
    pub upstream: UpstreamConfig,
}

impl Settings {
    /// Load settings from environment variables with defaults
    pub fn load() -> Result<Self> {
        // Load .env file if it exists (ignored in production typically)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from a variable lookup, applying defaults and validation
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let timeout_seconds = lookup("UPSTREAM_TIMEOUT_SECONDS")
            .map(|raw| {
                raw.parse::<u64>()
                    .context("Invalid UPSTREAM_TIMEOUT_SECONDS value")
            })
            .transpose()?;

        let settings = Self {
            // App settings
            app_name: var_or("APP_NAME", "physics-poem-judge"),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: var_or("ENVIRONMENT", "development")
                .parse()
                .unwrap_or_default(),
            log_level: var_or("LOG_LEVEL", "info"),

            // Server settings
            host: var_or("HOST", "0.0.0.0"),
            port: var_or("PORT", "3000")
                .parse()
                .context("Invalid PORT value")?,

            // Upstream settings
            upstream: UpstreamConfig {
                api_key: lookup("DEEPSEEK_API_KEY").filter(|k| !k.is_empty()),
                base_url: var_or("DEEPSEEK_BASE_URL", DEFAULT_UPSTREAM_BASE_URL),
                model: var_or("DEEPSEEK_MODEL", DEFAULT_UPSTREAM_MODEL),
                temperature: var_or("JUDGE_TEMPERATURE", "0.3")
                    .parse()
                    .context("Invalid JUDGE_TEMPERATURE value")?,
                timeout_seconds,
            },
        };

        // Validate settings
        settings.validate()?;

        Ok(settings)
    }

    /// Validate settings
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("Port cannot be 0");
        }

        if !(0.0..=2.0).contains(&self.upstream.temperature) {
            anyhow::bail!(
                "JUDGE_TEMPERATURE must be between 0.0 and 2.0, got {}",
                self.upstream.temperature
            );
        }

        if self.upstream.timeout_seconds == Some(0) {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECONDS must be > 0");
        }

        // The key is a request-time requirement; startup only warns
        if !self.upstream.has_api_key() {
            tracing::warn!(
                "DEEPSEEK_API_KEY is not set; grading requests will fail with a configuration error"
            );
        }

        Ok(())
    }

    /// Get the server address string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "physics-poem-judge".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: Environment::Development,
            log_level: "info".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            upstream: UpstreamConfig::default(),
        }
    }
}
