//! Centralized error types for the station.
//!
//! Each error carries a short `user_message()` that fits the 296 px wide
//! panel, alongside the full `Display` text that goes to the log.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Panel error: {0}")]
    Display(String),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Short message suitable for the error screen.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Display(_) => "Panel Failed!",
            AppError::Other(_) => "Error!",
        }
    }
}

/// Network association errors. Any of these ends the session.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Link to {host} not up after {secs}s")]
    LinkTimeout { host: String, secs: u64 },
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::LinkTimeout { .. } => "WiFi Failed!",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Bad Config!",
            ConfigError::ParseError(_) => "Bad Config!",
        }
    }
}
