//! Core error type for karaoke-core operations
//!
//! Provides the main `CoreError` enum shared by the tokenizer, the
//! alignment layer and the sync engine's configuration and time helpers.
//!
//! # Error Philosophy
//!
//! - Use `thiserror` for structured error handling (no `anyhow` bloat)
//! - Provide detailed context for debugging and user feedback
//! - Keep every engine-level failure local and recoverable

use core::fmt;
use thiserror::Error;

/// Main error type for karaoke-core operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Time value could not be parsed or formatted
    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    /// Numeric value parsing errors
    #[error("Invalid numeric value: {0}")]
    InvalidNumeric(String),

    /// Color format parsing errors
    #[error("Invalid color format: {0}")]
    InvalidColor(String),

    /// Configuration values out of their valid range
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoreError {
    /// Create configuration error from message
    pub fn config<T: fmt::Display>(message: T) -> Self {
        Self::Config(message.to_string())
    }

    /// Check if error is recoverable
    ///
    /// Every engine failure is a rejected value; the caller can correct the
    /// input and retry.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidTime(_)
            | Self::InvalidNumeric(_)
            | Self::InvalidColor(_)
            | Self::Config(_) => true,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, CoreError>;
