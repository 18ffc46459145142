//! Error types for the karaoke-editor crate
//!
//! Provides the main `EditorError` enum that wraps `CoreError` from
//! karaoke-core and adds editing, persistence and playback failures.
//! Follows the same philosophy as core:
//! - Use thiserror for structured error handling (no anyhow)
//! - Rejected commands are values, never panics
//! - Every failure leaves the session in its previous state

use core::fmt;
use karaoke_core::{CoreError, Millis};
use thiserror::Error;

/// Main error type for karaoke-editor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Errors from karaoke-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// New mark does not come after the last one
    #[error("Mark at {time} ms must come after the last mark at {last} ms")]
    MarkOutOfOrder { time: Millis, last: Millis },

    /// Mark index past the end of the store
    #[error("Mark index out of bounds: {index} (mark count: {len})")]
    MarkIndexOutOfBounds { index: usize, len: usize },

    /// Moved mark would reach or pass a neighbouring mark
    #[error("Mark {index} cannot move to {time} ms without reaching a neighbouring mark")]
    MarkOutOfRange { index: usize, time: Millis },

    /// No operation to undo
    #[error("Nothing to undo")]
    NothingToUndo,

    /// No operation to redo
    #[error("Nothing to redo")]
    NothingToRedo,

    /// Lock poisoned or unavailable (multi-thread feature)
    #[error("Thread safety error: {message}")]
    ThreadSafetyError { message: String },

    /// Project data could not be read
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    /// Required project key is absent
    #[error("Missing project key: {key}")]
    MissingKey { key: String },

    /// Offline export stopped by its caller
    #[error("Export cancelled at frame {frame}")]
    ExportCancelled { frame: u64 },
}

impl EditorError {
    /// Create a new persistence error
    pub fn persistence<T: fmt::Display>(message: T) -> Self {
        Self::Persistence {
            message: message.to_string(),
        }
    }

    /// Create a new thread safety error
    pub fn thread_safety<T: fmt::Display>(message: T) -> Self {
        Self::ThreadSafetyError {
            message: message.to_string(),
        }
    }

    /// Check if error is recoverable
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Core(core_err) => core_err.is_recoverable(),
            Self::MarkOutOfOrder { .. }
            | Self::MarkIndexOutOfBounds { .. }
            | Self::MarkOutOfRange { .. }
            | Self::NothingToUndo
            | Self::NothingToRedo
            | Self::Persistence { .. }
            | Self::MissingKey { .. }
            | Self::ExportCancelled { .. } => true,
            Self::ThreadSafetyError { .. } => false,
        }
    }

    /// Check if this is a history-related error
    #[must_use]
    pub const fn is_history_error(&self) -> bool {
        matches!(self, Self::NothingToUndo | Self::NothingToRedo)
    }

    /// Check if this is a rejected mark edit
    #[must_use]
    pub const fn is_mark_error(&self) -> bool {
        matches!(
            self,
            Self::MarkOutOfOrder { .. }
                | Self::MarkIndexOutOfBounds { .. }
                | Self::MarkOutOfRange { .. }
        )
    }

    /// Get the underlying core error if this wraps one
    #[must_use]
    pub const fn as_core_error(&self) -> Option<&CoreError> {
        match self {
            Self::Core(core_err) => Some(core_err),
            _ => None,
        }
    }
}

/// Result type alias for editor operations
pub type Result<T> = core::result::Result<T, EditorError>;
