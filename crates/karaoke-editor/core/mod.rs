//! Core types and structures for the karaoke-editor
//!
//! This module contains the fundamental building blocks of the editor:
//! - `LyricSession`: lyric, marks, history, settings and clock of a project
//! - `MarkStore`: the ordered mark timestamps
//! - Error types for editor operations
//! - History management for undo/redo

pub mod errors;
pub mod history;
pub mod marks;
pub mod session;

#[cfg(feature = "multi-thread")]
pub mod thread_safety;

// Re-export commonly used types
pub use errors::{EditorError, Result};
pub use history::{CommandManager, HistoryEntry, HistoryStats, UndoStack, UndoStackConfig};
pub use marks::MarkStore;
pub use session::LyricSession;

#[cfg(feature = "multi-thread")]
pub use thread_safety::{SessionSnapshot, SyncSession};
