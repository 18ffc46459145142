//! Mark editing and playback layer for karaoke lyric timing
//!
//! `karaoke-editor` turns the pure sync engine of `karaoke-core` into an
//! authoring tool: marks are dropped while the song plays, corrected by
//! dragging, and every edit can be undone.
//!
//! # Features
//!
//! - **Mark commands**: add, remove, move and trim marks as invertible operations
//! - **Undo/redo**: bounded history, redo cleared by every new edit
//! - **Sessions**: lyric text, marks, settings and clock in one explicit context
//! - **Playback**: live preview on a clock and deterministic offline export
//! - **Projects**: key/value persistence of text, marks, audio path and style
//! - **Thread-safe**: optional shared session with detached snapshots
//!
//! # Example
//!
//! ```
//! use karaoke_editor::LyricSession;
//!
//! let mut session = LyricSession::new("ab\ncd");
//! for time in [1_000, 1_250, 1_500, 2_000, 2_250] {
//!     session.drop_mark_at(time).unwrap();
//! }
//! assert!(session.is_fully_marked());
//!
//! // Pull the second word's end a little earlier
//! session.drag_mark(2, 1_450).unwrap();
//! assert_eq!(session.evaluate_at(1_350).highlight_of(1), Some(0.5));
//!
//! // Changed my mind
//! session.undo().unwrap();
//! assert_eq!(session.marks().get(2), Some(1_500));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]

pub mod commands;
pub mod core;
pub mod playback;
pub mod project;

// Re-export karaoke-core types as first-class citizens
pub use karaoke_core::{
    evaluate, Lyrics, Millis, RenderDescriptor, SyncConfig, Token, TokenKind, VisibleLine,
};

// Public API exports
pub use commands::{
    AddMarkCommand, CommandResult, MarkCommand, MarkOperation, PopTrailingCommand,
    RemoveMarkCommand, SetMarkCommand,
};
pub use crate::core::{
    CommandManager, EditorError, HistoryEntry, HistoryStats, LyricSession, MarkStore, Result,
    UndoStack, UndoStackConfig,
};
pub use playback::{
    Clock, ExportConfig, ExportDriver, ExportSummary, FrameSource, LivePreview, ManualClock,
    Renderer,
};
pub use project::{DisplayStyle, ProjectData};

#[cfg(feature = "multi-thread")]
pub use crate::core::{SessionSnapshot, SyncSession};
