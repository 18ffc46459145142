//! Command system for mark edits
//!
//! Every change to a [`MarkStore`] goes through a [`MarkCommand`]. Executing
//! a command yields a [`MarkOperation`] that captures whatever prior state
//! is needed to invert it; the history stores those operations, so undo
//! and redo never look at the lyric itself.

pub mod mark_commands;

pub use mark_commands::{AddMarkCommand, PopTrailingCommand, RemoveMarkCommand, SetMarkCommand};

use crate::core::{EditorError, MarkStore, Result};
use karaoke_core::Millis;

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Recorded operation, `None` when the command changed nothing
    pub operation: Option<MarkOperation>,

    /// Index of the mark that was added, removed or moved
    pub affected_index: Option<usize>,

    /// Optional message about the operation
    pub message: Option<String>,
}

impl CommandResult {
    /// Result of a command that changed marks
    #[must_use]
    pub const fn changed(operation: MarkOperation, affected_index: Option<usize>) -> Self {
        Self {
            operation: Some(operation),
            affected_index,
            message: None,
        }
    }

    /// Result of a command that left the store as it was
    #[must_use]
    pub const fn unchanged() -> Self {
        Self {
            operation: None,
            affected_index: None,
            message: None,
        }
    }

    /// Add a message to the result
    #[must_use]
    pub fn with_message(mut self, message: String) -> Self {
        self.message = Some(message);
        self
    }

    /// Check if the mark store changed
    #[must_use]
    pub const fn marks_changed(&self) -> bool {
        self.operation.is_some()
    }
}

/// Trait for mark edits that can be executed and recorded for undo
///
/// A command checks its preconditions before touching the store: when
/// `execute` returns an error the store is unchanged.
///
/// # Examples
///
/// ```
/// use karaoke_editor::{AddMarkCommand, MarkCommand, MarkStore};
///
/// let mut marks = MarkStore::new();
/// let result = AddMarkCommand::new(1_200).execute(&mut marks).unwrap();
/// assert!(result.marks_changed());
/// assert_eq!(marks.as_slice(), &[1_200]);
///
/// // not after the last mark: rejected, store untouched
/// assert!(AddMarkCommand::new(1_200).execute(&mut marks).is_err());
/// assert_eq!(marks.len(), 1);
/// ```
pub trait MarkCommand: core::fmt::Debug + Send + Sync {
    /// Execute the command on the given store
    ///
    /// # Errors
    ///
    /// Returns an error when a precondition fails; the store is untouched.
    fn execute(&self, marks: &mut MarkStore) -> Result<CommandResult>;

    /// Get a human-readable description of the command
    fn description(&self) -> &str;
}

/// Invertible record of an executed mark edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOperation {
    /// Mark appended at the end
    Add { time: Millis },
    /// Mark removed from `index`
    Remove { index: usize, time: Millis },
    /// Mark at `index` moved from `old` to `new`
    Set { index: usize, old: Millis, new: Millis },
    /// Trailing marks removed, last mark first
    PopTrailing { removed: Vec<Millis> },
}

impl MarkOperation {
    /// Perform the operation again
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MarkIndexOutOfBounds`] when the store
    /// no longer has the shape the operation was recorded against.
    pub fn apply(&self, marks: &mut MarkStore) -> Result<()> {
        match self {
            Self::Add { time } => marks.push(*time),
            Self::Remove { index, .. } => {
                marks.remove(*index)?;
            }
            Self::Set { index, new, .. } => {
                marks.replace(*index, *new)?;
            }
            Self::PopTrailing { removed } => {
                if removed.len() > marks.len() {
                    return Err(EditorError::MarkIndexOutOfBounds {
                        index: removed.len(),
                        len: marks.len(),
                    });
                }
                for _ in removed {
                    marks.pop();
                }
            }
        }
        Ok(())
    }

    /// Undo the operation
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MarkIndexOutOfBounds`] when the store
    /// no longer has the shape the operation left behind.
    pub fn revert(&self, marks: &mut MarkStore) -> Result<()> {
        match self {
            Self::Add { .. } => {
                marks.pop().ok_or(EditorError::MarkIndexOutOfBounds {
                    index: 0,
                    len: 0,
                })?;
            }
            Self::Remove { index, time } => marks.insert(*index, *time)?,
            Self::Set { index, old, .. } => {
                marks.replace(*index, *old)?;
            }
            Self::PopTrailing { removed } => {
                for &time in removed.iter().rev() {
                    marks.push(time);
                }
            }
        }
        Ok(())
    }

    /// Approximate heap and inline size of the record
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        let heap = match self {
            Self::PopTrailing { removed } => removed.len() * core::mem::size_of::<Millis>(),
            Self::Add { .. } | Self::Remove { .. } | Self::Set { .. } => 0,
        };
        core::mem::size_of::<Self>() + heap
    }
}
