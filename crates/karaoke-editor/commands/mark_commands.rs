//! The four mark edits: add, remove, set and pop-trailing
//!
//! Each command validates its own preconditions and reports rejection as
//! an error without touching the store. `Set` is the exception by
//! contract: it only checks the index, keeping marks ordered is up to the
//! caller (see [`crate::LyricSession::drag_mark`]).

use super::{CommandResult, MarkCommand, MarkOperation};
use crate::core::{EditorError, MarkStore, Result};
use karaoke_core::Millis;

/// Append a mark after the last one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMarkCommand {
    /// Time of the new mark
    pub time: Millis,
}

impl AddMarkCommand {
    /// Create a new add mark command
    #[must_use]
    pub const fn new(time: Millis) -> Self {
        Self { time }
    }
}

impl MarkCommand for AddMarkCommand {
    fn execute(&self, marks: &mut MarkStore) -> Result<CommandResult> {
        if let Some(last) = marks.last() {
            if self.time <= last {
                return Err(EditorError::MarkOutOfOrder {
                    time: self.time,
                    last,
                });
            }
        }

        marks.push(self.time);
        Ok(CommandResult::changed(
            MarkOperation::Add { time: self.time },
            Some(marks.len() - 1),
        ))
    }

    fn description(&self) -> &str {
        "Add mark"
    }
}

/// Remove one mark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveMarkCommand {
    /// Index of the mark to remove
    pub index: usize,
}

impl RemoveMarkCommand {
    /// Create a new remove mark command
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self { index }
    }
}

impl MarkCommand for RemoveMarkCommand {
    fn execute(&self, marks: &mut MarkStore) -> Result<CommandResult> {
        let time = marks.remove(self.index)?;
        Ok(CommandResult::changed(
            MarkOperation::Remove {
                index: self.index,
                time,
            },
            Some(self.index),
        ))
    }

    fn description(&self) -> &str {
        "Remove mark"
    }
}

/// Move one mark to a new time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetMarkCommand {
    /// Index of the mark to move
    pub index: usize,
    /// New time of the mark
    pub time: Millis,
}

impl SetMarkCommand {
    /// Create a new set mark command
    #[must_use]
    pub const fn new(index: usize, time: Millis) -> Self {
        Self { index, time }
    }
}

impl MarkCommand for SetMarkCommand {
    fn execute(&self, marks: &mut MarkStore) -> Result<CommandResult> {
        let old = marks.replace(self.index, self.time)?;
        Ok(CommandResult::changed(
            MarkOperation::Set {
                index: self.index,
                old,
                new: self.time,
            },
            Some(self.index),
        ))
    }

    fn description(&self) -> &str {
        "Move mark"
    }
}

/// Drop the last `count` marks
///
/// Issued after a text edit leaves fewer words than marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopTrailingCommand {
    /// Number of marks to drop
    pub count: usize,
}

impl PopTrailingCommand {
    /// Create a new pop trailing command
    #[must_use]
    pub const fn new(count: usize) -> Self {
        Self { count }
    }
}

impl MarkCommand for PopTrailingCommand {
    fn execute(&self, marks: &mut MarkStore) -> Result<CommandResult> {
        if self.count > marks.len() {
            return Err(EditorError::MarkIndexOutOfBounds {
                index: self.count,
                len: marks.len(),
            });
        }
        if self.count == 0 {
            return Ok(CommandResult::unchanged());
        }

        let removed: Vec<Millis> = (0..self.count).filter_map(|_| marks.pop()).collect();
        let first_removed = marks.len();
        Ok(CommandResult::changed(
            MarkOperation::PopTrailing { removed },
            Some(first_removed),
        )
        .with_message(format!("Dropped {} trailing marks", self.count)))
    }

    fn description(&self) -> &str {
        "Drop trailing marks"
    }
}
