//! History management for undo/redo of mark edits
//!
//! Provides a bounded undo stack (oldest entries evicted first) with a redo
//! stack that is cleared whenever a new command runs, and the
//! [`CommandManager`] that executes commands against a [`MarkStore`] and
//! records them.

use super::errors::{EditorError, Result};
use super::marks::MarkStore;
use crate::commands::{CommandResult, MarkCommand, MarkOperation};
use std::collections::VecDeque;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single entry in the undo/redo history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// The operation that was performed
    pub operation: MarkOperation,

    /// Description of the operation
    pub description: String,

    /// Memory usage of this entry (for capacity reporting)
    pub memory_usage: usize,
}

impl HistoryEntry {
    /// Create a new history entry
    #[must_use]
    pub fn new(operation: MarkOperation, description: String) -> Self {
        let memory_usage = operation.memory_usage() + description.len();
        Self {
            operation,
            description,
            memory_usage,
        }
    }
}

/// Configuration for undo stack behavior
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UndoStackConfig {
    /// Maximum number of undo entries to keep
    pub max_entries: usize,
}

impl Default for UndoStackConfig {
    fn default() -> Self {
        Self { max_entries: 100 }
    }
}

/// Undo/redo stack with a fixed depth
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    /// Configuration for this stack
    config: UndoStackConfig,

    /// Undo history (most recent operations first)
    undo_stack: VecDeque<HistoryEntry>,

    /// Redo history (operations that can be redone)
    redo_stack: VecDeque<HistoryEntry>,

    /// Current memory usage in bytes
    current_memory: usize,
}

impl UndoStack {
    /// Create a new undo stack with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(UndoStackConfig::default())
    }

    /// Create a new undo stack with custom configuration
    #[must_use]
    pub fn with_config(config: UndoStackConfig) -> Self {
        Self {
            config,
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            current_memory: 0,
        }
    }

    /// Push a new entry onto the undo stack
    ///
    /// This clears the redo stack as new operations invalidate
    /// previously undone operations.
    pub fn push(&mut self, entry: HistoryEntry) {
        self.clear_redo_stack();
        self.push_undo(entry);
    }

    /// Push onto the undo stack keeping the redo stack (used by redo)
    pub fn push_undo(&mut self, entry: HistoryEntry) {
        self.current_memory += entry.memory_usage;
        self.undo_stack.push_front(entry);
        self.enforce_limits();
    }

    /// Pop the most recent entry from the undo stack
    pub fn pop_undo(&mut self) -> Option<HistoryEntry> {
        let entry = self.undo_stack.pop_front()?;
        self.current_memory -= entry.memory_usage;
        Some(entry)
    }

    /// Push an entry onto the redo stack
    pub fn push_redo(&mut self, entry: HistoryEntry) {
        self.current_memory += entry.memory_usage;
        self.redo_stack.push_front(entry);
    }

    /// Pop an entry from the redo stack
    pub fn pop_redo(&mut self) -> Option<HistoryEntry> {
        let entry = self.redo_stack.pop_front()?;
        self.current_memory -= entry.memory_usage;
        Some(entry)
    }

    /// Check if undo is available
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get the number of undo entries available
    #[must_use]
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of redo entries available
    #[must_use]
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Get current memory usage in bytes
    #[must_use]
    pub const fn memory_usage(&self) -> usize {
        self.current_memory
    }

    /// Get description of the next undo operation
    #[must_use]
    pub fn next_undo_description(&self) -> Option<&str> {
        self.undo_stack
            .front()
            .map(|entry| entry.description.as_str())
    }

    /// Get description of the next redo operation
    #[must_use]
    pub fn next_redo_description(&self) -> Option<&str> {
        self.redo_stack
            .front()
            .map(|entry| entry.description.as_str())
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_memory = 0;
    }

    fn clear_redo_stack(&mut self) {
        for entry in self.redo_stack.drain(..) {
            self.current_memory -= entry.memory_usage;
        }
    }

    fn enforce_limits(&mut self) {
        while self.undo_stack.len() > self.config.max_entries {
            if let Some(entry) = self.undo_stack.pop_back() {
                self.current_memory -= entry.memory_usage;
            }
        }
    }
}

/// Executes mark commands and keeps their undo/redo history
#[derive(Debug, Clone, Default)]
pub struct CommandManager {
    stack: UndoStack,
}

impl CommandManager {
    /// Create a new command manager
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new command manager with custom configuration
    #[must_use]
    pub fn with_config(config: UndoStackConfig) -> Self {
        Self {
            stack: UndoStack::with_config(config),
        }
    }

    /// Replace the configuration, dropping existing history
    pub fn set_config(&mut self, config: UndoStackConfig) {
        self.stack = UndoStack::with_config(config);
    }

    /// Execute `command` and record it
    ///
    /// A command that changes nothing is not recorded and leaves the redo
    /// stack alone.
    ///
    /// # Errors
    ///
    /// Returns the command's rejection; history and marks are unchanged.
    pub fn execute<C: MarkCommand + ?Sized>(
        &mut self,
        command: &C,
        marks: &mut MarkStore,
    ) -> Result<CommandResult> {
        let result = command.execute(marks).map_err(|error| {
            log::warn!("Rejected '{}': {error}", command.description());
            error
        })?;

        if let Some(operation) = &result.operation {
            log::debug!("Executed '{}': {operation:?}", command.description());
            self.stack.push(HistoryEntry::new(
                operation.clone(),
                command.description().to_string(),
            ));
        }
        Ok(result)
    }

    /// Undo the most recent operation
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NothingToUndo`] on an empty history, or the
    /// inversion error if `marks` no longer matches the recorded operation
    /// (the entry then stays on the undo stack).
    pub fn undo(&mut self, marks: &mut MarkStore) -> Result<MarkOperation> {
        let entry = self.stack.pop_undo().ok_or(EditorError::NothingToUndo)?;
        if let Err(error) = entry.operation.revert(marks) {
            self.stack.push_undo(entry);
            return Err(error);
        }

        log::debug!("Undid '{}'", entry.description);
        let operation = entry.operation.clone();
        self.stack.push_redo(entry);
        Ok(operation)
    }

    /// Redo the most recently undone operation
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NothingToRedo`] when nothing was undone, or
    /// the application error if `marks` no longer matches.
    pub fn redo(&mut self, marks: &mut MarkStore) -> Result<MarkOperation> {
        let entry = self.stack.pop_redo().ok_or(EditorError::NothingToRedo)?;
        if let Err(error) = entry.operation.apply(marks) {
            self.stack.push_redo(entry);
            return Err(error);
        }

        log::debug!("Redid '{}'", entry.description);
        let operation = entry.operation.clone();
        self.stack.push_undo(entry);
        Ok(operation)
    }

    /// Check if undo is available
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.stack.can_undo()
    }

    /// Check if redo is available
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.stack.can_redo()
    }

    /// Get the next undo operation description
    #[must_use]
    pub fn next_undo_description(&self) -> Option<&str> {
        self.stack.next_undo_description()
    }

    /// Get the next redo operation description
    #[must_use]
    pub fn next_redo_description(&self) -> Option<&str> {
        self.stack.next_redo_description()
    }

    /// Get history statistics
    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            undo_count: self.stack.undo_count(),
            redo_count: self.stack.redo_count(),
            memory_usage: self.stack.memory_usage(),
        }
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.stack.clear();
    }

    /// Access to underlying stack
    #[must_use]
    pub const fn stack(&self) -> &UndoStack {
        &self.stack
    }
}

/// Statistics about the history system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryStats {
    /// Number of operations that can be undone
    pub undo_count: usize,
    /// Number of operations that can be redone
    pub redo_count: usize,
    /// Current memory usage in bytes
    pub memory_usage: usize,
}
