//! Mark store
//!
//! Ordered millisecond timestamps, one per word end plus one opening mark
//! per paragraph. Mutation is crate-private: outside code changes marks
//! through the commands in [`crate::commands`] so every edit lands in the
//! undo history.

use super::errors::{EditorError, Result};
use karaoke_core::Millis;

/// Ordered sequence of marks
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct MarkStore {
    marks: Vec<Millis>,
}

impl MarkStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self { marks: Vec::new() }
    }

    /// Create a store from existing marks
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MarkOutOfOrder`] at the first mark that is
    /// smaller than its predecessor.
    pub fn from_marks(marks: Vec<Millis>) -> Result<Self> {
        if let Some(pair) = marks.windows(2).find(|pair| pair[1] < pair[0]) {
            return Err(EditorError::MarkOutOfOrder {
                time: pair[1],
                last: pair[0],
            });
        }
        Ok(Self { marks })
    }

    /// Number of marks
    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Check if no mark has been placed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Mark at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Millis> {
        self.marks.get(index).copied()
    }

    /// Most recent mark
    #[must_use]
    pub fn last(&self) -> Option<Millis> {
        self.marks.last().copied()
    }

    /// Marks as a slice, the form the sync engine reads
    #[must_use]
    pub fn as_slice(&self) -> &[Millis] {
        &self.marks
    }

    /// Iterate over marks in order
    pub fn iter(&self) -> impl Iterator<Item = Millis> + '_ {
        self.marks.iter().copied()
    }

    /// Neighbours of mark `index`: `(previous, next)`
    #[must_use]
    pub fn neighbours(&self, index: usize) -> (Option<Millis>, Option<Millis>) {
        let previous = index.checked_sub(1).and_then(|prev| self.get(prev));
        (previous, self.get(index + 1))
    }

    /// Check that marks never decrease
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.marks.windows(2).all(|pair| pair[0] <= pair[1])
    }

    pub(crate) fn push(&mut self, time: Millis) {
        self.marks.push(time);
    }

    pub(crate) fn pop(&mut self) -> Option<Millis> {
        self.marks.pop()
    }

    pub(crate) fn insert(&mut self, index: usize, time: Millis) -> Result<()> {
        if index > self.marks.len() {
            return Err(self.out_of_bounds(index));
        }
        self.marks.insert(index, time);
        Ok(())
    }

    pub(crate) fn remove(&mut self, index: usize) -> Result<Millis> {
        if index >= self.marks.len() {
            return Err(self.out_of_bounds(index));
        }
        Ok(self.marks.remove(index))
    }

    /// Replace mark `index`, returning the old value
    pub(crate) fn replace(&mut self, index: usize, time: Millis) -> Result<Millis> {
        let len = self.marks.len();
        let slot = self
            .marks
            .get_mut(index)
            .ok_or(EditorError::MarkIndexOutOfBounds { index, len })?;
        Ok(core::mem::replace(slot, time))
    }

    fn out_of_bounds(&self, index: usize) -> EditorError {
        EditorError::MarkIndexOutOfBounds {
            index,
            len: self.marks.len(),
        }
    }
}

impl<'a> IntoIterator for &'a MarkStore {
    type Item = &'a Millis;
    type IntoIter = core::slice::Iter<'a, Millis>;

    fn into_iter(self) -> Self::IntoIter {
        self.marks.iter()
    }
}
