//! Tunables of the sync state machine

use crate::utils::{CoreError, Millis, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for line selection, timing windows and line placement
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SyncConfig {
    /// Vertical distance between the two display rows, in line heights
    pub line_spacing: f32,

    /// Horizontal indent of the lower row, as a fraction of the display width
    pub second_line_indent: f32,

    /// How long a finished paragraph stays visible after its last word
    pub disappear_period_ms: Millis,

    /// Length of the ready-dots pre-roll before a paragraph starts
    pub ready_dots_period_ms: Millis,

    /// Number of dots swept during the pre-roll
    pub ready_dots_count: u32,

    /// Size of a linked word's trailing glyph relative to its primary glyph
    pub linked_glyph_scale: f32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            line_spacing: 1.2,
            second_line_indent: 0.1,
            disappear_period_ms: 2_000,
            ready_dots_period_ms: 3_000,
            ready_dots_count: 4,
            linked_glyph_scale: 0.5,
        }
    }
}

impl SyncConfig {
    /// Set how long finished paragraphs stay visible
    #[must_use]
    pub const fn with_disappear_period(mut self, period_ms: Millis) -> Self {
        self.disappear_period_ms = period_ms;
        self
    }

    /// Set the ready-dots pre-roll length
    #[must_use]
    pub const fn with_ready_dots_period(mut self, period_ms: Millis) -> Self {
        self.ready_dots_period_ms = period_ms;
        self
    }

    /// Set the number of ready dots
    #[must_use]
    pub const fn with_ready_dots_count(mut self, count: u32) -> Self {
        self.ready_dots_count = count;
        self
    }

    /// Set row spacing and lower-row indent
    #[must_use]
    pub const fn with_line_geometry(mut self, line_spacing: f32, second_line_indent: f32) -> Self {
        self.line_spacing = line_spacing;
        self.second_line_indent = second_line_indent;
        self
    }

    /// Check that every value is usable
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] for a zero ready-dots period or count,
    /// or for negative or non-finite geometry.
    pub fn validate(&self) -> Result<()> {
        if self.ready_dots_period_ms == 0 {
            return Err(CoreError::config("ready dots period must be positive"));
        }
        if self.ready_dots_count == 0 {
            return Err(CoreError::config("ready dots count must be positive"));
        }
        for (name, value) in [
            ("line spacing", self.line_spacing),
            ("second line indent", self.second_line_indent),
            ("linked glyph scale", self.linked_glyph_scale),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}
