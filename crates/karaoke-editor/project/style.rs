//! Display style persisted with a project

use karaoke_core::utils::{format_hex_color, parse_hex_color};
use karaoke_core::CoreError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Font size and colors the renderer paints lyrics with
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayStyle {
    /// Glyph size in pixels
    pub font_size: f32,

    /// RGBA color of words not yet sung
    pub base_color: [u8; 4],

    /// RGBA color of the sung part of a word
    pub highlight_color: [u8; 4],

    /// RGBA color of the glyph outline
    pub outline_color: [u8; 4],
}

impl Default for DisplayStyle {
    fn default() -> Self {
        Self {
            font_size: 48.0,
            base_color: [255, 255, 255, 255],
            highlight_color: [64, 160, 255, 255],
            outline_color: [0, 0, 0, 255],
        }
    }
}

impl DisplayStyle {
    /// Set the font size
    #[must_use]
    pub const fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Set base, highlight and outline colors from `#RRGGBB[AA]` strings
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidColor`] for the first malformed color;
    /// `self` is unchanged in that case.
    pub fn with_hex_colors(self, base: &str, highlight: &str, outline: &str) -> Result<Self, CoreError> {
        Ok(Self {
            base_color: parse_hex_color(base)?,
            highlight_color: parse_hex_color(highlight)?,
            outline_color: parse_hex_color(outline)?,
            ..self
        })
    }

    /// Colors as `#RRGGBB[AA]` strings: base, highlight, outline
    #[must_use]
    pub fn hex_colors(&self) -> [String; 3] {
        [
            format_hex_color(self.base_color),
            format_hex_color(self.highlight_color),
            format_hex_color(self.outline_color),
        ]
    }
}
