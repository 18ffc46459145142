//! Project persistence boundary
//!
//! A project is a flat key/value map. The editor reads the lyric text, the
//! marks, the audio path and the sync/display settings from it and writes
//! them back; file handling itself belongs to the caller.
//!
//! The shipped text form is a JSON object of string values:
//!
//! ```json
//! {
//!   "audio": "song.ogg",
//!   "marks": "0,400,800,1200,5000,5400,5800,6200",
//!   "text": "ab\nc'd\n\nefg"
//! }
//! ```
//!
//! Mark lists hold millisecond counts; hand-edited files may also use
//! `M:SS.mmm` entries.

mod style;

pub use style::DisplayStyle;

use crate::core::{EditorError, MarkStore, Result};
use core::fmt;
use core::str::FromStr;
use karaoke_core::utils::{format_timestamp, parse_timestamp};
use karaoke_core::{CoreError, Lyrics, Millis, SyncConfig};
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lyric text
pub const TEXT_KEY: &str = "text";
/// Comma separated marks
pub const MARKS_KEY: &str = "marks";
/// Audio file path
pub const AUDIO_KEY: &str = "audio";

const LINE_SPACING_KEY: &str = "line_spacing";
const SECOND_LINE_INDENT_KEY: &str = "second_line_indent";
const DISAPPEAR_PERIOD_KEY: &str = "disappear_period";
const READY_DOTS_PERIOD_KEY: &str = "ready_dots_period";
const READY_DOTS_COUNT_KEY: &str = "ready_dots_count";
const LINKED_GLYPH_SCALE_KEY: &str = "linked_glyph_scale";
const FONT_SIZE_KEY: &str = "font_size";
const BASE_COLOR_KEY: &str = "base_color";
const HIGHLIGHT_COLOR_KEY: &str = "highlight_color";
const OUTLINE_COLOR_KEY: &str = "outline_color";

/// Flat, ordered key/value project map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ProjectData {
    values: BTreeMap<String, String>,
}

impl ProjectData {
    /// Create an empty project
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON text form
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Persistence`] unless `source` is a JSON object
    /// whose values are all strings.
    pub fn parse(source: &str) -> Result<Self> {
        serde_json::from_str(source)
            .map(|values| Self { values })
            .map_err(|error| EditorError::persistence(format!("invalid project: {error}")))
    }

    /// Parse the JSON form from raw file bytes
    ///
    /// # Errors
    ///
    /// Same as [`Self::parse`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map(|values| Self { values })
            .map_err(|error| EditorError::persistence(format!("invalid project: {error}")))
    }

    /// Pretty-printed JSON form
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Persistence`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.values)
            .map_err(|error| EditorError::persistence(format!("cannot write project: {error}")))
    }

    /// Value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value stored under `key`, which must be present
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MissingKey`] when `key` is absent.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| EditorError::MissingKey {
            key: key.to_string(),
        })
    }

    /// Store `value` under `key`
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Remove `key`, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Number of keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no key is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over keys and values in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Sync settings, defaults for absent keys
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidNumeric`] for an unparsable value and
    /// [`CoreError::Config`] when the result does not validate.
    pub fn sync_config(&self) -> Result<SyncConfig> {
        let mut config = SyncConfig::default();
        if let Some(value) = self.parsed(LINE_SPACING_KEY)? {
            config.line_spacing = value;
        }
        if let Some(value) = self.parsed(SECOND_LINE_INDENT_KEY)? {
            config.second_line_indent = value;
        }
        if let Some(value) = self.parsed(DISAPPEAR_PERIOD_KEY)? {
            config.disappear_period_ms = value;
        }
        if let Some(value) = self.parsed(READY_DOTS_PERIOD_KEY)? {
            config.ready_dots_period_ms = value;
        }
        if let Some(value) = self.parsed(READY_DOTS_COUNT_KEY)? {
            config.ready_dots_count = value;
        }
        if let Some(value) = self.parsed(LINKED_GLYPH_SCALE_KEY)? {
            config.linked_glyph_scale = value;
        }
        config.validate()?;
        Ok(config)
    }

    /// Store sync settings
    pub fn set_sync_config(&mut self, config: &SyncConfig) {
        self.set(LINE_SPACING_KEY, config.line_spacing.to_string());
        self.set(SECOND_LINE_INDENT_KEY, config.second_line_indent.to_string());
        self.set(DISAPPEAR_PERIOD_KEY, config.disappear_period_ms.to_string());
        self.set(READY_DOTS_PERIOD_KEY, config.ready_dots_period_ms.to_string());
        self.set(READY_DOTS_COUNT_KEY, config.ready_dots_count.to_string());
        self.set(LINKED_GLYPH_SCALE_KEY, config.linked_glyph_scale.to_string());
    }

    /// Display style, defaults for absent keys
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidNumeric`] for a bad font size and
    /// [`CoreError::InvalidColor`] for a bad color.
    pub fn display_style(&self) -> Result<DisplayStyle> {
        let mut style = DisplayStyle::default();
        if let Some(font_size) = self.parsed(FONT_SIZE_KEY)? {
            style.font_size = font_size;
        }
        let [base, highlight, outline] = style.hex_colors();
        let style = style.with_hex_colors(
            self.get(BASE_COLOR_KEY).unwrap_or(base.as_str()),
            self.get(HIGHLIGHT_COLOR_KEY).unwrap_or(highlight.as_str()),
            self.get(OUTLINE_COLOR_KEY).unwrap_or(outline.as_str()),
        )?;
        Ok(style)
    }

    /// Store the display style
    pub fn set_display_style(&mut self, style: &DisplayStyle) {
        let [base, highlight, outline] = style.hex_colors();
        self.set(FONT_SIZE_KEY, style.font_size.to_string());
        self.set(BASE_COLOR_KEY, base);
        self.set(HIGHLIGHT_COLOR_KEY, highlight);
        self.set(OUTLINE_COLOR_KEY, outline);
    }

    fn parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>> {
        self.get(key)
            .map(|value| {
                value.trim().parse().map_err(|_| {
                    EditorError::from(CoreError::invalid_numeric(value, &format!("bad {key}")))
                })
            })
            .transpose()
    }
}

impl fmt::Display for ProjectData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = self.to_json().map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Parse a comma separated mark list
///
/// Entries are millisecond counts or `M:SS.mmm` timestamps. Blank input is
/// an empty list.
///
/// # Errors
///
/// Returns [`EditorError::Persistence`] naming the first entry that is not
/// a timestamp.
pub fn parse_marks(source: &str) -> Result<Vec<Millis>> {
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }
    source
        .split(',')
        .enumerate()
        .map(|(index, entry)| {
            parse_timestamp(entry)
                .map_err(|error| EditorError::persistence(format!("mark {index}: {error}")))
        })
        .collect()
}

/// Comma separated form of the marks
#[must_use]
pub fn serialize_marks(marks: &MarkStore) -> String {
    marks
        .iter()
        .map(|mark| format!("{mark}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Tokenize `text` and load `marks` into a store
///
/// Marks beyond what the lyric needs are kept; the engine ignores them
/// until the session trims them.
///
/// # Errors
///
/// Returns [`EditorError::Persistence`] for a non-numeric entry or a
/// decreasing mark sequence.
pub fn load_tokens_and_marks(text: &str, marks: &str) -> Result<(Lyrics, MarkStore)> {
    let lyrics = Lyrics::new(text);
    let store = MarkStore::from_marks(parse_marks(marks)?).map_err(|error| {
        EditorError::persistence(format!("marks are not in order: {error}"))
    })?;

    let required = lyrics.required_mark_count();
    if store.len() > required {
        log::warn!(
            "Project has {} marks but the lyric needs only {required}; the last one is at {}",
            store.len(),
            store.last().map_or_else(String::new, format_timestamp)
        );
    }
    Ok((lyrics, store))
}
