//! Editing session
//!
//! [`LyricSession`] is the explicit context every editing entry point works
//! on: the lyric text and its tokenization, the marks with their undo
//! history, the sync and display settings, and the playback clock.

use super::errors::{EditorError, Result};
use super::history::{CommandManager, UndoStackConfig};
use super::marks::MarkStore;
use crate::commands::{
    AddMarkCommand, CommandResult, MarkCommand, MarkOperation, PopTrailingCommand,
    RemoveMarkCommand, SetMarkCommand,
};
use crate::playback::{Clock, FrameSource, ManualClock};
use crate::project::{self, DisplayStyle, ProjectData};
use karaoke_core::utils::format_timestamp;
use karaoke_core::{evaluate, Lyrics, Millis, RenderDescriptor, SyncConfig};
use std::sync::Arc;

/// Lyric, marks, history, settings and clock of one project
#[derive(Debug)]
pub struct LyricSession {
    text: String,
    lyrics: Arc<Lyrics>,
    marks: MarkStore,
    history: CommandManager,
    config: SyncConfig,
    style: DisplayStyle,
    audio_path: Option<String>,
    clock: Box<dyn Clock>,
}

impl Default for LyricSession {
    fn default() -> Self {
        Self::new("")
    }
}

impl LyricSession {
    /// Create a session for `text` with no marks
    ///
    /// # Examples
    ///
    /// ```
    /// use karaoke_editor::LyricSession;
    ///
    /// let mut session = LyricSession::new("ab\ncd");
    /// session.drop_mark_at(0).unwrap();
    /// session.drop_mark_at(500).unwrap();
    /// assert_eq!(session.next_unmarked_token(), Some(1));
    ///
    /// session.undo().unwrap();
    /// assert_eq!(session.marks().as_slice(), &[0]);
    /// ```
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            lyrics: Arc::new(Lyrics::new(text)),
            marks: MarkStore::new(),
            history: CommandManager::new(),
            config: SyncConfig::default(),
            style: DisplayStyle::default(),
            audio_path: None,
            clock: Box::new(ManualClock::default()),
        }
    }

    /// Use `clock` for `drop_mark_now` and `evaluate_now`
    #[must_use]
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use `config` for evaluation
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`.
    pub fn with_config(mut self, config: SyncConfig) -> Result<Self> {
        self.set_config(config)?;
        Ok(self)
    }

    /// Use a history of `config.max_entries` entries
    #[must_use]
    pub fn with_history_config(mut self, config: UndoStackConfig) -> Self {
        self.history = CommandManager::with_config(config);
        self
    }

    /// Restore a session from project data
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MissingKey`] without a `text` key, or the
    /// first error reading marks or settings.
    pub fn from_project(data: &ProjectData) -> Result<Self> {
        let text = data.require(project::TEXT_KEY)?;
        let (lyrics, marks) =
            project::load_tokens_and_marks(text, data.get(project::MARKS_KEY).unwrap_or(""))?;

        Ok(Self {
            text: text.to_string(),
            lyrics: Arc::new(lyrics),
            marks,
            history: CommandManager::new(),
            config: data.sync_config()?,
            style: data.display_style()?,
            audio_path: data.get(project::AUDIO_KEY).map(str::to_string),
            clock: Box::new(ManualClock::default()),
        })
    }

    /// Project data describing this session
    #[must_use]
    pub fn to_project(&self) -> ProjectData {
        let mut data = ProjectData::new();
        data.set(project::TEXT_KEY, self.text.as_str());
        data.set(project::MARKS_KEY, project::serialize_marks(&self.marks));
        if let Some(audio) = &self.audio_path {
            data.set(project::AUDIO_KEY, audio.as_str());
        }
        data.set_sync_config(&self.config);
        data.set_display_style(&self.style);
        data
    }

    /// Raw lyric text
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tokenized lyric
    #[must_use]
    pub fn lyrics(&self) -> &Lyrics {
        &self.lyrics
    }

    /// Shared handle to the tokenized lyric
    #[must_use]
    pub fn lyrics_handle(&self) -> Arc<Lyrics> {
        Arc::clone(&self.lyrics)
    }

    /// Current marks
    #[must_use]
    pub const fn marks(&self) -> &MarkStore {
        &self.marks
    }

    /// Undo/redo history
    #[must_use]
    pub const fn history(&self) -> &CommandManager {
        &self.history
    }

    /// Sync settings
    #[must_use]
    pub const fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Replace the sync settings
    ///
    /// # Errors
    ///
    /// Returns the validation error of `config`; the old settings stay.
    pub fn set_config(&mut self, config: SyncConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Display style
    #[must_use]
    pub const fn style(&self) -> &DisplayStyle {
        &self.style
    }

    /// Replace the display style
    pub fn set_style(&mut self, style: DisplayStyle) {
        self.style = style;
    }

    /// Path of the audio track
    #[must_use]
    pub fn audio_path(&self) -> Option<&str> {
        self.audio_path.as_deref()
    }

    /// Set the path of the audio track
    pub fn set_audio_path(&mut self, path: Option<String>) {
        self.audio_path = path;
    }

    /// Playback clock
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Playback clock, for play/pause/seek
    pub fn clock_mut(&mut self) -> &mut dyn Clock {
        self.clock.as_mut()
    }

    /// Replace the lyric text
    ///
    /// Re-tokenizes when the text actually changed. If the new lyric needs
    /// fewer marks than are placed, the surplus is dropped with a recorded
    /// pop-trailing command, so undo brings the marks back.
    ///
    /// Returns the pop-trailing result when marks were dropped.
    ///
    /// # Errors
    ///
    /// Propagates a failure of the pop-trailing command; the new text is
    /// kept either way.
    pub fn set_text(&mut self, text: &str) -> Result<Option<CommandResult>> {
        if text == self.text {
            return Ok(None);
        }

        self.text = text.to_string();
        self.lyrics = Arc::new(Lyrics::new(text));
        log::debug!(
            "Re-tokenized lyric: {} tokens, {} marks needed",
            self.lyrics.tokens().len(),
            self.lyrics.required_mark_count()
        );

        let required = self.lyrics.required_mark_count();
        let excess = self.marks.len().saturating_sub(required);
        if excess == 0 {
            return Ok(None);
        }

        log::warn!(
            "Lyric now needs {required} marks but {} are placed; dropping {excess}",
            self.marks.len()
        );
        self.execute(&PopTrailingCommand::new(excess)).map(Some)
    }

    /// Place the next mark at `time`
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MarkOutOfOrder`] unless `time` comes after
    /// the last mark.
    pub fn drop_mark_at(&mut self, time: Millis) -> Result<CommandResult> {
        self.execute(&AddMarkCommand::new(time))
    }

    /// Place the next mark at the clock position
    ///
    /// # Errors
    ///
    /// Same as [`Self::drop_mark_at`].
    pub fn drop_mark_now(&mut self) -> Result<CommandResult> {
        self.drop_mark_at(self.clock.position_ms())
    }

    /// Remove mark `index`
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MarkIndexOutOfBounds`] for a bad index.
    pub fn remove_mark(&mut self, index: usize) -> Result<CommandResult> {
        self.execute(&RemoveMarkCommand::new(index))
    }

    /// Move mark `index` to `time`, strictly between its neighbours
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::MarkIndexOutOfBounds`] for a bad index and
    /// [`EditorError::MarkOutOfRange`] when `time` would reach a neighbour.
    pub fn drag_mark(&mut self, index: usize, time: Millis) -> Result<CommandResult> {
        if index >= self.marks.len() {
            return Err(EditorError::MarkIndexOutOfBounds {
                index,
                len: self.marks.len(),
            });
        }

        let (previous, next) = self.marks.neighbours(index);
        let after_previous = previous.map_or(true, |previous| previous < time);
        let before_next = next.map_or(true, |next| time < next);
        if !(after_previous && before_next) {
            log::warn!(
                "Drag of mark {index} to {} leaves its neighbours' range",
                format_timestamp(time)
            );
            return Err(EditorError::MarkOutOfRange { index, time });
        }

        self.execute(&SetMarkCommand::new(index, time))
    }

    /// Undo the last mark edit
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NothingToUndo`] on an empty history.
    pub fn undo(&mut self) -> Result<MarkOperation> {
        self.history.undo(&mut self.marks)
    }

    /// Redo the last undone mark edit
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NothingToRedo`] when nothing was undone.
    pub fn redo(&mut self) -> Result<MarkOperation> {
        self.history.redo(&mut self.marks)
    }

    /// Run any mark command through the history
    ///
    /// # Errors
    ///
    /// Returns the command's rejection; nothing changes in that case.
    pub fn execute<C: MarkCommand + ?Sized>(&mut self, command: &C) -> Result<CommandResult> {
        self.history.execute(command, &mut self.marks)
    }

    /// Display state at `time`
    #[must_use]
    pub fn evaluate_at(&self, time: Millis) -> RenderDescriptor {
        evaluate(&self.lyrics, self.marks.as_slice(), time, &self.config)
    }

    /// Display state at the clock position
    #[must_use]
    pub fn evaluate_now(&self) -> RenderDescriptor {
        self.evaluate_at(self.clock.position_ms())
    }

    /// Position of the word the next dropped mark will end
    ///
    /// `None` when the next mark opens a paragraph (or the lyric) rather
    /// than ending a word, or when every word is already timed.
    #[must_use]
    pub fn next_unmarked_token(&self) -> Option<usize> {
        self.lyrics.token_ending_at(self.marks.len())
    }

    /// Check if every word has its marks
    #[must_use]
    pub fn is_fully_marked(&self) -> bool {
        self.marks.len() >= self.lyrics.required_mark_count()
    }
}

impl FrameSource for LyricSession {
    fn evaluate_at(&self, time: Millis) -> RenderDescriptor {
        Self::evaluate_at(self, time)
    }
}
