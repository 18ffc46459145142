//! Character cursor for the lyric tokenizer
//!
//! Works in codepoints rather than bytes so that lookahead of "the
//! character two positions ahead" is a plain index. Carriage returns are
//! dropped up front so CRLF text scans exactly like LF text.

/// Codepoint cursor with lookahead
#[derive(Debug, Clone)]
pub struct CharCursor {
    /// Codepoints with their byte offsets in the source
    chars: Vec<(usize, char)>,
    /// Index of the current codepoint
    position: usize,
}

impl CharCursor {
    /// Create a cursor at the start of `source`
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.char_indices().filter(|&(_, ch)| ch != '\r').collect(),
            position: 0,
        }
    }

    /// Current codepoint index
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Check if the whole input has been consumed
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.chars.len()
    }

    /// Codepoint `ahead` positions past the current one
    #[must_use]
    pub fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.position + ahead).map(|&(_, ch)| ch)
    }

    /// Current codepoint
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.peek_at(0)
    }

    /// Byte offset of the current codepoint in the source
    #[must_use]
    pub fn byte_offset(&self) -> usize {
        match self.chars.get(self.position) {
            Some(&(offset, _)) => offset,
            None => self
                .chars
                .last()
                .map_or(0, |&(offset, ch)| offset + ch.len_utf8()),
        }
    }

    /// Advance by `count` codepoints, stopping at the end of input
    pub fn advance(&mut self, count: usize) {
        self.position = (self.position + count).min(self.chars.len());
    }
}
