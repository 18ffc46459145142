//! Token definitions for lyric tokenization
//!
//! A lyric is a flat sequence of tokens. Word and linked-word tokens each
//! consume one mark; break tokens consume none and only shape the layout.
//!
//! # Example
//!
//! ```rust
//! use karaoke_core::tokenizer::{Token, TokenKind};
//!
//! let token = Token::new(TokenKind::LinkedWord('き', 'ゃ'), 0);
//! assert_eq!(token.text().as_deref(), Some("きゃ"));
//! assert!(token.is_word());
//! ```

use core::fmt;

/// Marker codepoint that fuses the surrounding characters into one unit
pub const LINK_MARKER: char = '\'';

/// Kind of a lyric token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A single displayable codepoint
    Word(char),

    /// Primary glyph followed by a smaller trailing glyph
    LinkedWord(char, char),

    /// End of a line inside a paragraph
    LineBreak,

    /// End of a line that also ends its paragraph (two consecutive newlines)
    ParagraphBreak,
}

/// Token produced by the lyric tokenizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token {
    /// What the token is
    pub kind: TokenKind,

    /// Byte offset of the token's first character in the source text
    pub offset: usize,
}

impl Token {
    /// Create new token at a source offset
    #[must_use]
    pub const fn new(kind: TokenKind, offset: usize) -> Self {
        Self { kind, offset }
    }

    /// Check if this token consumes a mark
    #[must_use]
    pub const fn is_word(&self) -> bool {
        matches!(self.kind, TokenKind::Word(_) | TokenKind::LinkedWord(..))
    }

    /// Check if this token ends a line (paragraph breaks included)
    #[must_use]
    pub const fn is_break(&self) -> bool {
        matches!(self.kind, TokenKind::LineBreak | TokenKind::ParagraphBreak)
    }

    /// Check if this token ends a paragraph
    #[must_use]
    pub const fn is_paragraph_break(&self) -> bool {
        matches!(self.kind, TokenKind::ParagraphBreak)
    }

    /// Number of glyphs drawn for this token
    #[must_use]
    pub const fn glyph_count(&self) -> usize {
        match self.kind {
            TokenKind::Word(_) => 1,
            TokenKind::LinkedWord(..) => 2,
            TokenKind::LineBreak | TokenKind::ParagraphBreak => 0,
        }
    }

    /// Displayed text, `None` for breaks
    #[must_use]
    pub fn text(&self) -> Option<String> {
        match self.kind {
            TokenKind::Word(ch) => Some(ch.to_string()),
            TokenKind::LinkedWord(primary, secondary) => Some([primary, secondary].iter().collect()),
            TokenKind::LineBreak | TokenKind::ParagraphBreak => None,
        }
    }

    /// Relative highlight width of this token
    ///
    /// A plain word is one unit wide; a linked word adds its trailing glyph
    /// drawn at `linked_glyph_scale`.
    #[must_use]
    pub fn span_width(&self, linked_glyph_scale: f32) -> f32 {
        match self.kind {
            TokenKind::Word(_) => 1.0,
            TokenKind::LinkedWord(..) => 1.0 + linked_glyph_scale,
            TokenKind::LineBreak | TokenKind::ParagraphBreak => 0.0,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Word(ch) => write!(f, "{ch}"),
            TokenKind::LinkedWord(primary, secondary) => write!(f, "{primary}{LINK_MARKER}{secondary}"),
            TokenKind::LineBreak => write!(f, "⏎"),
            TokenKind::ParagraphBreak => write!(f, "¶"),
        }
    }
}
