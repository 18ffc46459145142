//! Lyric tokenizer
//!
//! Turns raw lyric text into the mark-aligned token sequence plus the set
//! of paragraph-end mark indices. Pure and cheap enough to rerun on every
//! text change.
//!
//! # Rules
//!
//! - `\n` ends a line; `\n\n` ends a line and its paragraph
//! - `x'y` fuses into one linked word `xy`
//! - a marker with nothing usable after it stays a literal word
//! - every other codepoint is a word of its own
//!
//! # Example
//!
//! ```rust
//! use karaoke_core::tokenizer::{tokenize, TokenKind};
//!
//! let stream = tokenize("ab\nc'd\n\nefg");
//! assert_eq!(stream.tokens.len(), 8);
//! assert_eq!(stream.tokens[3].kind, TokenKind::LinkedWord('c', 'd'));
//! assert_eq!(stream.paragraph_end_marks, vec![4]);
//! ```

pub mod scanner;
pub mod tokens;


pub use scanner::CharCursor;
pub use tokens::{Token, TokenKind, LINK_MARKER};

use crate::alignment::start_mark;

/// Output of [`tokenize`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    /// Tokens in source order
    pub tokens: Vec<Token>,

    /// Mark index at which each paragraph but the last ends, ascending
    ///
    /// The mark at this index closes the gap after the paragraph's last
    /// word and opens the next paragraph.
    pub paragraph_end_marks: Vec<usize>,
}

/// Tokenize lyric text
#[must_use]
pub fn tokenize(text: &str) -> TokenStream {
    let mut cursor = CharCursor::new(text);
    let mut stream = TokenStream::default();
    let mut breaks = 0;
    let mut paragraphs = 0;

    while let Some(current) = cursor.peek() {
        let offset = cursor.byte_offset();

        if current == '\n' {
            if cursor.peek_at(1) == Some('\n') {
                let position = stream.tokens.len();
                stream
                    .paragraph_end_marks
                    .push(start_mark(position, breaks, paragraphs) + 1);
                stream
                    .tokens
                    .push(Token::new(TokenKind::ParagraphBreak, offset));
                paragraphs += 1;
                cursor.advance(2);
            } else {
                stream.tokens.push(Token::new(TokenKind::LineBreak, offset));
                cursor.advance(1);
            }
            breaks += 1;
            continue;
        }

        match (cursor.peek_at(1), cursor.peek_at(2)) {
            (Some(LINK_MARKER), Some(partner))
                if current != LINK_MARKER && partner != LINK_MARKER && partner != '\n' =>
            {
                stream
                    .tokens
                    .push(Token::new(TokenKind::LinkedWord(current, partner), offset));
                cursor.advance(3);
            }
            _ => {
                stream.tokens.push(Token::new(TokenKind::Word(current), offset));
                cursor.advance(1);
            }
        }
    }

    stream
}
