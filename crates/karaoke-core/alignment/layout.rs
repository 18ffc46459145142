//! Line and paragraph layout derived from the token sequence

use super::{start_mark, token_marks, TokenMarks};
use crate::tokenizer::Token;
use core::ops::Range;

/// One display line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpan {
    /// Token positions of the line's words (its terminating break excluded)
    pub tokens: Range<usize>,
    /// Paragraph this line belongs to
    pub paragraph: usize,
    /// Mark at which the line's first word starts
    pub start_mark: usize,
    /// Mark at which the line's last word ends
    ///
    /// Equal to `start_mark` for a line without words.
    pub end_mark: usize,
    /// Whether a paragraph break terminates this line
    pub is_paragraph_end: bool,
}

impl LineSpan {
    /// Check if the line holds no words
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start_mark == self.end_mark
    }
}

/// A run of lines bounded by paragraph breaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphSpan {
    /// Line indices of the paragraph
    pub lines: Range<usize>,
    /// Mark at which the paragraph's first word starts
    pub start_mark: usize,
    /// Mark at which the paragraph's last word ends
    pub words_end_mark: usize,
    /// Mark closing the gap after the paragraph, `None` for the last one
    pub end_mark: Option<usize>,
}

impl ParagraphSpan {
    /// Index of the paragraph's first line
    #[must_use]
    pub const fn first_line(&self) -> usize {
        self.lines.start
    }

    /// Index of the paragraph's last line
    #[must_use]
    pub const fn last_line(&self) -> usize {
        self.lines.end - 1
    }
}

/// Line/paragraph structure plus per-token mark intervals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Mark interval of each token, `None` for breaks
    pub token_marks: Vec<Option<TokenMarks>>,
    /// Lines in display order
    pub lines: Vec<LineSpan>,
    /// Paragraphs in display order
    pub paragraphs: Vec<ParagraphSpan>,
}

impl Layout {
    /// Build the layout of a token sequence
    ///
    /// An empty sequence has no lines; anything else has at least one line
    /// and one paragraph.
    #[must_use]
    pub fn build(tokens: &[Token]) -> Self {
        let mut layout = Self {
            token_marks: token_marks(tokens),
            ..Self::default()
        };
        if tokens.is_empty() {
            return layout;
        }

        let mut breaks = 0;
        let mut paragraphs = 0;
        let mut line_start = 0;
        let mut line_start_mark = 0;
        let mut paragraph_first_line = 0;
        let mut paragraph_start_mark = 0;

        for (position, token) in tokens.iter().enumerate() {
            if !token.is_break() {
                continue;
            }

            let end_mark = start_mark(position, breaks, paragraphs);
            layout.lines.push(LineSpan {
                tokens: line_start..position,
                paragraph: layout.paragraphs.len(),
                start_mark: line_start_mark,
                end_mark,
                is_paragraph_end: token.is_paragraph_break(),
            });

            breaks += 1;
            if token.is_paragraph_break() {
                paragraphs += 1;
                layout.paragraphs.push(ParagraphSpan {
                    lines: paragraph_first_line..layout.lines.len(),
                    start_mark: paragraph_start_mark,
                    words_end_mark: end_mark,
                    end_mark: Some(end_mark + 1),
                });
                paragraph_first_line = layout.lines.len();
                paragraph_start_mark = end_mark + 1;
            }

            line_start = position + 1;
            line_start_mark = start_mark(line_start, breaks, paragraphs);
        }

        let end_mark = start_mark(tokens.len(), breaks, paragraphs);
        layout.lines.push(LineSpan {
            tokens: line_start..tokens.len(),
            paragraph: layout.paragraphs.len(),
            start_mark: line_start_mark,
            end_mark,
            is_paragraph_end: false,
        });
        layout.paragraphs.push(ParagraphSpan {
            lines: paragraph_first_line..layout.lines.len(),
            start_mark: paragraph_start_mark,
            words_end_mark: end_mark,
            end_mark: None,
        });

        layout
    }

    /// Paragraph holding `line`
    #[must_use]
    pub fn paragraph_of(&self, line: usize) -> Option<&ParagraphSpan> {
        self.lines
            .get(line)
            .and_then(|span| self.paragraphs.get(span.paragraph))
    }

    /// Line index relative to its paragraph's first line
    #[must_use]
    pub fn paragraph_relative_line(&self, line: usize) -> Option<usize> {
        self.paragraph_of(line)
            .map(|paragraph| line - paragraph.first_line())
    }

    /// Line holding the word at `position`, `None` for breaks
    #[must_use]
    pub fn line_of_token(&self, position: usize) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.tokens.contains(&position))
    }
}
