//! Tokenized lyric with its derived layout
//!
//! `Lyrics` is the immutable value the sync engine reads. Editors cache one
//! per text revision and rebuild it lazily when the text changes.

use crate::alignment::{self, Layout, LineSpan, ParagraphSpan, TokenMarks};
use crate::tokenizer::{tokenize, Token, TokenStream};

/// Tokens, paragraph-end marks and line/paragraph layout of a lyric
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lyrics {
    tokens: Vec<Token>,
    paragraph_end_marks: Vec<usize>,
    layout: Layout,
}

impl Lyrics {
    /// Tokenize `text` and derive its layout
    ///
    /// # Examples
    ///
    /// ```rust
    /// use karaoke_core::Lyrics;
    ///
    /// let lyrics = Lyrics::new("ab\nc'd\n\nefg");
    /// assert_eq!(lyrics.line_count(), 3);
    /// assert_eq!(lyrics.required_mark_count(), 8);
    /// ```
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self::from_stream(tokenize(text))
    }

    /// Wrap an existing token stream
    #[must_use]
    pub fn from_stream(stream: TokenStream) -> Self {
        let layout = Layout::build(&stream.tokens);
        Self {
            tokens: stream.tokens,
            paragraph_end_marks: stream.paragraph_end_marks,
            layout,
        }
    }

    /// Tokens in source order
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Mark indices at which paragraphs end
    #[must_use]
    pub fn paragraph_end_marks(&self) -> &[usize] {
        &self.paragraph_end_marks
    }

    /// Derived layout
    #[must_use]
    pub const fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Display lines
    #[must_use]
    pub fn lines(&self) -> &[LineSpan] {
        &self.layout.lines
    }

    /// Paragraphs
    #[must_use]
    pub fn paragraphs(&self) -> &[ParagraphSpan] {
        &self.layout.paragraphs
    }

    /// Number of display lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.layout.lines.len()
    }

    /// Check if the lyric has no tokens
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of word and linked-word tokens
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.tokens.iter().filter(|token| token.is_word()).count()
    }

    /// Mark interval of the token at `position`
    #[must_use]
    pub fn token_marks(&self, position: usize) -> Option<TokenMarks> {
        self.layout.token_marks.get(position).copied().flatten()
    }

    /// Marks needed to time every word
    #[must_use]
    pub fn required_mark_count(&self) -> usize {
        alignment::mark_count(&self.layout.token_marks)
    }

    /// Position of the word whose end is mark `mark`
    #[must_use]
    pub fn token_ending_at(&self, mark: usize) -> Option<usize> {
        self.layout
            .token_marks
            .iter()
            .position(|marks| marks.is_some_and(|marks| marks.end == mark))
    }

    /// Text of the word ending at each mark index
    ///
    /// Mark indices that end no word (the first mark and each paragraph's
    /// opening mark) hold `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use karaoke_core::Lyrics;
    ///
    /// let lyrics = Lyrics::new("a\nbc\n\nd\nef'g");
    /// let texts = lyrics.tokens_by_end_mark();
    /// assert_eq!(texts[0], None);
    /// assert_eq!(texts[7].as_deref(), Some("fg"));
    /// ```
    #[must_use]
    pub fn tokens_by_end_mark(&self) -> Vec<Option<String>> {
        let mut texts = vec![None; self.required_mark_count()];
        for (token, marks) in self.tokens.iter().zip(&self.layout.token_marks) {
            if let Some(marks) = marks {
                texts[marks.end] = token.text();
            }
        }
        texts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_word_by_end_mark() {
        let lyrics = Lyrics::new("ab\nc'd\n\nefg");
        assert_eq!(lyrics.token_ending_at(0), None);
        assert_eq!(lyrics.token_ending_at(1), Some(0));
        assert_eq!(lyrics.token_ending_at(3), Some(3));
        assert_eq!(lyrics.token_ending_at(4), None);
        assert_eq!(lyrics.token_ending_at(5), Some(5));
        assert_eq!(lyrics.token_ending_at(8), None);
    }

    #[test]
    fn counts() {
        let lyrics = Lyrics::new("ab\nc'd\n\nefg");
        assert_eq!(lyrics.word_count(), 6);
        assert_eq!(lyrics.paragraphs().len(), 2);
        assert_eq!(lyrics.paragraph_end_marks(), &[4]);
        assert_eq!(lyrics.token_marks(2), None);
        assert_eq!(lyrics.token_marks(3), Some(TokenMarks { start: 2, end: 3 }));
    }

    #[test]
    fn mark_count_agrees_with_token_stream() {
        for text in ["", "\n\n", "ab\nc'd\n\nefg", "abcd\n\nef", "ab\ncd\n\n"] {
            let lyrics = Lyrics::new(text);
            assert_eq!(
                lyrics.required_mark_count(),
                alignment::required_mark_count(lyrics.tokens()),
                "{text:?}"
            );
        }
        assert_eq!(Lyrics::new("ab\nc'd\n\nefg").required_mark_count(), 8);
    }

    #[test]
    fn empty_lyrics() {
        let lyrics = Lyrics::new("");
        assert!(lyrics.is_empty());
        assert_eq!(lyrics.line_count(), 0);
        assert!(lyrics.tokens_by_end_mark().is_empty());
    }
}
