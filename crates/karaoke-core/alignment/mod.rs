//! Mark/token alignment
//!
//! Every word consumes exactly one mark interval `[start, end]` with
//! `end = start + 1`: a word's start mark is its predecessor's end mark.
//! Line breaks consume nothing, so consecutive lines of a paragraph share
//! the boundary mark. A paragraph break adds one extra mark, which ends the
//! outgoing paragraph's gap and starts the next paragraph.
//!
//! [`start_mark`] is the single formula every component uses for this
//! mapping; [`Layout`] derives the line and paragraph structure from it.

mod layout;

pub use layout::{Layout, LineSpan, ParagraphSpan};

use crate::tokenizer::Token;

/// Mark index at which the token at `position` starts
///
/// `breaks` counts line and paragraph breaks before `position`,
/// `paragraphs` counts only paragraph breaks before `position`.
///
/// # Examples
///
/// ```rust
/// use karaoke_core::alignment::start_mark;
///
/// // "ab\nc'd\n\nefg": `e` sits at token position 5 after two breaks,
/// // one of which ends a paragraph
/// assert_eq!(start_mark(5, 2, 1), 4);
/// ```
#[must_use]
pub const fn start_mark(position: usize, breaks: usize, paragraphs: usize) -> usize {
    position - breaks + paragraphs
}

/// Mark interval bounding one word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenMarks {
    /// Mark at which the word starts (its predecessor's end)
    pub start: usize,
    /// Mark at which the word ends
    pub end: usize,
}

impl TokenMarks {
    /// Interval for a word starting at `start`
    #[must_use]
    pub const fn starting_at(start: usize) -> Self {
        Self {
            start,
            end: start + 1,
        }
    }
}

/// Mark interval of every token, `None` for breaks
#[must_use]
pub fn token_marks(tokens: &[Token]) -> Vec<Option<TokenMarks>> {
    let mut breaks = 0;
    let mut paragraphs = 0;

    tokens
        .iter()
        .enumerate()
        .map(|(position, token)| {
            if token.is_break() {
                breaks += 1;
                if token.is_paragraph_break() {
                    paragraphs += 1;
                }
                None
            } else {
                Some(TokenMarks::starting_at(start_mark(
                    position, breaks, paragraphs,
                )))
            }
        })
        .collect()
}

/// Number of marks a fully timed lyric needs
///
/// Zero when there are no words at all.
#[must_use]
pub fn required_mark_count(tokens: &[Token]) -> usize {
    mark_count(&token_marks(tokens))
}

/// Marks needed by an already computed `token_marks` table
pub(crate) fn mark_count(token_marks: &[Option<TokenMarks>]) -> usize {
    token_marks
        .iter()
        .rev()
        .find_map(|marks| marks.map(|marks| marks.end + 1))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;
    use proptest::prelude::*;

    #[test]
    fn marks_for_reference_fixture() {
        let stream = tokenize("ab\nc'd\n\nefg");
        let starts: Vec<Option<usize>> = token_marks(&stream.tokens)
            .into_iter()
            .map(|marks| marks.map(|m| m.start))
            .collect();
        assert_eq!(
            starts,
            vec![
                Some(0),
                Some(1),
                None,
                Some(2),
                None,
                Some(4),
                Some(5),
                Some(6)
            ]
        );
        assert_eq!(required_mark_count(&stream.tokens), 8);
    }

    #[test]
    fn empty_lyric_needs_no_marks() {
        assert_eq!(required_mark_count(&[]), 0);
        assert_eq!(required_mark_count(&tokenize("\n\n\n").tokens), 0);
    }

    #[test]
    fn single_line_marks_are_contiguous() {
        let stream = tokenize("abc");
        let marks = token_marks(&stream.tokens);
        assert_eq!(marks[0], Some(TokenMarks { start: 0, end: 1 }));
        assert_eq!(marks[2], Some(TokenMarks { start: 2, end: 3 }));
        assert_eq!(required_mark_count(&stream.tokens), 4);
    }

    fn arb_lyric() -> impl Strategy<Value = String> {
        prop::collection::vec(prop_oneof![Just("a"), Just("b'c"), Just("\n"), Just("\n\n")], 0..40)
            .prop_map(|parts| parts.concat())
    }

    proptest! {
        /// Words own consecutive, non-overlapping intervals; each paragraph
        /// boundary skips exactly one mark
        #[test]
        fn word_intervals_chain(text in arb_lyric()) {
            let stream = tokenize(&text);
            let marks = token_marks(&stream.tokens);
            let mut expected_start = 0;
            let mut boundaries = stream.paragraph_end_marks.iter().copied().peekable();

            for (token, interval) in stream.tokens.iter().zip(&marks) {
                if token.is_paragraph_break() {
                    let boundary = boundaries.next();
                    prop_assert_eq!(boundary, Some(expected_start + 1));
                    expected_start += 1;
                }
                if let Some(interval) = interval {
                    prop_assert!(token.is_word());
                    prop_assert_eq!(interval.start, expected_start);
                    prop_assert_eq!(interval.end, expected_start + 1);
                    expected_start = interval.end;
                }
            }
            prop_assert!(boundaries.next().is_none());
        }

        /// The required count covers exactly the last word's end mark
        #[test]
        fn required_count_matches_last_word(text in arb_lyric()) {
            let stream = tokenize(&text);
            let words = stream.tokens.iter().filter(|t| t.is_word()).count();
            let required = required_mark_count(&stream.tokens);
            if words == 0 {
                prop_assert_eq!(required, 0);
            } else {
                let paragraphs_before_last_word = stream
                    .tokens
                    .iter()
                    .rposition(Token::is_word)
                    .map(|last| stream.tokens[..last].iter().filter(|t| t.is_paragraph_break()).count())
                    .unwrap_or(0);
                prop_assert_eq!(required, words + paragraphs_before_last_word + 1);
            }
        }
    }
}
