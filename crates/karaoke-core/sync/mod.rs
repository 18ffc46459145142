//! Sync state machine
//!
//! Given a lyric, its marks and an absolute playback time, [`evaluate`]
//! decides which two lines are on screen, how far each visible word is
//! highlighted and whether the ready-dots cue is running.
//!
//! # Two-row window
//!
//! A paragraph is shown two lines at a time. Lines alternate between the
//! upper and the lower row by their parity inside the paragraph, so when a
//! line has been sung its row is taken over by the line two below it. The
//! last two lines of a paragraph stay paired until the paragraph leaves the
//! screen.
//!
//! # Paragraph transitions
//!
//! After a paragraph's last word, its text lingers for the disappear
//! period. Once the next paragraph's pre-roll window opens (the ready-dots
//! period before its first mark) the screen switches to that paragraph's
//! first two lines with the dots sweeping over them. Between the two the
//! screen is empty.
//!
//! # Purity
//!
//! Every call re-derives the state from scratch; nothing carries over from
//! earlier calls. Live preview and offline export therefore agree exactly
//! for equal inputs, whatever order times are queried in. A mark that does
//! not exist yet is "not reached": the walk stops there and the words it
//! would time stay unhighlighted.
//!
//! # Example
//!
//! ```rust
//! use karaoke_core::{evaluate, Lyrics, SyncConfig};
//!
//! let lyrics = Lyrics::new("ab\ncd\nef");
//! let marks = [3_000, 3_100, 3_200, 3_300, 3_400, 3_500, 3_600];
//! let config = SyncConfig::default();
//!
//! let frame = evaluate(&lyrics, &marks, 3_250, &config);
//! assert_eq!(frame.visible_lines, [Some(2), Some(1)]);
//! assert_eq!(frame.highlight_of(3), Some(0.5));
//! ```

pub mod config;
pub mod descriptor;

#[cfg(test)]
mod tests;

pub use config::SyncConfig;
pub use descriptor::{ReadyDots, RenderDescriptor, TokenHighlight, VisibleLine};

use crate::alignment::ParagraphSpan;
use crate::utils::{interval_progress, preroll_progress, Millis};
use crate::Lyrics;

/// Read access to a possibly incomplete mark sequence
#[derive(Debug, Clone, Copy)]
struct MarkTimes<'a>(&'a [Millis]);

impl MarkTimes<'_> {
    fn at(self, index: usize) -> Option<Millis> {
        self.0.get(index).copied()
    }

    /// Check if mark `index` exists and `time` has reached it
    fn reached(self, index: usize, time: Millis) -> bool {
        self.at(index).is_some_and(|mark| time >= mark)
    }
}

/// Where the focused paragraph stands at the queried time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Words are still being sung (or not started yet)
    Singing,
    /// Last word sung, text still inside the disappear period
    Lingering,
    /// Disappear period over, next paragraph not in pre-roll yet
    Gone,
}

/// Evaluate the display state at `time`
///
/// `marks` may be shorter or longer than the lyric needs; missing marks
/// are never reached and surplus marks are ignored. The result depends on
/// nothing but the arguments.
#[must_use]
pub fn evaluate(
    lyrics: &Lyrics,
    marks: &[Millis],
    time: Millis,
    config: &SyncConfig,
) -> RenderDescriptor {
    let marks = MarkTimes(marks);
    let paragraphs = lyrics.paragraphs();
    if paragraphs.is_empty() {
        return RenderDescriptor::empty(time);
    }

    let (focus, phase) = focus_paragraph(paragraphs, marks, time, config);
    let paragraph = &paragraphs[focus];
    let visible_lines = line_window(lyrics, paragraph, marks, time);

    let mut descriptor = RenderDescriptor {
        time,
        visible_lines,
        should_show_text: phase != Phase::Gone,
        lines: Vec::new(),
        ready_dots: None,
    };
    if phase == Phase::Gone {
        return descriptor;
    }

    descriptor.lines = visible_lines
        .iter()
        .flatten()
        .map(|&line| place_line(lyrics, paragraph, line, marks, time, config))
        .collect();

    if phase == Phase::Singing {
        descriptor.ready_dots = marks
            .at(paragraph.start_mark)
            .and_then(|start| preroll_progress(time, start, config.ready_dots_period_ms))
            .map(|progress| ReadyDots {
                line: paragraph.first_line(),
                progress,
                count: config.ready_dots_count,
            });
    }

    descriptor
}

/// Pick the paragraph on screen and its phase
///
/// A paragraph hands over to the next one only once its last word has
/// been sung and the next paragraph's pre-roll window has opened.
fn focus_paragraph(
    paragraphs: &[ParagraphSpan],
    marks: MarkTimes<'_>,
    time: Millis,
    config: &SyncConfig,
) -> (usize, Phase) {
    let last = paragraphs.len() - 1;

    for (index, paragraph) in paragraphs.iter().enumerate() {
        let Some(words_end) = marks.at(paragraph.words_end_mark) else {
            return (index, Phase::Singing);
        };
        if time < words_end {
            return (index, Phase::Singing);
        }

        let next_preroll = paragraph
            .end_mark
            .and_then(|mark| marks.at(mark))
            .map(|next_start| next_start.saturating_sub(config.ready_dots_period_ms));
        if index < last && next_preroll.is_some_and(|preroll| time >= preroll) {
            continue;
        }

        let lingering = time < words_end.saturating_add(config.disappear_period_ms);
        return (index, if lingering { Phase::Lingering } else { Phase::Gone });
    }

    (last, Phase::Gone)
}

/// Two-row line window inside `paragraph`
fn line_window(
    lyrics: &Lyrics,
    paragraph: &ParagraphSpan,
    marks: MarkTimes<'_>,
    time: Millis,
) -> [Option<usize>; 2] {
    let first = paragraph.first_line();
    let last = paragraph.last_line();
    let mut slots = [Some(first), (first < last).then_some(first + 1)];

    for line in first..last {
        if !marks.reached(lyrics.lines()[line].end_mark, time) {
            break;
        }
        if line + 2 <= last {
            slots[(line - first) % 2] = Some(line + 2);
        }
    }

    slots
}

fn place_line(
    lyrics: &Lyrics,
    paragraph: &ParagraphSpan,
    line: usize,
    marks: MarkTimes<'_>,
    time: Millis,
    config: &SyncConfig,
) -> VisibleLine {
    let span = &lyrics.lines()[line];
    let paragraph_line = line - paragraph.first_line();
    let row = paragraph_line % 2;

    let tokens = span
        .tokens
        .clone()
        .filter_map(|position| {
            let token = lyrics.tokens().get(position)?;
            let interval = lyrics.token_marks(position)?;
            let ratio = match (marks.at(interval.start), marks.at(interval.end)) {
                (Some(start), Some(end)) => interval_progress(time, start, end),
                _ => 0.0,
            };
            Some(TokenHighlight {
                position,
                ratio,
                width: token.span_width(config.linked_glyph_scale),
            })
        })
        .collect();

    VisibleLine {
        line,
        row,
        paragraph: span.paragraph,
        paragraph_line,
        x_offset: row as f32 * config.second_line_indent,
        y_offset: row as f32 * config.line_spacing,
        tokens,
    }
}
