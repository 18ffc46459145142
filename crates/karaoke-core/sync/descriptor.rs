//! Render descriptor: the pure output of one sync query
//!
//! Holds indices and ratios only. It borrows nothing from the lyric or the
//! mark store, so renderers and encoders can keep it across threads.

use crate::utils::Millis;

/// Everything a renderer needs to paint one instant
#[derive(Debug, Clone, PartialEq)]
pub struct RenderDescriptor {
    /// Time this descriptor was evaluated for
    pub time: Millis,

    /// The two visible-line slots
    ///
    /// Slot values are global line indices so renderers can index
    /// `Lyrics::lines` directly; [`VisibleLine::paragraph_line`] carries the
    /// same line counted from its paragraph's first line. A slot is `None`
    /// when its line does not exist or belongs to another paragraph than
    /// the one on screen.
    pub visible_lines: [Option<usize>; 2],

    /// Whether any text should be drawn
    pub should_show_text: bool,

    /// Visible lines, upper row first; empty while text is hidden
    pub lines: Vec<VisibleLine>,

    /// Pre-roll cue before a paragraph's first mark
    pub ready_dots: Option<ReadyDots>,
}

impl RenderDescriptor {
    /// Descriptor for a lyric with nothing to show
    #[must_use]
    pub const fn empty(time: Millis) -> Self {
        Self {
            time,
            visible_lines: [None, None],
            should_show_text: false,
            lines: Vec::new(),
            ready_dots: None,
        }
    }

    /// Visible line drawn in `row` (0 = upper, 1 = lower)
    #[must_use]
    pub fn line_in_row(&self, row: usize) -> Option<&VisibleLine> {
        self.lines.iter().find(|line| line.row == row)
    }

    /// Highlight ratio of the token at `position`, if it is visible
    #[must_use]
    pub fn highlight_of(&self, position: usize) -> Option<f32> {
        self.lines
            .iter()
            .flat_map(|line| &line.tokens)
            .find(|token| token.position == position)
            .map(|token| token.ratio)
    }
}

/// One line placed on screen
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleLine {
    /// Global line index
    pub line: usize,

    /// Display row, from the line's parity inside its paragraph
    pub row: usize,

    /// Paragraph index
    pub paragraph: usize,

    /// Line index inside its paragraph (0 = the paragraph's first line)
    pub paragraph_line: usize,

    /// Horizontal offset (the lower row is indented)
    pub x_offset: f32,

    /// Vertical offset in line heights
    pub y_offset: f32,

    /// Words of the line with their highlight
    pub tokens: Vec<TokenHighlight>,
}

impl VisibleLine {
    /// Total highlight width of the line
    #[must_use]
    pub fn width(&self) -> f32 {
        self.tokens.iter().map(|token| token.width).sum()
    }

    /// Highlighted part of the line width, for a single sweep fill
    #[must_use]
    pub fn highlighted_width(&self) -> f32 {
        self.tokens
            .iter()
            .map(|token| token.width * token.ratio)
            .sum()
    }
}

/// Highlight state of one word
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenHighlight {
    /// Token position in the lyric
    pub position: usize,

    /// Fraction of the word sung, in `[0, 1]`
    pub ratio: f32,

    /// Relative highlight width (linked words are wider)
    pub width: f32,
}

/// Ready-dots pre-roll state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadyDots {
    /// Line the dots are drawn over (the paragraph's first line)
    pub line: usize,

    /// Sweep progress through the pre-roll window, in `[0, 1]`
    pub progress: f32,

    /// Number of dots drawn
    pub count: u32,
}

impl ReadyDots {
    /// Dots already completely swept
    #[must_use]
    pub fn filled(&self) -> u32 {
        ((self.progress * self.count as f32).floor() as u32).min(self.count)
    }
}
