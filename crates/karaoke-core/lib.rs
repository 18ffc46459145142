//! # karaoke-core
//!
//! Lyric tokenizer and time synchronization engine for karaoke authoring.
//! Turns raw lyric text into mark-aligned tokens and answers, for any
//! playback time, which two lines are on screen and how far every visible
//! word is highlighted.
//!
//! ## Features
//!
//! - **Pure evaluation**: [`evaluate`] re-derives the display state from
//!   scratch, so live preview and frame-by-frame export agree exactly
//! - **One alignment rule**: every token/mark mapping goes through
//!   [`alignment::start_mark`]
//! - **Partial timing**: lyrics with missing or surplus marks render their
//!   timed prefix without panicking
//! - **Linked words**: `x'y` in the source renders as one wider unit
//!
//! ## Quick Start
//!
//! ```rust
//! use karaoke_core::{evaluate, Lyrics, SyncConfig};
//!
//! let lyrics = Lyrics::new("ab\nc'd\n\nefg");
//! assert_eq!(lyrics.required_mark_count(), 8);
//!
//! let marks = [0, 400, 800, 1_200, 5_000, 5_400, 5_800, 6_200];
//! let frame = evaluate(&lyrics, &marks, 600, &SyncConfig::default());
//! assert!(frame.should_show_text);
//! assert_eq!(frame.visible_lines, [Some(0), Some(1)]);
//! assert_eq!(frame.highlight_of(1), Some(0.5));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod alignment;
pub mod lyrics;
pub mod sync;
pub mod tokenizer;
pub mod utils;

pub use alignment::{Layout, LineSpan, ParagraphSpan, TokenMarks};
pub use lyrics::Lyrics;
pub use sync::{evaluate, ReadyDots, RenderDescriptor, SyncConfig, TokenHighlight, VisibleLine};
pub use tokenizer::{tokenize, Token, TokenKind, TokenStream};
pub use utils::{CoreError, Millis, Result};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
