//! Playback: clock, live preview and offline export
//!
//! Both drivers pull render descriptors through [`FrameSource`] rather than
//! subscribing to edits, so a live tick and an export frame at the same
//! time produce the same descriptor.

pub mod clock;
pub mod export;
pub mod preview;

pub use clock::{Clock, ManualClock};
pub use export::{ExportConfig, ExportDriver, ExportSummary};
pub use preview::{LivePreview, Renderer};

use karaoke_core::{Millis, RenderDescriptor};

/// Anything that can evaluate the display state at an absolute time
pub trait FrameSource {
    /// Descriptor for `time`
    fn evaluate_at(&self, time: Millis) -> RenderDescriptor;
}
