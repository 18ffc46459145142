//! Offline export driver
//!
//! Walks every frame of the track at a fixed frame rate, evaluates the
//! source at `frame * 1000 / fps` (floored to whole milliseconds) and hands
//! the descriptor to a renderer. The caller can cancel between frames.

use super::{FrameSource, Renderer};
use crate::core::{EditorError, Result};
use karaoke_core::utils::{frame_time, last_frame};
use karaoke_core::{CoreError, Millis};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Frame rate and length of an export
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExportConfig {
    /// Frames per second
    pub fps: u32,
    /// Track length
    pub total_ms: Millis,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            total_ms: 0,
        }
    }
}

impl ExportConfig {
    /// Export of `total_ms` at `fps`
    #[must_use]
    pub const fn new(fps: u32, total_ms: Millis) -> Self {
        Self { fps, total_ms }
    }

    /// Check that the frame rate is usable
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] for a zero frame rate.
    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(CoreError::config("export fps must be positive").into());
        }
        Ok(())
    }

    /// Number of frames written, including frame 0
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] for a zero frame rate.
    pub fn frame_count(&self) -> Result<u64> {
        Ok(last_frame(self.total_ms, self.fps)? + 1)
    }
}

/// Outcome of a finished export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Frames rendered
    pub frames: u64,
    /// Frames with lyric text on screen
    pub visible_frames: u64,
}

/// Frame-by-frame export loop
#[derive(Debug, Clone)]
pub struct ExportDriver {
    config: ExportConfig,
}

impl ExportDriver {
    /// Create a driver for `config`
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if `config` does not validate.
    pub fn new(config: ExportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Export configuration
    #[must_use]
    pub const fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Render every frame of the track
    ///
    /// `is_cancelled` is asked before each frame with the frame number.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::ExportCancelled`] with the first frame not
    /// rendered when `is_cancelled` returns true.
    pub fn run<S, R, C>(&self, source: &S, renderer: &mut R, mut is_cancelled: C) -> Result<ExportSummary>
    where
        S: FrameSource + ?Sized,
        R: Renderer + ?Sized,
        C: FnMut(u64) -> bool,
    {
        let ExportConfig { fps, total_ms } = self.config;
        let last = last_frame(total_ms, fps)?;
        log::info!("Exporting {} frames at {fps} fps ({total_ms} ms)", last + 1);

        let mut summary = ExportSummary::default();
        for frame in 0..=last {
            if is_cancelled(frame) {
                log::info!("Export cancelled at frame {frame}");
                return Err(EditorError::ExportCancelled { frame });
            }

            let time = frame_time(frame, fps)?;
            let descriptor = source.evaluate_at(time);
            log::trace!("Frame {frame} at {time} ms: lines {:?}", descriptor.visible_lines);
            renderer.render_frame(&descriptor);

            summary.frames += 1;
            if descriptor.should_show_text {
                summary.visible_frames += 1;
            }
        }

        log::info!(
            "Export finished: {} frames, {} with text",
            summary.frames,
            summary.visible_frames
        );
        Ok(summary)
    }
}
