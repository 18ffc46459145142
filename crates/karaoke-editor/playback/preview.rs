//! Live preview driver
//!
//! Polls the session clock on a fixed tick and hands each descriptor to a
//! [`Renderer`].

use crate::core::LyricSession;
use karaoke_core::RenderDescriptor;
use std::time::Duration;

/// Consumer of render descriptors: a display surface or a video encoder
pub trait Renderer {
    /// Paint or encode one frame
    fn render_frame(&mut self, descriptor: &RenderDescriptor);
}

impl<F: FnMut(&RenderDescriptor)> Renderer for F {
    fn render_frame(&mut self, descriptor: &RenderDescriptor) {
        self(descriptor);
    }
}

/// Fixed-tick preview loop around a renderer
#[derive(Debug)]
pub struct LivePreview<R> {
    renderer: R,
    tick_interval: Duration,
    frames_rendered: u64,
}

impl<R: Renderer> LivePreview<R> {
    /// Default polling interval
    pub const DEFAULT_TICK: Duration = Duration::from_millis(10);

    /// Create a preview rendering into `renderer`
    pub const fn new(renderer: R) -> Self {
        Self {
            renderer,
            tick_interval: Self::DEFAULT_TICK,
            frames_rendered: 0,
        }
    }

    /// Set the polling interval
    #[must_use]
    pub const fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Polling interval
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Frames rendered so far
    #[must_use]
    pub const fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// The wrapped renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Unwrap the renderer
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Evaluate at the current clock position and render once
    pub fn tick(&mut self, session: &LyricSession) -> RenderDescriptor {
        let descriptor = session.evaluate_now();
        self.render(&descriptor);
        descriptor
    }

    /// Evaluate a shared session at its clock position and render once
    #[cfg(feature = "multi-thread")]
    pub fn tick_shared(&mut self, session: &crate::core::SyncSession) -> RenderDescriptor {
        let descriptor = session.evaluate_now();
        self.render(&descriptor);
        descriptor
    }

    /// Tick until the clock finishes or `should_stop` returns true
    ///
    /// Sleeps one tick interval between frames and returns the number of
    /// frames rendered by this call.
    pub fn run(&mut self, session: &LyricSession, mut should_stop: impl FnMut() -> bool) -> u64 {
        let start = self.frames_rendered;
        loop {
            self.tick(session);
            if session.clock().is_finished() || should_stop() {
                break;
            }
            std::thread::sleep(self.tick_interval);
        }
        self.frames_rendered - start
    }

    fn render(&mut self, descriptor: &RenderDescriptor) {
        self.renderer.render_frame(descriptor);
        self.frames_rendered += 1;
    }
}
