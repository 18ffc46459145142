//! Playback clock interface and a manually driven implementation

use karaoke_core::Millis;

/// Monotonic playback-time source
///
/// Implemented by the audio subsystem. While playing, `position_ms` never
/// decreases except right after a `seek`.
pub trait Clock: core::fmt::Debug + Send + Sync {
    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback, keeping the position
    fn pause(&mut self);

    /// Jump to `ms`, clamped to the track length
    fn seek(&mut self, ms: Millis);

    /// Current playback position
    fn position_ms(&self) -> Millis;

    /// Track length
    fn total_ms(&self) -> Millis;

    /// Check if playback reached the end of the track
    fn is_finished(&self) -> bool {
        self.position_ms() >= self.total_ms()
    }
}

/// Clock that only moves when told to
///
/// Used by tests and headless tools in place of an audio device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualClock {
    position: Millis,
    total: Millis,
    playing: bool,
}

impl ManualClock {
    /// Paused clock at 0 for a track of `total_ms`
    #[must_use]
    pub const fn new(total_ms: Millis) -> Self {
        Self {
            position: 0,
            total: total_ms,
            playing: false,
        }
    }

    /// Check if the clock is running
    #[must_use]
    pub const fn is_playing(&self) -> bool {
        self.playing
    }

    /// Move forward by `ms` if playing; stops at the end of the track
    pub fn advance(&mut self, ms: Millis) {
        if !self.playing {
            return;
        }
        self.position = self.position.saturating_add(ms).min(self.total);
        if self.position == self.total {
            self.playing = false;
        }
    }
}

impl Clock for ManualClock {
    fn play(&mut self) {
        self.playing = self.position < self.total;
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, ms: Millis) {
        self.position = ms.min(self.total);
    }

    fn position_ms(&self) -> Millis {
        self.position
    }

    fn total_ms(&self) -> Millis {
        self.total
    }
}
