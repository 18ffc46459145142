//! Numeric helpers for highlight and pre-roll progress

use super::time::Millis;

/// Fraction of the interval `[start, end]` elapsed at `time`, in `[0, 1]`
///
/// A zero-length (or inverted) interval has no inside: it reads `1.0` once
/// `time >= start` and `0.0` before.
///
/// # Examples
///
/// ```rust
/// # use karaoke_core::utils::interval_progress;
/// assert_eq!(interval_progress(150, 100, 200), 0.5);
/// assert_eq!(interval_progress(100, 100, 100), 1.0);
/// assert_eq!(interval_progress(99, 100, 100), 0.0);
/// ```
#[must_use]
pub fn interval_progress(time: Millis, start: Millis, end: Millis) -> f32 {
    if end <= start {
        return if time >= start { 1.0 } else { 0.0 };
    }
    if time <= start {
        return 0.0;
    }
    if time >= end {
        return 1.0;
    }

    let elapsed = f64::from(time - start);
    let duration = f64::from(end - start);
    clamp_unit((elapsed / duration) as f32)
}

/// Progress through the pre-roll window `[target - period, target)`
///
/// Returns `None` outside the window, including when `period` is zero.
#[must_use]
pub fn preroll_progress(time: Millis, target: Millis, period: Millis) -> Option<f32> {
    if period == 0 || time >= target {
        return None;
    }
    let window_start = i64::from(target) - i64::from(period);
    let time = i64::from(time);
    if time < window_start {
        return None;
    }
    let progress = (time - window_start) as f64 / f64::from(period);
    Some(clamp_unit(progress as f32))
}

/// Clamp a value into `[0, 1]`, mapping NaN to `0.0`
#[must_use]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
