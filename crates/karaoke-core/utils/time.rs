//! Millisecond timestamp helpers
//!
//! Marks and playback positions are plain `u32` millisecond counts. These
//! helpers convert them to and from the `M:SS.mmm` notation shown in log
//! output and accepted in project mark lists, and map export frame numbers
//! to timestamps.

use super::errors::{CoreError, Result};

/// Playback time or mark value in milliseconds
pub type Millis = u32;

/// Parse a timestamp into milliseconds
///
/// Accepts `M:SS`, `M:SS.f` with one to three fractional digits, or a bare
/// millisecond count.
///
/// # Examples
///
/// ```rust
/// # use karaoke_core::utils::parse_timestamp;
/// assert_eq!(parse_timestamp("1:30.5")?, 90_500);
/// assert_eq!(parse_timestamp("0:00.25")?, 250);
/// assert_eq!(parse_timestamp("1234")?, 1234);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`CoreError::InvalidTime`] if any component is missing, not
/// numeric, out of range, or the result does not fit in a `u32`.
pub fn parse_timestamp(text: &str) -> Result<Millis> {
    let text = text.trim();
    let Some((minutes, rest)) = text.split_once(':') else {
        return text
            .parse::<Millis>()
            .map_err(|_| CoreError::invalid_time(text, "expected milliseconds or M:SS.mmm"));
    };

    let minutes: u64 = minutes
        .parse()
        .map_err(|_| CoreError::invalid_time(text, "minutes are not numeric"))?;

    let (seconds, fraction) = match rest.split_once('.') {
        Some((seconds, fraction)) => (seconds, Some(fraction)),
        None => (rest, None),
    };

    if seconds.len() != 2 {
        return Err(CoreError::invalid_time(text, "seconds need two digits"));
    }
    let seconds: u64 = seconds
        .parse()
        .map_err(|_| CoreError::invalid_time(text, "seconds are not numeric"))?;
    if seconds >= 60 {
        return Err(CoreError::invalid_time(text, "seconds must be < 60"));
    }

    let millis = match fraction {
        None => 0,
        Some(fraction) => {
            let value: u64 = fraction
                .parse()
                .map_err(|_| CoreError::invalid_time(text, "fraction is not numeric"))?;
            match fraction.len() {
                1 => value * 100,
                2 => value * 10,
                3 => value,
                _ => return Err(CoreError::invalid_time(text, "too many decimal places")),
            }
        }
    };

    minutes
        .checked_mul(60_000)
        .and_then(|ms| ms.checked_add(seconds * 1_000 + millis))
        .and_then(|total| Millis::try_from(total).ok())
        .ok_or_else(|| CoreError::invalid_time(text, "timestamp overflows"))
}

/// Format milliseconds as `M:SS.mmm`
#[must_use]
pub fn format_timestamp(ms: Millis) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;
    format!("{minutes}:{seconds:02}.{millis:03}")
}

/// Timestamp of an export frame
///
/// Uses integer arithmetic (`frame * 1000 / fps`, floored) so live preview
/// and offline export agree on the exact millisecond for a frame.
///
/// # Errors
///
/// Returns [`CoreError::Config`] for `fps == 0` and
/// [`CoreError::InvalidTime`] if the timestamp does not fit in a `u32`.
pub fn frame_time(frame: u64, fps: u32) -> Result<Millis> {
    if fps == 0 {
        return Err(CoreError::config("frame rate must be positive"));
    }
    let ms = frame * 1_000 / u64::from(fps);
    Millis::try_from(ms).map_err(|_| CoreError::invalid_time(frame, "frame time overflows"))
}

/// Number of the last frame needed to cover `total_ms` at `fps`
///
/// # Errors
///
/// Returns [`CoreError::Config`] for `fps == 0`.
pub fn last_frame(total_ms: Millis, fps: u32) -> Result<u64> {
    if fps == 0 {
        return Err(CoreError::config("frame rate must be positive"));
    }
    Ok(u64::from(total_ms) * u64::from(fps) / 1_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_timestamps() {
        assert_eq!(parse_timestamp("0:00.000").unwrap(), 0);
        assert_eq!(parse_timestamp("1:30.5").unwrap(), 90_500);
        assert_eq!(parse_timestamp("2:05.25").unwrap(), 125_250);
        assert_eq!(parse_timestamp("10:00.001").unwrap(), 600_001);
        assert_eq!(parse_timestamp(" 0:07 ").unwrap(), 7_000);
    }

    #[test]
    fn parse_bare_milliseconds() {
        assert_eq!(parse_timestamp("0").unwrap(), 0);
        assert_eq!(parse_timestamp("98765").unwrap(), 98_765);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("abc").is_err());
        assert!(parse_timestamp("1:7").is_err());
        assert!(parse_timestamp("1:75.000").is_err());
        assert!(parse_timestamp("1:05.0001").is_err());
        assert!(parse_timestamp("x:05").is_err());
        assert!(parse_timestamp("-5").is_err());
        assert!(parse_timestamp("99999999:00").is_err());
    }

    #[test]
    fn parse_rejects_huge_minute_counts() {
        assert_eq!(
            parse_timestamp("100000000000000000:00"),
            Err(CoreError::invalid_time(
                "100000000000000000:00",
                "timestamp overflows"
            ))
        );
        assert!(parse_timestamp("18446744073709551615:59.999").is_err());
        assert_eq!(parse_timestamp("71582:47.295").unwrap(), Millis::MAX);
    }

    #[test]
    fn format_round_trips_through_parse() {
        for ms in [0, 1, 999, 1_000, 59_999, 60_000, 754_321] {
            assert_eq!(parse_timestamp(&format_timestamp(ms)).unwrap(), ms);
        }
        assert_eq!(format_timestamp(61_005), "1:01.005");
    }

    #[test]
    fn frame_times_are_floored() {
        assert_eq!(frame_time(0, 30).unwrap(), 0);
        assert_eq!(frame_time(1, 30).unwrap(), 33);
        assert_eq!(frame_time(2, 30).unwrap(), 66);
        assert_eq!(frame_time(3, 30).unwrap(), 100);
        assert_eq!(frame_time(25, 25).unwrap(), 1_000);
        assert!(frame_time(1, 0).is_err());
    }

    #[test]
    fn last_frame_covers_duration() {
        assert_eq!(last_frame(1_000, 30).unwrap(), 30);
        assert_eq!(last_frame(0, 60).unwrap(), 0);
        assert!(last_frame(1_000, 0).is_err());
    }
}
