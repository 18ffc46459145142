//! Shared utilities for karaoke-core
//!
//! Time notation, progress arithmetic and the crate's error types.

pub mod errors;
pub mod math;
pub mod time;

pub use errors::{CoreError, ErrorCategory, Result};
pub use math::{clamp_unit, interval_progress, preroll_progress};
pub use time::{format_timestamp, frame_time, last_frame, parse_timestamp, Millis};

/// Parse a `#RRGGBB` or `#RRGGBBAA` color into RGBA bytes
///
/// Missing alpha means fully opaque.
///
/// # Examples
///
/// ```rust
/// # use karaoke_core::utils::parse_hex_color;
/// assert_eq!(parse_hex_color("#FF8000")?, [255, 128, 0, 255]);
/// assert_eq!(parse_hex_color("#00000080")?, [0, 0, 0, 128]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// Returns [`CoreError::InvalidColor`] for a missing `#`, a wrong length
/// or non-hex digits.
pub fn parse_hex_color(text: &str) -> Result<[u8; 4]> {
    let hex = text
        .trim()
        .strip_prefix('#')
        .ok_or_else(|| CoreError::invalid_color(text))?;
    if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
        return Err(CoreError::invalid_color(text));
    }

    let mut rgba = [0, 0, 0, 255];
    for (slot, chunk) in rgba.iter_mut().zip(hex.as_bytes().chunks(2)) {
        let pair = core::str::from_utf8(chunk).map_err(|_| CoreError::invalid_color(text))?;
        *slot = u8::from_str_radix(pair, 16).map_err(|_| CoreError::invalid_color(text))?;
    }
    Ok(rgba)
}

/// Format RGBA bytes as `#RRGGBB`, or `#RRGGBBAA` when not opaque
#[must_use]
pub fn format_hex_color(rgba: [u8; 4]) -> String {
    let [r, g, b, a] = rgba;
    if a == 255 {
        format!("#{r:02X}{g:02X}{b:02X}")
    } else {
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}
