//! Error categorization for filtering and grouping
//!
//! Lets front-ends decide how to surface a failure (inline field
//! validation versus a settings dialog) without matching every variant.

use super::CoreError;
use core::fmt;

/// Error category for filtering and user interface organization
///
/// # Examples
///
/// ```rust
/// use karaoke_core::utils::errors::{CoreError, ErrorCategory};
///
/// let error = CoreError::invalid_time("1:xx", "seconds are not numeric");
/// assert_eq!(error.category(), ErrorCategory::Format);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Problems with specific value formats like times, numbers or colors
    Format,

    /// Configuration values outside their valid range
    Configuration,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format => write!(f, "format"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}

impl CoreError {
    /// Get the category this error belongs to
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTime(_) | Self::InvalidNumeric(_) | Self::InvalidColor(_) => {
                ErrorCategory::Format
            }
            Self::Config(_) => ErrorCategory::Configuration,
        }
    }

    /// Get a short hint for resolving the error, if one applies
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidTime(_) => Some("Use m:ss.cc or a plain millisecond count"),
            Self::InvalidColor(_) => Some("Use #RRGGBB or #RRGGBBAA hex notation"),
            Self::InvalidNumeric(_) => Some("Check for stray characters around the number"),
            Self::Config(_) => None,
        }
    }
}
