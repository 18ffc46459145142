//! Core error types for karaoke-core
//!
//! # Examples
//!
//! ```rust
//! use karaoke_core::utils::errors::{CoreError, ErrorCategory};
//!
//! let color_err = CoreError::invalid_color("#12");
//! let time_err = CoreError::invalid_time("1:2x", "seconds are not numeric");
//!
//! assert_eq!(color_err.category(), ErrorCategory::Format);
//! assert!(time_err.suggestion().is_some());
//! ```

mod category;
mod core;

pub use category::ErrorCategory;
pub use core::{CoreError, Result};

impl CoreError {
    /// Create color error from invalid format
    pub fn invalid_color<T: ::core::fmt::Display>(value: T) -> Self {
        Self::InvalidColor(format!("{value}"))
    }

    /// Create numeric error from parsing failure
    pub fn invalid_numeric<T: ::core::fmt::Display>(value: T, reason: &str) -> Self {
        Self::InvalidNumeric(format!("'{value}': {reason}"))
    }

    /// Create time error from invalid format
    pub fn invalid_time<T: ::core::fmt::Display>(time: T, reason: &str) -> Self {
        Self::InvalidTime(format!("'{time}': {reason}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_recoverability() {
        assert!(CoreError::invalid_time("x", "bad").is_recoverable());
        assert!(CoreError::config("zero fps").is_recoverable());
        assert!(CoreError::invalid_color("#12").is_recoverable());
    }

    #[test]
    fn error_display() {
        let err = CoreError::invalid_numeric("12a", "not a number");
        assert_eq!(err.to_string(), "Invalid numeric value: '12a': not a number");

        let err = CoreError::config("ready dots period must be positive");
        assert_eq!(
            err.to_string(),
            "Configuration error: ready dots period must be positive"
        );
    }

    #[test]
    fn error_categories() {
        assert_eq!(CoreError::invalid_color("x").category(), ErrorCategory::Format);
        assert_eq!(
            CoreError::config("x").category(),
            ErrorCategory::Configuration
        );
        assert_eq!(CoreError::invalid_time("x", "bad").category(), ErrorCategory::Format);
        assert_eq!(ErrorCategory::Format.to_string(), "format");
        assert!(CoreError::config("x").suggestion().is_none());
    }
}
