//! Validation error types

use std::fmt;

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., a date)
    InvalidFormat { field: &'static str, reason: &'static str },

    /// Invalid enum variant (e.g., an unknown meal code)
    InvalidVariant { field: &'static str, value: String },

    /// Numeric field outside its allowed range
    OutOfRange { field: &'static str, min: i32, max: i32 },

    /// Two entries that must agree do not
    Mismatch { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
            Self::OutOfRange { field, min, max } => {
                write!(f, "{} must be between {} and {}", field, min, max)
            }
            Self::Mismatch { field } => {
                write!(f, "{} entries do not match", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
