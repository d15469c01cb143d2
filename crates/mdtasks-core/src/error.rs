//! Error types for parsing task vocabulary.
//!
//! Recognizing a line never fails; these errors only arise when user-facing
//! strings (command-line arguments, config values) are converted into task
//! enums.

use thiserror::Error;

/// Errors that can occur when parsing task vocabulary from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The text does not name a priority level.
    #[error("unknown priority: {value} (expected highest, high, medium, low or lowest)")]
    UnknownPriority {
        /// The unrecognized value.
        value: String,
    },
}

impl ParseError {
    /// Creates an unknown priority error.
    pub fn unknown_priority(value: impl Into<String>) -> Self {
        ParseError::UnknownPriority {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_priority_message() {
        let err = ParseError::unknown_priority("urgent");
        assert_eq!(
            err.to_string(),
            "unknown priority: urgent (expected highest, high, medium, low or lowest)"
        );
    }
}
