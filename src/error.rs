//! Unified error types for chatlog.
//!
//! This module provides a single [`ChatlogError`] enum that covers all error
//! cases in the library, following the same shape as the error types of
//! `serde_json` and `csv`: one enum to match on, with a crate-wide
//! [`Result`] alias.
//!
//! Comparisons between messages are typed (`Ord for Message`), so there is no
//! runtime "type mismatch" condition: comparing a message against a foreign
//! type does not compile.

use thiserror::Error;

/// A specialized [`Result`] type for chatlog operations.
///
/// # Example
///
/// ```rust
/// use chatlog::error::Result;
/// use chatlog::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     // ... operations that may fail
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlogError>;

/// The error type for all chatlog operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlogError {
    /// No thread is indexed under the given participant label.
    ///
    /// Returned by [`Chat::thread_by_label`](crate::Chat::thread_by_label).
    /// The label is the participant list joined with `", "`, in the order the
    /// participants were given.
    #[error("No thread found for participants '{key}'")]
    NotFound {
        /// The label that was looked up
        key: String,
    },

    /// A date argument could not be turned into a date-time value.
    ///
    /// This covers impossible calendar values such as `(2024, 2, 30)`,
    /// unparseable date strings, and windows that overflow the supported range.
    #[error("Invalid date '{input}': {reason}")]
    InvalidDate {
        /// The offending input, rendered as text
        input: String,
        /// What is wrong with it
        reason: &'static str,
    },

    /// JSON deserialization error while reading chat records.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatlogError {
    /// Creates a not-found error for a thread label.
    pub fn not_found(key: impl Into<String>) -> Self {
        ChatlogError::NotFound { key: key.into() }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>, reason: &'static str) -> Self {
        ChatlogError::InvalidDate {
            input: input.into(),
            reason,
        }
    }

    /// Returns `true` if this is a lookup miss.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChatlogError::NotFound { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatlogError::InvalidDate { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ChatlogError::not_found("Alice, Bob");
        let display = err.to_string();
        assert!(display.contains("No thread found"));
        assert!(display.contains("Alice, Bob"));
    }

    #[test]
    fn test_invalid_date_display() {
        let err = ChatlogError::invalid_date("2024-02-30", "no such calendar date");
        let display = err.to_string();
        assert!(display.contains("2024-02-30"));
        assert!(display.contains("no such calendar date"));
    }

    #[test]
    fn test_is_methods() {
        let missing = ChatlogError::not_found("nobody");
        assert!(missing.is_not_found());
        assert!(!missing.is_invalid_date());

        let date_err = ChatlogError::invalid_date("bad", "unrecognized format");
        assert!(date_err.is_invalid_date());
        assert!(!date_err.is_not_found());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: ChatlogError = json_err.into();
        assert!(err.to_string().contains("JSON error"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_error_debug() {
        let err = ChatlogError::not_found("x");
        let debug = format!("{:?}", err);
        assert!(debug.contains("NotFound"));
    }
}
