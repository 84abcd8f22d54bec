//! Error types for bucket operations.

use std::fmt::Display;

use strum::Display as StrumDisplay;
use thiserror::Error;

/// Storage call being attempted when a transport failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum StoreOperation {
    /// Listing the bucket contents.
    #[strum(serialize = "list objects")]
    List,
    /// Fetching one object body.
    #[strum(serialize = "get object")]
    Get,
    /// Writing one object.
    #[strum(serialize = "put object")]
    Put,
    /// Removing one object.
    #[strum(serialize = "delete object")]
    Delete,
}

/// Errors raised by input validation and storage calls.
///
/// Validation failures are caught before any network call and surfaced as
/// inline form messages. Transport failures come back from the store, are
/// never retried automatically, and leave prior state in place.
#[derive(Debug, Error)]
pub enum BucketError {
    /// Input rejected before any network call.
    #[error("{message}")]
    Validation { message: String },

    /// Storage call failed (transport, auth, or missing object).
    #[error("{operation} failed: {message}")]
    Transport {
        operation: StoreOperation,
        message: String,
    },
}

impl BucketError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a transport error with operation context.
    pub fn transport(operation: StoreOperation, message: impl Display) -> Self {
        Self::Transport {
            operation,
            message: message.to_string(),
        }
    }

    /// Check if this error was raised before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = BucketError::validation("File content is required.");
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "File content is required.");
    }

    #[test]
    fn test_transport_error_display() {
        let err = BucketError::transport(StoreOperation::List, "connection refused");
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "list objects failed: connection refused");
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(StoreOperation::Get.to_string(), "get object");
        assert_eq!(StoreOperation::Delete.to_string(), "delete object");
    }
}
