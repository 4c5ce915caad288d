//! Service Result type

use pb_core::error::{OpError, ValidationErrors};
use pb_core::result::OpResult;

/// Represents the result of a service call
#[derive(Debug)]
pub struct ServiceResult<T> {
    /// The result of the service call
    result: Option<T>,
    /// Why the call failed, when it did
    error: Option<OpError>,
    /// Flash message for display
    message: Option<String>,
}

impl<T> ServiceResult<T> {
    /// Create a successful service result
    pub fn success(result: T) -> Self {
        Self {
            result: Some(result),
            error: None,
            message: None,
        }
    }

    /// Create a successful service result with a message
    pub fn success_with_message(result: T, message: impl Into<String>) -> Self {
        Self {
            result: Some(result),
            error: None,
            message: Some(message.into()),
        }
    }

    /// Create a failed service result
    pub fn failure(error: impl Into<OpError>) -> Self {
        Self {
            result: None,
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Get the result (if successful)
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Get the error (if failed)
    pub fn error(&self) -> Option<&OpError> {
        self.error.as_ref()
    }

    /// Field errors, when the call failed validation
    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.error.as_ref().and_then(OpError::validation_errors)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Split into the value and the flash message
    pub fn into_parts(self) -> OpResult<(T, Option<String>)> {
        match (self.error, self.result) {
            (Some(error), _) => Err(error),
            (None, Some(result)) => Ok((result, self.message)),
            (None, None) => Err(OpError::Internal(
                "Service succeeded but no result was returned".to_string(),
            )),
        }
    }

    /// Convert into a plain result, dropping the message
    pub fn into_result(self) -> OpResult<T> {
        self.into_parts().map(|(result, _)| result)
    }
}
