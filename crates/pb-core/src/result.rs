//! Result type aliases

use crate::error::{OpError, ValidationErrors};

/// Standard Result type for Postboard operations
pub type OpResult<T> = Result<T, OpError>;

/// Result of running a contract over an entity
pub type ValidationResult = Result<(), ValidationErrors>;
