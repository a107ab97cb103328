//! Error types for the task store and request layer.
//!
//! The scheduling engine itself never fails; these errors come from the
//! plumbing around it.

use std::fmt;

use crate::models::TaskId;
use crate::validation::ValidationError;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside the scheduling engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// No task with this ID exists in the store.
    TaskNotFound(TaskId),

    /// A task could not be created or updated.
    InvalidTask(String),

    /// A request parameter was rejected.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Raw value as received.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The store has no pending task to act on.
    NoPendingTasks,

    /// Input failed validation.
    Validation(Vec<ValidationError>),
}

impl Error {
    pub(crate) fn invalid_parameter(
        name: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "Task not found: {}", id),
            Self::InvalidTask(msg) => write!(f, "Invalid task: {}", msg),
            Self::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "Invalid parameter '{}' = '{}': {}", name, value, reason),
            Self::NoPendingTasks => write!(f, "No pending tasks to execute"),
            Self::Validation(errors) => {
                write!(f, "Validation failed with {} error(s)", errors.len())?;
                for e in errors {
                    write!(f, "; {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<Vec<ValidationError>> for Error {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display() {
        assert_eq!(Error::TaskNotFound(TaskId(4)).to_string(), "Task not found: 4");
        assert_eq!(
            Error::invalid_parameter("quantum", "abc", "not an integer").to_string(),
            "Invalid parameter 'quantum' = 'abc': not an integer"
        );
        assert_eq!(
            Error::NoPendingTasks.to_string(),
            "No pending tasks to execute"
        );
    }

    #[test]
    fn test_validation_display_lists_errors() {
        let err: Error = vec![ValidationError::new(
            ValidationErrorKind::NonPositiveDuration,
            "Task 1 has duration 0",
        )]
        .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Validation failed with 1 error(s)"));
        assert!(msg.contains("Task 1 has duration 0"));
    }
}
