//! Input validation for scheduling requests.
//!
//! The engine assumes a clean snapshot of pending tasks. These checks let
//! callers filter or reject bad input before scheduling. Detects:
//! - Duplicate task IDs
//! - Non-positive durations
//! - Negative arrival times
//! - Tasks that are not pending
//! - Non-positive round-robin quanta

use crate::models::{Task, TaskStatus};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same ID.
    DuplicateId,
    /// Task duration is zero or negative.
    NonPositiveDuration,
    /// Task arrival time is negative.
    NegativeArrival,
    /// Task is executing or completed.
    NotPending,
    /// Round-robin quantum is zero or negative.
    InvalidQuantum,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a task snapshot before scheduling.
///
/// Checks:
/// 1. No duplicate task IDs
/// 2. Every duration is >= 1
/// 3. Every arrival time is >= 0
/// 4. Every task is pending
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for task in tasks {
        if !seen.insert(task.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task ID: {}", task.id),
            ));
        }

        for check in [
            validate_duration(task.duration),
            validate_arrival(task.arrival_time),
        ] {
            if let Err(e) = check {
                errors.push(ValidationError::new(
                    e.kind,
                    format!("Task {}: {}", task.id, e.message),
                ));
            }
        }

        if task.status != TaskStatus::Pending {
            errors.push(ValidationError::new(
                ValidationErrorKind::NotPending,
                format!("Task {} is {}", task.id, task.status),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a round-robin quantum.
pub fn validate_quantum(quantum: i64) -> Result<(), ValidationError> {
    if quantum < 1 {
        return Err(ValidationError::new(
            ValidationErrorKind::InvalidQuantum,
            format!("Quantum must be at least 1, got {quantum}"),
        ));
    }
    Ok(())
}

/// Validates a task duration (>= 1).
pub fn validate_duration(duration: i64) -> Result<(), ValidationError> {
    if duration < 1 {
        return Err(ValidationError::new(
            ValidationErrorKind::NonPositiveDuration,
            format!("duration must be at least 1, got {duration}"),
        ));
    }
    Ok(())
}

/// Validates a task arrival time (>= 0).
pub fn validate_arrival(arrival_time: i64) -> Result<(), ValidationError> {
    if arrival_time < 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::NegativeArrival,
            format!("arrival_time must not be negative, got {arrival_time}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tasks() -> Vec<Task> {
        vec![
            Task::new(1).with_duration(3),
            Task::new(2).with_duration(1).with_arrival_time(4),
        ]
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_tasks(&sample_tasks()).is_ok());
        assert!(validate_tasks(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_task_id() {
        let tasks = vec![Task::new(1), Task::new(1)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_non_positive_duration() {
        let tasks = vec![Task::new(1).with_duration(0), Task::new(2).with_duration(-2)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(
            errors
                .iter()
                .filter(|e| e.kind == ValidationErrorKind::NonPositiveDuration)
                .count(),
            2
        );
    }

    #[test]
    fn test_negative_arrival() {
        let tasks = vec![Task::new(1).with_arrival_time(-1)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeArrival);
    }

    #[test]
    fn test_not_pending() {
        let tasks = vec![Task::new(1).with_status(TaskStatus::Completed)];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::NotPending);
        assert_eq!(errors[0].message, "Task 1 is completed");
    }

    #[test]
    fn test_multiple_errors() {
        let tasks = vec![
            Task::new(1).with_duration(0),
            Task::new(1).with_status(TaskStatus::Executing),
        ];
        let errors = validate_tasks(&tasks).unwrap_err();
        assert!(errors.len() >= 3);
    }

    #[test]
    fn test_quantum() {
        assert!(validate_quantum(1).is_ok());
        assert!(validate_quantum(5).is_ok());
        assert_eq!(
            validate_quantum(0).unwrap_err().kind,
            ValidationErrorKind::InvalidQuantum
        );
    }

    #[test]
    fn test_field_checks_share_messages() {
        assert!(validate_duration(1).is_ok());
        assert!(validate_arrival(0).is_ok());
        assert_eq!(
            validate_duration(0).unwrap_err().message,
            "duration must be at least 1, got 0"
        );

        let errors = validate_tasks(&[Task::new(4).with_arrival_time(-3)]).unwrap_err();
        assert_eq!(
            errors[0].message,
            "Task 4: arrival_time must not be negative, got -3"
        );
    }
}
