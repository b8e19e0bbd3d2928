//! Input validation for simulation workloads.
//!
//! Checks the structural integrity of a task pool before it is indexed
//! and queued. Detects:
//! - Duplicate task ids
//! - Non-positive durations
//! - Negative creation times
//!
//! The scheduler's documented preconditions (unique, well-typed keys and
//! positive durations) hold for generated workloads by construction;
//! validation exists for externally supplied pools.

use std::collections::HashSet;

use crate::models::Task;

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
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two tasks share the same id.
    DuplicateId,
    /// A task's duration is zero or negative.
    NonPositiveDuration,
    /// A task was created before the simulation epoch.
    NegativeCreationTime,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a task pool.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_tasks(tasks: &[Task]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen_ids = HashSet::new();

    for task in tasks {
        if !seen_ids.insert(task.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate task id: {}", task.id),
            ));
        }
        if task.duration <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveDuration,
                format!("Task {} has non-positive duration {}", task.id, task.duration),
            ));
        }
        if task.created_at < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeCreationTime,
                format!("Task {} created at negative tick {}", task.id, task.created_at),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
