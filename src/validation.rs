//! Input validation for workload configurations.
//!
//! The simulation core assumes validated input. These checks run at the
//! boundary (file loading, CLI flags) and detect:
//! - Out-of-range global parameters
//! - Too many tasks
//! - Priorities outside `0..=127`
//! - Tasks without periods
//! - Period lengths outside `1..=20`
//!
//! An empty task list is not an error: it simulates to an empty timeline.

use crate::models::{SimParams, TaskSpec, WorkloadConfig, MAX_PERIOD_UNITS, MAX_PRIORITY};

/// Largest accepted tick length.
pub const MAX_TICK_LENGTH: u32 = 10;

/// Largest accepted input time.
pub const MAX_INPUT_TIME: u32 = 20;

/// Largest accepted number of tasks.
pub const MAX_TASKS: usize = 20;

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
    /// `tick_length` or `input_time` out of range.
    InvalidParameter,
    /// More than [`MAX_TASKS`] tasks.
    TooManyTasks,
    /// Priority above 127.
    PriorityOutOfRange,
    /// A task has no processing periods.
    EmptyPeriods,
    /// A period is zero or longer than [`MAX_PERIOD_UNITS`].
    PeriodOutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates global simulation parameters.
pub fn validate_params(params: &SimParams) -> ValidationResult {
    let mut errors = Vec::new();
    check_params(params, &mut errors);
    finish(errors)
}

/// Validates a complete workload configuration.
///
/// Checks:
/// 1. `tick_length` in `1..=10`
/// 2. `input_time` at most 20
/// 3. At most 20 tasks
/// 4. Every priority in `0..=127`
/// 5. Every task has at least one period
/// 6. Every period in `1..=20`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(config: &WorkloadConfig) -> ValidationResult {
    let mut errors = Vec::new();
    check_params(&config.params, &mut errors);

    if config.tasks.len() > MAX_TASKS {
        errors.push(ValidationError::new(
            ValidationErrorKind::TooManyTasks,
            format!("{} tasks configured, at most {MAX_TASKS} allowed", config.tasks.len()),
        ));
    }

    for (id, task) in config.tasks.iter().enumerate() {
        check_task(id, task, &mut errors);
    }

    finish(errors)
}

fn check_params(params: &SimParams, errors: &mut Vec<ValidationError>) {
    if !(1..=MAX_TICK_LENGTH).contains(&params.tick_length) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidParameter,
            format!(
                "tick_length {} outside 1..={MAX_TICK_LENGTH}",
                params.tick_length
            ),
        ));
    }
    if params.input_time > MAX_INPUT_TIME {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidParameter,
            format!(
                "input_time {} outside 0..={MAX_INPUT_TIME}",
                params.input_time
            ),
        ));
    }
}

fn check_task(id: usize, task: &TaskSpec, errors: &mut Vec<ValidationError>) {
    if task.priority > MAX_PRIORITY {
        errors.push(ValidationError::new(
            ValidationErrorKind::PriorityOutOfRange,
            format!("Task {id} has priority {} (max {MAX_PRIORITY})", task.priority),
        ));
    }

    if task.periods.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyPeriods,
            format!("Task {id} has no processing periods"),
        ));
    }

    for (idx, &period) in task.periods.iter().enumerate() {
        if !(1..=MAX_PERIOD_UNITS).contains(&period) {
            errors.push(ValidationError::new(
                ValidationErrorKind::PeriodOutOfRange,
                format!("Task {id} period {idx} is {period} (expected 1..={MAX_PERIOD_UNITS})"),
            ));
        }
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
