//! Input validation for job-shop problems.
//!
//! Checks structural integrity of jobs, operation trees, and running-job
//! bindings before searching. Detects:
//! - Missing resource references
//! - Jobs without operations and composites without children
//! - Negative or overflowing durations and non-positive inventory
//! - Running jobs sharing a resource
//!
//! The builder fails on the first such issue it meets; validation reports
//! all of them at once.

use std::collections::HashMap;

use crate::models::{Job, Operation, ShopProblem};

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
    /// A step or running job references a resource that doesn't exist.
    InvalidResourceReference,
    /// A job has no operations.
    EmptyJob,
    /// A sequence, parallel, or alternative node has no children.
    EmptyComposite,
    /// A step duration or remaining time is negative.
    NegativeDuration,
    /// Duration × inventory does not fit in `i64`.
    DurationOverflow,
    /// Required inventory is zero or negative.
    NonPositiveInventory,
    /// Two running jobs are bound to the same resource.
    ConflictingRunningJobs,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a problem.
///
/// Checks:
/// 1. Every job has at least one operation
/// 2. No composite node is empty
/// 3. Every step references a registered resource
/// 4. No step has a negative or overflowing duration
/// 5. Required inventory is positive
/// 6. Running jobs are bound to registered resources, at most one per
///    resource, with non-negative remaining time
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &ShopProblem) -> ValidationResult {
    let mut errors = Vec::new();

    for job in problem.jobs() {
        validate_job(job, problem, &mut errors);
    }

    let mut bound: HashMap<_, &str> = HashMap::new();
    for running in problem.running_jobs() {
        let id = running.job.id.as_str();
        if problem.resource(running.resource).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidResourceReference,
                format!(
                    "Running job '{id}' is bound to unknown resource {}",
                    running.resource
                ),
            ));
        }
        if running.remaining_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDuration,
                format!(
                    "Running job '{id}' has negative remaining time {}",
                    running.remaining_time
                ),
            ));
        }
        if let Some(other) = bound.insert(running.resource, id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ConflictingRunningJobs,
                format!(
                    "Running jobs '{other}' and '{id}' are both bound to resource {}",
                    running.resource
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_job(job: &Job, problem: &ShopProblem, errors: &mut Vec<ValidationError>) {
    if !job.has_operations() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyJob,
            format!("Job '{}' has no operations", job.id),
        ));
    }

    if job.required_inventory <= 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveInventory,
            format!(
                "Job '{}' requires inventory {}",
                job.id, job.required_inventory
            ),
        ));
    }

    if job.operations.iter().any(Operation::has_empty_composite) {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyComposite,
            format!("Job '{}' contains a composite operation without children", job.id),
        ));
    }

    for step in job.operations.iter().flat_map(Operation::steps) {
        if problem.resource(step.resource).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidResourceReference,
                format!(
                    "Job '{}' references unknown resource {}",
                    job.id, step.resource
                ),
            ));
        }
        if job.effective_duration(step.duration).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DurationOverflow,
                format!(
                    "Job '{}' step duration {} × inventory {} overflows",
                    job.id, step.duration, job.required_inventory
                ),
            ));
        }
        if step.duration < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeDuration,
                format!(
                    "Job '{}' has a step with negative duration {}",
                    job.id, step.duration
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{RunningJob, Step};

    fn sample_problem() -> ShopProblem {
        let mut p = ShopProblem::plastics();
        let m1 = p.add_machine("M1", &[]);
        let m2 = p.add_machine("M2", &[]);
        p.add_job(
            Job::new("J1")
                .with_operation(Operation::step(m1, 10))
                .with_operation(Operation::parallel(vec![
                    Operation::step(m1, 5),
                    Operation::step(m2, 5),
                ])),
        );
        p.add_job(Job::new("J2").with_operation(Operation::alternatives(vec![
            Operation::step(m1, 3),
            Operation::step(m2, 3),
        ])));
        p
    }

    fn kinds(problem: &ShopProblem) -> Vec<ValidationErrorKind> {
        validate_problem(problem)
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_problem() {
        assert!(validate_problem(&sample_problem()).is_ok());
        assert!(validate_problem(&ShopProblem::new()).is_ok());
    }

    #[test]
    fn test_empty_job() {
        let mut p = sample_problem();
        p.add_job(Job::new("empty"));
        assert_eq!(kinds(&p), vec![ValidationErrorKind::EmptyJob]);
    }

    #[test]
    fn test_invalid_resource_reference() {
        let mut p = sample_problem();
        p.add_job(Job::new("J3").with_operation(Operation::alternatives(vec![
            Operation::step(0, 1),
            Operation::step(42, 1),
        ])));
        let errors = validate_problem(&p).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::InvalidResourceReference);
        assert!(errors[0].message.contains("42"));
    }

    #[test]
    fn test_empty_composite() {
        let mut p = sample_problem();
        p.add_job(
            Job::new("J3")
                .with_operation(Operation::sequence(vec![Operation::parallel(Vec::new())])),
        );
        assert_eq!(kinds(&p), vec![ValidationErrorKind::EmptyComposite]);
    }

    #[test]
    fn test_negative_values() {
        let mut p = sample_problem();
        p.add_job(
            Job::new("J3")
                .with_required_inventory(0)
                .with_operation(Step::new(0, -5)),
        );
        let k = kinds(&p);
        assert!(k.contains(&ValidationErrorKind::NonPositiveInventory));
        assert!(k.contains(&ValidationErrorKind::NegativeDuration));
    }

    #[test]
    fn test_duration_overflow() {
        let mut p = sample_problem();
        p.add_job(
            Job::new("J3")
                .with_required_inventory(i64::MAX / 2)
                .with_operation(Operation::step(0, 3)),
        );
        assert_eq!(kinds(&p), vec![ValidationErrorKind::DurationOverflow]);
    }

    #[test]
    fn test_running_job_checks() {
        let mut p = sample_problem();
        let op = || Operation::step(0, 10);
        p.add_running_job(RunningJob::new(Job::new("R1").with_operation(op()), 0, 30));
        p.add_running_job(RunningJob::new(Job::new("R2").with_operation(op()), 0, 20));
        p.add_running_job(RunningJob::new(Job::new("R3").with_operation(op()), 9, -1));

        let errors = validate_problem(&p).unwrap_err();
        let k: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(k.contains(&ValidationErrorKind::ConflictingRunningJobs));
        assert!(k.contains(&ValidationErrorKind::InvalidResourceReference));
        assert!(k.contains(&ValidationErrorKind::NegativeDuration));
        assert!(errors
            .iter()
            .any(|e| e.message.contains("'R1'") && e.message.contains("'R2'")));
    }
}
