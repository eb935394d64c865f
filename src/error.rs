//! Error type for building and searching schedules.
//!
//! Every variant is fatal for the solve call that produced it: the search
//! loop has no per-iteration isolation, so a failed build aborts the whole
//! search and the error is returned to the caller.

use thiserror::Error;

use crate::models::{JobId, ResourceId};

/// Errors raised while configuring, building, or searching.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShopError {
    /// A search algorithm name that is not recognized.
    #[error("Unknown search algorithm: {0}")]
    UnknownAlgorithm(String),
    /// A random-order generator name that is not recognized.
    #[error("Unknown random algorithm: {0}")]
    UnknownRandomAlgorithm(String),
    /// A configuration value outside its allowed range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// An operation references a resource that was never registered.
    #[error("Job '{job}' references unknown resource {resource}")]
    UnknownResource { job: JobId, resource: ResourceId },
    /// The visitation order names a job missing from the catalog.
    #[error("Visitation order references unknown job '{0}'")]
    UnknownJob(JobId),
    /// A job appears in the visitation order more often than it has operations.
    #[error("Job '{job}' visited {visits} times but has only {operations} operations")]
    OperationOverflow {
        job: JobId,
        visits: usize,
        operations: usize,
    },
    /// A start or end time does not fit in `i64`.
    #[error("Job '{0}' is scheduled past the representable time range")]
    TimeOverflow(JobId),
    /// A parallel, sequence, or alternative node without children.
    #[error("Job '{0}' contains a composite operation without children")]
    EmptyComposite(JobId),
    /// The search terminated before a single candidate was evaluated.
    #[error("Search terminated before any candidate was evaluated")]
    NoSolution,
}
