//! Job model.
//!
//! A job is an ordered list of top-level operations. Each top-level
//! operation must complete before the next one may start. The required
//! inventory multiplies every step's declared duration.
//!
//! A [`RunningJob`] is a job that already occupies a resource when
//! scheduling begins.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Operation, ResourceId};

/// Job identifier. Integer and string ids are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    /// Creates an id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u32> for JobId {
    fn from(id: u32) -> Self {
        Self(id.to_string())
    }
}

/// A job to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    /// Unique job identifier.
    pub id: JobId,
    /// Human-readable name.
    pub name: String,
    /// Top-level operations, executed in list order.
    pub operations: Vec<Operation>,
    /// Quantity to produce; multiplies every step duration (default: 1).
    pub required_inventory: i64,
    /// Material tag used for material switchover penalties.
    pub material: Option<String>,
    /// Whether the job is already running on the shop floor.
    pub running: bool,
}

impl Job {
    /// Creates a new job with the given id.
    pub fn new(id: impl Into<JobId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            operations: Vec::new(),
            required_inventory: 1,
            material: None,
            running: false,
        }
    }

    /// Sets the job name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Appends a top-level operation.
    pub fn with_operation(mut self, operation: impl Into<Operation>) -> Self {
        self.operations.push(operation.into());
        self
    }

    /// Sets the required inventory.
    pub fn with_required_inventory(mut self, quantity: i64) -> Self {
        self.required_inventory = quantity;
        self
    }

    /// Sets the material tag.
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    /// Number of top-level operations, i.e. visits in a visitation order.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Whether this job has any operations.
    pub fn has_operations(&self) -> bool {
        !self.operations.is_empty()
    }

    /// Effective duration of a step for this job; `None` on overflow.
    #[inline]
    pub fn effective_duration(&self, declared: i64) -> Option<i64> {
        declared.checked_mul(self.required_inventory)
    }
}

/// A job already in progress on a resource.
///
/// Its first top-level operation is underway on `resource` and needs
/// `remaining_time` more units; the builder reserves that slice before
/// anything else is placed on the resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunningJob {
    /// The job itself; `running` is forced to `true` on insertion.
    pub job: Job,
    /// Resource currently occupied.
    pub resource: ResourceId,
    /// Time left on the in-progress first operation.
    pub remaining_time: i64,
}

impl RunningJob {
    /// Binds a job to the resource it occupies.
    pub fn new(job: Job, resource: ResourceId, remaining_time: i64) -> Self {
        Self {
            job,
            resource,
            remaining_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_builder() {
        let job = Job::new("IPhone 11 Case")
            .with_name("IPhone 11 Case Acetal")
            .with_operation(Operation::step(0, 20))
            .with_operation(Operation::step(2, 5))
            .with_required_inventory(100)
            .with_material("ACETAL");

        assert_eq!(job.id.as_str(), "IPhone 11 Case");
        assert_eq!(job.name, "IPhone 11 Case Acetal");
        assert_eq!(job.operation_count(), 2);
        assert_eq!(job.required_inventory, 100);
        assert_eq!(job.material.as_deref(), Some("ACETAL"));
        assert!(!job.running);
        assert_eq!(job.effective_duration(20), Some(2000));
        assert_eq!(job.with_required_inventory(i64::MAX).effective_duration(2), None);
    }

    #[test]
    fn test_job_empty() {
        let job = Job::new(5u32);
        assert_eq!(job.id, JobId::from("5"));
        assert!(!job.has_operations());
        assert_eq!(job.required_inventory, 1);
    }

    #[test]
    fn test_job_id_display_and_serde() {
        let id = JobId::new("Galaxy Case PP");
        assert_eq!(id.to_string(), "Galaxy Case PP");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"Galaxy Case PP\"");
    }
}
