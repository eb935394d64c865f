//! Problem definition: resource registry, job catalog, switchover policy.
//!
//! A `ShopProblem` is assembled once and then borrowed immutably by the
//! builder and the search for the whole solve.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::{Job, JobId, Operation, Resource, ResourceId, ResourceKind, RunningJob};

/// Default machine changeover time between jobs (1 hour, in seconds).
pub const DEFAULT_JOB_SWITCH_PENALTY: i64 = 60 * 60;
/// Default material purge time (2 hours, in seconds).
pub const DEFAULT_MATERIAL_SWITCH_PENALTY: i64 = 2 * 60 * 60;

/// Fixed switchover penalties charged on machines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchoverPenalties {
    /// Charged whenever a machine moves on to another scheduled entry.
    pub job_switch: i64,
    /// Charged additionally when the material tag changes.
    pub material_switch: i64,
}

impl SwitchoverPenalties {
    /// Creates a penalty pair.
    pub fn new(job_switch: i64, material_switch: i64) -> Self {
        Self {
            job_switch,
            material_switch,
        }
    }
}

impl Default for SwitchoverPenalties {
    fn default() -> Self {
        Self::new(DEFAULT_JOB_SWITCH_PENALTY, DEFAULT_MATERIAL_SWITCH_PENALTY)
    }
}

/// A job-shop problem instance.
///
/// # Example
/// ```
/// use u_jobshop::models::{Job, Operation, ShopProblem};
///
/// let mut problem = ShopProblem::new();
/// let r1 = problem.add_machine("Cutting", &[]);
/// let r2 = problem.add_machine("Packing", &["packing"]);
/// problem.add_job(
///     Job::new("J1")
///         .with_operation(Operation::step(r1, 10))
///         .with_operation(Operation::step(r2, 5)),
/// );
/// assert_eq!((r1, r2), (0, 1));
/// assert_eq!(problem.total_operations(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ShopProblem {
    resources: BTreeMap<ResourceId, Resource>,
    jobs: Vec<Job>,
    job_index: HashMap<JobId, usize>,
    running: Vec<RunningJob>,
    switchover: Option<SwitchoverPenalties>,
}

impl ShopProblem {
    /// Creates an empty problem without switchover penalties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty problem that charges the default plastics-shop
    /// switchover penalties.
    pub fn plastics() -> Self {
        Self::new().with_switchover(SwitchoverPenalties::default())
    }

    /// Enables switchover penalties on machines.
    pub fn with_switchover(mut self, penalties: SwitchoverPenalties) -> Self {
        self.switchover = Some(penalties);
        self
    }

    /// max + 1, or the lowest free id once the maximum is `ResourceId::MAX`.
    fn next_resource_id(&self) -> ResourceId {
        match self.resources.keys().next_back() {
            None => 0,
            Some(&max) => max.checked_add(1).unwrap_or_else(|| self.lowest_free_id()),
        }
    }

    fn lowest_free_id(&self) -> ResourceId {
        let mut candidate: ResourceId = 0;
        for &id in self.resources.keys() {
            if id != candidate {
                break;
            }
            candidate = candidate.saturating_add(1);
        }
        candidate
    }

    /// Registers a machine and returns its assigned id.
    pub fn add_machine(&mut self, name: impl Into<String>, tags: &[&str]) -> ResourceId {
        let mut machine = Resource::new(ResourceKind::Machine).with_name(name);
        machine.tags = tags.iter().map(|t| t.to_string()).collect();
        self.add_resource(machine)
    }

    /// Registers a resource.
    ///
    /// A supplied id is honored as-is and silently replaces any resource
    /// already registered under it; otherwise the next id (max + 1, or 0)
    /// is assigned. Past `ResourceId::MAX` the lowest unused id is taken.
    pub fn add_resource(&mut self, mut resource: Resource) -> ResourceId {
        let id = match resource.id {
            Some(id) => id,
            None => self.next_resource_id(),
        };
        resource.id = Some(id);
        self.resources.insert(id, resource);
        id
    }

    /// Adds a job, replacing any job with the same id.
    pub fn add_job(&mut self, job: Job) {
        match self.job_index.get(&job.id) {
            Some(&idx) => self.jobs[idx] = job,
            None => {
                self.job_index.insert(job.id.clone(), self.jobs.len());
                self.jobs.push(job);
            }
        }
    }

    /// Adds a job that is already running on a resource.
    ///
    /// The job enters the catalog as well; a running job with the same id
    /// replaces the previous binding.
    pub fn add_running_job(&mut self, mut running: RunningJob) {
        running.job.running = true;
        self.add_job(running.job.clone());
        match self
            .running
            .iter_mut()
            .find(|r| r.job.id == running.job.id)
        {
            Some(existing) => *existing = running,
            None => self.running.push(running),
        }
    }

    /// Looks up a resource.
    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.get(&id)
    }

    /// Registered resources in id order.
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// Registered resource ids in order.
    pub fn resource_ids(&self) -> impl Iterator<Item = ResourceId> + '_ {
        self.resources.keys().copied()
    }

    /// Looks up a job.
    pub fn job(&self, id: &JobId) -> Option<&Job> {
        self.job_index.get(id).map(|&idx| &self.jobs[idx])
    }

    /// Catalog index of a job.
    pub fn job_position(&self, id: &JobId) -> Option<usize> {
        self.job_index.get(id).copied()
    }

    /// Jobs in insertion order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Running jobs in insertion order.
    pub fn running_jobs(&self) -> &[RunningJob] {
        &self.running
    }

    /// The running binding of a job, if it is running.
    pub fn running_job(&self, id: &JobId) -> Option<&RunningJob> {
        self.running.iter().find(|r| &r.job.id == id)
    }

    /// Configured switchover penalties.
    pub fn switchover(&self) -> Option<SwitchoverPenalties> {
        self.switchover
    }

    /// Length of every visitation order: the sum of top-level operations.
    pub fn total_operations(&self) -> usize {
        self.jobs.iter().map(Job::operation_count).sum()
    }

    /// Upper bound on the steps one build places, taking the largest
    /// branch of every alternative.
    pub fn max_scheduled_steps(&self) -> usize {
        self.jobs
            .iter()
            .flat_map(|j| &j.operations)
            .map(Operation::scheduled_step_count)
            .sum()
    }

    /// Number of registered resources.
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Number of jobs in the catalog.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}
