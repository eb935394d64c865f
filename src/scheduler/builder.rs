//! Visitation-order decoder.
//!
//! # Algorithm
//!
//! 1. Start with one empty lane per resource; reserve the in-progress
//!    slice of every running job on its bound resource.
//! 2. Walk the visitation order. The k-th occurrence of job J schedules
//!    J's k-th top-level operation.
//! 3. Each step is placed greedily at
//!    `max(lane's last end + 1, job's earliest start)`.
//! 4. The job's earliest start becomes the operation's completion + 1.
//! 5. With switchover penalties enabled, a machine that already has an
//!    entry gets a "Switch Jobs" entry (and a "Switch Material" entry when
//!    the material changes) before the step.
//!
//! # Complexity
//! O(n · s) where n = order length and s = steps per top-level operation.
//!
//! # Reference
//! Bierwirth (1995), "A generalized permutation approach to JSSP"

use rand::Rng;
use tracing::trace;

use crate::error::ShopError;
use crate::models::{
    Entry, EntryLabel, Job, JobId, Operation, ShopProblem, Step, SwitchoverPenalties, Timetable,
};

/// Gap between consecutive entries on a resource and between consecutive
/// operations of a job.
pub const TIME_GAP: i64 = 1;

/// Decodes visitation orders into timetables for one problem.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::SmallRng;
/// use u_jobshop::models::{Job, JobId, Operation, ShopProblem};
/// use u_jobshop::scheduler::ScheduleBuilder;
///
/// let mut problem = ShopProblem::new();
/// let r1 = problem.add_machine("R1", &[]);
/// let r2 = problem.add_machine("R2", &[]);
/// problem.add_job(
///     Job::new("J1")
///         .with_operation(Operation::step(r1, 10))
///         .with_operation(Operation::step(r2, 5)),
/// );
///
/// let order = vec![JobId::from("J1"), JobId::from("J1")];
/// let mut rng = SmallRng::seed_from_u64(7);
/// let timetable = ScheduleBuilder::new(&problem).build(&order, &mut rng).unwrap();
/// assert_eq!(timetable.last_end(r2), Some(16));
/// assert_eq!(timetable.makespan(), 16);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScheduleBuilder<'a> {
    problem: &'a ShopProblem,
}

/// Per-build working state, indexed by catalog position.
struct BuildState {
    timetable: Timetable,
    visits: Vec<usize>,
    ready: Vec<i64>,
    running_slice_end: Vec<Option<i64>>,
}

impl<'a> ScheduleBuilder<'a> {
    /// Creates a builder over a problem.
    pub fn new(problem: &'a ShopProblem) -> Self {
        Self { problem }
    }

    /// Builds the timetable for a visitation order.
    ///
    /// `rng` drives the choice at alternative-machine nodes; everything
    /// else is deterministic.
    ///
    /// # Errors
    /// Fails on an unknown job id, a job visited more often than it has
    /// top-level operations, a dangling resource reference, or an empty
    /// composite node.
    pub fn build<R: Rng + ?Sized>(
        &self,
        order: &[JobId],
        rng: &mut R,
    ) -> Result<Timetable, ShopError> {
        let mut state = self.initial_state()?;

        for job_id in order {
            let pos = self
                .problem
                .job_position(job_id)
                .ok_or_else(|| ShopError::UnknownJob(job_id.clone()))?;
            let job = &self.problem.jobs()[pos];
            let visit = state.visits[pos];
            let operation = job
                .operations
                .get(visit)
                .ok_or_else(|| ShopError::OperationOverflow {
                    job: job.id.clone(),
                    visits: visit + 1,
                    operations: job.operation_count(),
                })?;

            let end = match (visit, state.running_slice_end[pos]) {
                // The first operation of a running job is the reserved slice.
                (0, Some(slice_end)) => slice_end,
                _ => self.place_node(operation, job, state.ready[pos], &mut state.timetable, rng)?,
            };
            state.ready[pos] = offset(end, TIME_GAP, &job.id)?;
            state.visits[pos] += 1;
        }

        Ok(state.timetable)
    }

    fn initial_state(&self) -> Result<BuildState, ShopError> {
        let job_count = self.problem.job_count();
        let mut state = BuildState {
            timetable: Timetable::with_resources(self.problem.resource_ids()),
            visits: vec![0; job_count],
            ready: vec![0; job_count],
            running_slice_end: vec![None; job_count],
        };

        for running in self.problem.running_jobs() {
            let id = &running.job.id;
            if self.problem.resource(running.resource).is_none() {
                return Err(ShopError::UnknownResource {
                    job: id.clone(),
                    resource: running.resource,
                });
            }
            let start = state
                .timetable
                .last_end(running.resource)
                .map_or(Ok(0), |end| offset(end, TIME_GAP, id))?;
            let end = offset(start, running.remaining_time, id)?;
            state.timetable.push(
                running.resource,
                Entry::new(EntryLabel::Running(id.clone()), start, end),
            );
            if let Some(pos) = self.problem.job_position(id) {
                state.running_slice_end[pos] = Some(end);
            }
        }

        Ok(state)
    }

    /// Places an operation tree no earlier than `earliest`; returns its completion.
    fn place_node<R: Rng + ?Sized>(
        &self,
        node: &Operation,
        job: &Job,
        earliest: i64,
        timetable: &mut Timetable,
        rng: &mut R,
    ) -> Result<i64, ShopError> {
        match node {
            Operation::Leaf(step) => self.place_step(step, job, earliest, timetable),
            Operation::Sequence(children) => {
                let mut ready = earliest;
                let mut end = None;
                for child in children {
                    let child_end = self.place_node(child, job, ready, timetable, rng)?;
                    ready = offset(child_end, TIME_GAP, &job.id)?;
                    end = Some(child_end);
                }
                end.ok_or_else(|| ShopError::EmptyComposite(job.id.clone()))
            }
            Operation::Parallel(children) => {
                let mut end = None;
                for child in children {
                    let child_end = self.place_node(child, job, earliest, timetable, rng)?;
                    end = Some(end.map_or(child_end, |e: i64| e.max(child_end)));
                }
                end.ok_or_else(|| ShopError::EmptyComposite(job.id.clone()))
            }
            Operation::AlternativeMachines(children) => {
                if children.is_empty() {
                    return Err(ShopError::EmptyComposite(job.id.clone()));
                }
                let chosen = &children[rng.random_range(0..children.len())];
                self.place_node(chosen, job, earliest, timetable, rng)
            }
        }
    }

    /// Appends one step to its resource's lane; returns the step's end.
    fn place_step(
        &self,
        step: &Step,
        job: &Job,
        earliest: i64,
        timetable: &mut Timetable,
    ) -> Result<i64, ShopError> {
        let resource = self
            .problem
            .resource(step.resource)
            .ok_or_else(|| ShopError::UnknownResource {
                job: job.id.clone(),
                resource: step.resource,
            })?;

        let machine_ready = timetable
            .last_end(step.resource)
            .map_or(Ok(0), |end| offset(end, TIME_GAP, &job.id))?;
        let mut start = machine_ready.max(earliest);

        if let Some(penalties) = self.problem.switchover().filter(|_| resource.is_machine()) {
            let previous = timetable.last_entry(step.resource).map(|e| e.label.clone());
            if let Some(previous) = previous.filter(|label| needs_switchover(label, job)) {
                start = self.charge_switchover(step, &previous, job, start, penalties, timetable)?;
            }
        }

        let duration = job
            .effective_duration(step.duration)
            .ok_or_else(|| ShopError::TimeOverflow(job.id.clone()))?;
        let end = offset(start, duration, &job.id)?;
        timetable.push(step.resource, Entry::job(job.id.clone(), start, end));
        Ok(end)
    }

    /// Appends penalty entries from `start`; returns the step's new start.
    fn charge_switchover(
        &self,
        step: &Step,
        previous: &EntryLabel,
        job: &Job,
        start: i64,
        penalties: SwitchoverPenalties,
        timetable: &mut Timetable,
    ) -> Result<i64, ShopError> {
        let mut cursor = offset(start, penalties.job_switch, &job.id)?;
        timetable.push(
            step.resource,
            Entry::new(EntryLabel::SwitchJobs, start, cursor),
        );

        let previous_material = previous
            .job_id()
            .and_then(|id| self.problem.job(id))
            .and_then(|j| j.material.as_deref());
        if previous_material != job.material.as_deref() {
            let purge_end = offset(cursor, penalties.material_switch, &job.id)?;
            timetable.push(
                step.resource,
                Entry::new(EntryLabel::SwitchMaterial, cursor, purge_end),
            );
            cursor = purge_end;
        }

        trace!(
            resource = step.resource,
            job = %job.id,
            previous = %previous,
            penalty = cursor.saturating_sub(start),
            "switchover charged"
        );
        offset(cursor, TIME_GAP, &job.id)
    }
}

/// `time + delta`, failing instead of wrapping.
fn offset(time: i64, delta: i64, job: &JobId) -> Result<i64, ShopError> {
    time.checked_add(delta).ok_or_else(|| ShopError::TimeOverflow(job.clone()))
}

/// A running job continuing right after its own reserved slice pays nothing;
/// every other placement behind an existing entry pays the job switch.
fn needs_switchover(previous: &EntryLabel, job: &Job) -> bool {
    !matches!(previous, EntryLabel::Running(id) if *id == job.id)
}
