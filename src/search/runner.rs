//! Search loop.
//!
//! # Algorithm
//!
//! Each iteration:
//! 1. Ask every termination criterion; stop if one fires.
//! 2. Produce a candidate order:
//!    - first iteration, or `Random`: a fresh random order
//!    - `HillClimbing`: the current order with one swap of distinct ids
//!    - `HillClimbingWithRestarts`: with probability `restart_percent`, a
//!      fresh random order that resets the local best; otherwise the
//!      current order with one swap
//! 3. Build the timetable and evaluate its cost.
//! 4. Record the candidate as the local / global best if it strictly
//!    improves on it.
//! 5. Adopt the candidate as the current order, improving or not.
//!
//! The walk therefore drifts through equal and worse orders while the
//! best-ever solutions are kept aside. Ties keep the earlier best.

use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument, trace};

use crate::error::ShopError;
use crate::models::{JobId, ShopProblem, Timetable};
use crate::scheduler::{CostFunction, Makespan, ScheduleBuilder};

use super::order::{random_order, swap_distinct};
use super::termination::{TerminationContext, TerminationCriterion, TerminationPolicy};
use super::{Algorithm, SolverConfig};

/// Outcome of a search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Lowest-cost timetable found.
    pub best_timetable: Timetable,
    /// Cost of `best_timetable` (makespan unless a custom cost is set).
    pub best_makespan: i64,
    /// Zero-based iteration at which the best was found.
    pub best_found_at: u64,
    /// Visitation order that produced the best timetable.
    pub best_order: Vec<JobId>,
    /// Iterations completed.
    pub iterations: u64,
    /// Random restarts taken (`HillClimbingWithRestarts` only).
    pub restarts: u64,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

struct Incumbent {
    order: Vec<JobId>,
    timetable: Timetable,
    cost: i64,
    iteration: u64,
}

#[derive(Default)]
struct SearchState {
    global: Option<Incumbent>,
    /// Best cost since the last restart.
    local: Option<i64>,
    /// Base of the next swap; replaced by every candidate.
    current: Option<Vec<JobId>>,
    restarts: u64,
}

impl SearchState {
    fn record(
        &mut self,
        order: Vec<JobId>,
        timetable: Timetable,
        cost: i64,
        iteration: u64,
        algorithm: Algorithm,
    ) {
        if algorithm == Algorithm::HillClimbingWithRestarts
            && self.local.map_or(true, |local| cost < local)
        {
            trace!(iteration, cost, "new local best");
            self.local = Some(cost);
        }

        if self.global.as_ref().map_or(true, |g| cost < g.cost) {
            debug!(iteration, cost, "new best");
            self.global = Some(Incumbent {
                order: order.clone(),
                timetable,
                cost,
                iteration,
            });
        }

        self.current = Some(order);
    }
}

/// Stochastic search over visitation orders.
///
/// # Example
///
/// ```
/// use u_jobshop::models::{Job, Operation, ShopProblem};
/// use u_jobshop::search::{Algorithm, JobShopSolver, SolverConfig};
///
/// let mut problem = ShopProblem::new();
/// let r1 = problem.add_machine("R1", &[]);
/// let r2 = problem.add_machine("R2", &[]);
/// problem.add_job(
///     Job::new("J1")
///         .with_operation(Operation::step(r1, 10))
///         .with_operation(Operation::step(r2, 5)),
/// );
/// problem.add_job(Job::new("J2").with_operation(Operation::step(r2, 4)));
///
/// let config = SolverConfig::default()
///     .with_algorithm(Algorithm::HillClimbing)
///     .with_max_iterations(200)
///     .with_seed(1);
/// let result = JobShopSolver::new(config).solve(&problem).unwrap();
/// assert_eq!(result.best_makespan, 16);
/// ```
pub struct JobShopSolver {
    config: SolverConfig,
    termination: TerminationPolicy,
    cost: Box<dyn CostFunction>,
}

impl JobShopSolver {
    /// Creates a solver minimizing makespan, stopping on the configured
    /// iteration and time limits.
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            termination: TerminationPolicy::standard(),
            cost: Box::new(Makespan),
        }
    }

    /// Replaces the cost function.
    pub fn with_cost_function(mut self, cost: impl CostFunction + 'static) -> Self {
        self.cost = Box::new(cost);
        self
    }

    /// Appends a termination criterion; any criterion firing stops the search.
    pub fn add_termination_criterion(
        &mut self,
        criterion: impl TerminationCriterion + 'static,
    ) -> &mut Self {
        self.termination.push(criterion);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Runs the search.
    ///
    /// # Errors
    /// - `InvalidConfig` if the configuration is out of range
    /// - any build error (the first failing candidate aborts the search)
    /// - `NoSolution` if a criterion fires before the first iteration
    #[instrument(level = "debug", name = "job_shop_search", skip_all, fields(algorithm = %self.config.algorithm))]
    pub fn solve(&self, problem: &ShopProblem) -> Result<SearchResult, ShopError> {
        self.config.validate()?;

        let mut rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };
        let builder = ScheduleBuilder::new(problem);
        let started_at = Instant::now();
        let mut state = SearchState::default();
        let mut iteration: u64 = 0;

        info!(
            jobs = problem.job_count(),
            resources = problem.resource_count(),
            operations = problem.total_operations(),
            max_steps = problem.max_scheduled_steps(),
            cost = self.cost.name(),
            "search started"
        );

        loop {
            let ctx = TerminationContext {
                iteration,
                started_at,
                max_iterations: self.config.max_iterations,
                max_duration: self.config.max_duration,
                algorithm: self.config.algorithm,
            };
            if let Some(reason) = self.termination.triggered(&ctx) {
                debug!(reason, iteration, "termination criterion met");
                break;
            }

            let order = self.next_candidate(problem, &mut state, &mut rng);
            let timetable = builder.build(&order, &mut rng)?;
            let cost = self.cost.evaluate(&timetable);
            state.record(order, timetable, cost, iteration, self.config.algorithm);
            iteration += 1;

            if self.config.progress_interval > 0 && iteration % self.config.progress_interval == 0 {
                trace!(
                    iteration,
                    best = state.global.as_ref().map(|g| g.cost),
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    "progress"
                );
            }
        }

        let elapsed = started_at.elapsed();
        let best = state.global.ok_or(ShopError::NoSolution)?;
        info!(
            iterations = iteration,
            best = best.cost,
            found_at = best.iteration,
            restarts = state.restarts,
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );

        Ok(SearchResult {
            best_timetable: best.timetable,
            best_makespan: best.cost,
            best_found_at: best.iteration,
            best_order: best.order,
            iterations: iteration,
            restarts: state.restarts,
            elapsed,
        })
    }

    fn next_candidate<R: Rng + ?Sized>(
        &self,
        problem: &ShopProblem,
        state: &mut SearchState,
        rng: &mut R,
    ) -> Vec<JobId> {
        let random_algorithm = self.config.random_algorithm;
        let Some(current) = state.current.as_deref() else {
            return random_order(problem, random_algorithm, rng);
        };

        match self.config.algorithm {
            Algorithm::Random => random_order(problem, random_algorithm, rng),
            Algorithm::HillClimbing => neighbour(current, rng),
            Algorithm::HillClimbingWithRestarts => {
                if rng.random_range(0.0..100.0) < self.config.restart_percent {
                    state.restarts += 1;
                    state.local = None;
                    random_order(problem, random_algorithm, rng)
                } else {
                    neighbour(current, rng)
                }
            }
        }
    }
}

/// `order` with one swap of two distinct ids.
fn neighbour<R: Rng + ?Sized>(order: &[JobId], rng: &mut R) -> Vec<JobId> {
    let mut next = order.to_vec();
    swap_distinct(&mut next, rng);
    next
}

impl std::fmt::Debug for JobShopSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobShopSolver")
            .field("config", &self.config)
            .field("termination", &self.termination)
            .field("cost", &self.cost.name())
            .finish()
    }
}
