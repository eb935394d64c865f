//! Stochastic search over visitation orders.
//!
//! # Encoding
//!
//! A candidate is a visitation order: a permutation of the multiset in
//! which each job id occurs once per top-level operation. The k-th
//! occurrence of job J schedules J's k-th operation, so every permutation
//! decodes to a feasible timetable.
//!
//! # Algorithms
//!
//! - `Random`: independent random orders
//! - `HillClimbing`: single swap of two distinct ids from the best order
//! - `HillClimbingWithRestarts`: hill climbing on a local best, restarted
//!   from a random order with a fixed probability
//!
//! # Submodules
//!
//! - [`order`]: order generation, perturbation, validity check
//! - [`termination`]: pluggable stop criteria
//!
//! # Reference
//! - Russell & Norvig (2020), "Artificial Intelligence: A Modern Approach", Ch. 4.1
//! - Bierwirth (1995), "A generalized permutation approach to JSSP"

mod config;
pub mod order;
mod runner;
pub mod termination;

pub use config::{
    Algorithm, RandomAlgorithm, SolutionParameters, SolverConfig, DEFAULT_MAX_ITERATIONS,
    DEFAULT_MAX_SECONDS, DEFAULT_RESTART_PERCENT,
};
pub use runner::{JobShopSolver, SearchResult};
pub use termination::{
    MaxIterations, TerminationContext, TerminationCriterion, TerminationPolicy, TimeLimit,
};
