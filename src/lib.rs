//! Job-shop scheduling by stochastic search over visitation orders.
//!
//! Describes a shop (resources, jobs with nested operation trees, jobs
//! already running), decodes visitation orders into per-resource
//! timetables, and searches for the order with the lowest makespan.
//! Injection-molding shops can charge job and material switchover
//! penalties on machines.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Resource`, `Job`, `Operation`,
//!   `RunningJob`, `ShopProblem`, `Timetable`
//! - **`scheduler`**: `ScheduleBuilder` (order → timetable) and the
//!   `CostFunction` seam with `Makespan`
//! - **`search`**: `JobShopSolver`, `SolverConfig`, termination criteria
//! - **`validation`**: Input integrity checks (resource refs, empty trees,
//!   running-job conflicts)
//!
//! # Example
//!
//! ```
//! use u_jobshop::models::{Job, Operation, ShopProblem, SwitchoverPenalties};
//! use u_jobshop::search::{Algorithm, JobShopSolver, SolverConfig};
//!
//! let mut shop = ShopProblem::plastics().with_switchover(SwitchoverPenalties::new(60, 120));
//! let m = shop.add_machine("M", &["imm"]);
//! shop.add_job(Job::new("A").with_material("ACETAL").with_operation(Operation::step(m, 10)));
//! shop.add_job(Job::new("B").with_material("PP").with_operation(Operation::step(m, 10)));
//! u_jobshop::validation::validate_problem(&shop).unwrap();
//!
//! let config = SolverConfig::default()
//!     .with_algorithm(Algorithm::HillClimbing)
//!     .with_max_iterations(50)
//!     .with_seed(7);
//! let result = JobShopSolver::new(config).solve(&shop).unwrap();
//! // 10 + 1 + 60 (job switch) + 120 (material purge) + 1 + 10
//! assert_eq!(result.best_makespan, 202);
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Bierwirth (1995), "A generalized permutation approach to JSSP"

pub mod error;
pub mod models;
pub mod scheduler;
pub mod search;
pub mod validation;

pub use error::ShopError;
