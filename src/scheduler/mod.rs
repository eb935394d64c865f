//! Visitation-order decoding and cost evaluation.
//!
//! # Algorithm
//!
//! `ScheduleBuilder` turns a visitation order (a flat sequence of job ids)
//! into a per-resource timetable with greedy earliest-available placement.
//! It is not optimal on its own; the search in [`crate::search`] explores
//! orders to minimize the cost computed here.
//!
//! # Cost
//!
//! `Makespan` implements `CostFunction`, the objective the search minimizes.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Bierwirth (1995), "A generalized permutation approach to JSSP"

mod builder;
mod cost;

pub use builder::{ScheduleBuilder, TIME_GAP};
pub use cost::{makespan, CostFunction, Makespan};
