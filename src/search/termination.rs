//! Termination criteria.
//!
//! The search checks every criterion before each iteration and stops as
//! soon as one of them fires. The built-in criteria read their limits from
//! the context, so a criterion installed for a disabled limit never fires.

use std::fmt;
use std::time::{Duration, Instant};

use super::Algorithm;

/// Snapshot handed to criteria before each iteration.
#[derive(Debug, Clone, Copy)]
pub struct TerminationContext {
    /// Iterations completed so far.
    pub iteration: u64,
    /// When the search started.
    pub started_at: Instant,
    /// Configured iteration cap.
    pub max_iterations: Option<u64>,
    /// Configured wall-clock cap.
    pub max_duration: Option<Duration>,
    /// Active algorithm.
    pub algorithm: Algorithm,
}

impl TerminationContext {
    /// Time since the search started.
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// A stop condition for the search loop.
pub trait TerminationCriterion: Send + Sync {
    /// Criterion name for logging.
    fn name(&self) -> &str {
        "custom"
    }

    /// Returns `true` when the search should stop.
    fn should_terminate(&self, ctx: &TerminationContext) -> bool;
}

impl<F> TerminationCriterion for F
where
    F: Fn(&TerminationContext) -> bool + Send + Sync,
{
    fn should_terminate(&self, ctx: &TerminationContext) -> bool {
        self(ctx)
    }
}

/// Fires once the iteration counter exceeds the configured cap.
///
/// Strictly greater: a cap of `n` lets `n + 1` iterations run.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxIterations;

impl TerminationCriterion for MaxIterations {
    fn name(&self) -> &str {
        "max_iterations"
    }

    fn should_terminate(&self, ctx: &TerminationContext) -> bool {
        ctx.max_iterations.is_some_and(|max| ctx.iteration > max)
    }
}

/// Fires once elapsed time exceeds the configured cap.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeLimit;

impl TerminationCriterion for TimeLimit {
    fn name(&self) -> &str {
        "time_limit"
    }

    fn should_terminate(&self, ctx: &TerminationContext) -> bool {
        ctx.max_duration.is_some_and(|max| ctx.elapsed() > max)
    }
}

/// Ordered list of criteria; any one firing stops the search.
pub struct TerminationPolicy {
    criteria: Vec<Box<dyn TerminationCriterion>>,
}

impl TerminationPolicy {
    /// An empty policy (never fires).
    pub fn empty() -> Self {
        Self {
            criteria: Vec::new(),
        }
    }

    /// The built-in criteria: iteration cap then time limit.
    pub fn standard() -> Self {
        let mut policy = Self::empty();
        policy.push(MaxIterations);
        policy.push(TimeLimit);
        policy
    }

    /// Appends a criterion.
    pub fn push(&mut self, criterion: impl TerminationCriterion + 'static) {
        self.criteria.push(Box::new(criterion));
    }

    /// Number of installed criteria.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Whether no criteria are installed.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Name of the first criterion that fires, if any.
    pub fn triggered(&self, ctx: &TerminationContext) -> Option<&str> {
        self.criteria
            .iter()
            .find(|c| c.should_terminate(ctx))
            .map(|c| c.name())
    }
}

impl Default for TerminationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for TerminationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.criteria.iter().map(|c| c.name()))
            .finish()
    }
}
