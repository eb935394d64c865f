//! Visitation-order generation and perturbation.
//!
//! An order is a multiset permutation: each job id appears exactly as many
//! times as the job has top-level operations.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{JobId, ShopProblem};

use super::RandomAlgorithm;

/// The unshuffled order: catalog order, each job repeated once per
/// top-level operation.
pub fn initial_order(problem: &ShopProblem) -> Vec<JobId> {
    let mut order = Vec::with_capacity(problem.total_operations());
    for job in problem.jobs() {
        for _ in 0..job.operation_count() {
            order.push(job.id.clone());
        }
    }
    order
}

/// A random order produced by `algorithm`.
pub fn random_order<R: Rng + ?Sized>(
    problem: &ShopProblem,
    algorithm: RandomAlgorithm,
    rng: &mut R,
) -> Vec<JobId> {
    let mut order = initial_order(problem);
    match algorithm {
        RandomAlgorithm::FisherYates => order.shuffle(rng),
        RandomAlgorithm::NoRandom => {}
    }
    order
}

/// Swaps two positions holding different job ids.
///
/// Returns `false` and leaves the order untouched when every position
/// holds the same id (including empty and single-element orders).
pub fn swap_distinct<R: Rng + ?Sized>(order: &mut [JobId], rng: &mut R) -> bool {
    if is_uniform(order) {
        return false;
    }
    let len = order.len();
    let i = rng.random_range(0..len);
    let mut j = rng.random_range(0..len);
    while order[i] == order[j] {
        j = rng.random_range(0..len);
    }
    order.swap(i, j);
    true
}

/// Whether all positions hold the same job id.
pub fn is_uniform(order: &[JobId]) -> bool {
    order.windows(2).all(|w| w[0] == w[1])
}

/// Whether `order` visits every job exactly once per top-level operation.
pub fn is_valid_order(order: &[JobId], problem: &ShopProblem) -> bool {
    if order.len() != problem.total_operations() {
        return false;
    }

    let mut counts: HashMap<&JobId, usize> = HashMap::new();
    for id in order {
        *counts.entry(id).or_insert(0) += 1;
    }
    let mut expected: HashMap<&JobId, usize> = HashMap::new();
    for job in problem.jobs().iter().filter(|j| j.has_operations()) {
        expected.insert(&job.id, job.operation_count());
    }
    counts == expected
}
