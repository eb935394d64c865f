//! Timetable cost functions.
//!
//! The search minimizes a single scalar cost. The default objective is
//! makespan (C_max); any `Fn(&Timetable) -> i64` can stand in for it.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 1.2: Performance Measures

use crate::models::Timetable;

/// A scalar objective over timetables. Lower is better.
pub trait CostFunction: Send + Sync {
    /// Objective name for logging.
    fn name(&self) -> &'static str {
        "custom"
    }

    /// Evaluates a timetable.
    fn evaluate(&self, timetable: &Timetable) -> i64;
}

impl<F> CostFunction for F
where
    F: Fn(&Timetable) -> i64 + Send + Sync,
{
    fn evaluate(&self, timetable: &Timetable) -> i64 {
        self(timetable)
    }
}

/// Makespan: the end of the last entry on any resource.
///
/// Penalty entries occupy their resource and therefore count.
#[derive(Debug, Clone, Copy, Default)]
pub struct Makespan;

impl CostFunction for Makespan {
    fn name(&self) -> &'static str {
        "makespan"
    }

    fn evaluate(&self, timetable: &Timetable) -> i64 {
        makespan(timetable)
    }
}

/// Makespan of a timetable; 0 when nothing is scheduled.
pub fn makespan(timetable: &Timetable) -> i64 {
    timetable.makespan()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, EntryLabel};

    fn sample() -> Timetable {
        let mut t = Timetable::with_resources([0, 1, 2]);
        t.push(0, Entry::job("J1".into(), 0, 10));
        t.push(1, Entry::job("J1".into(), 11, 16));
        t
    }

    #[test]
    fn test_makespan_basic() {
        assert_eq!(Makespan.evaluate(&sample()), 16);
        assert_eq!(Makespan.name(), "makespan");
    }

    #[test]
    fn test_makespan_empty() {
        assert_eq!(makespan(&Timetable::new()), 0);
        assert_eq!(makespan(&Timetable::with_resources([0, 1])), 0);
    }

    #[test]
    fn test_penalty_entries_count() {
        let mut t = sample();
        t.push(1, Entry::new(EntryLabel::SwitchJobs, 17, 77));
        assert_eq!(makespan(&t), 77);
    }

    #[test]
    fn test_makespan_ignores_lane_order() {
        // Only last-entry ends matter, not which lane holds them.
        let mut a = Timetable::new();
        a.push(0, Entry::job("X".into(), 0, 5));
        a.push(1, Entry::job("Y".into(), 0, 9));
        let mut b = Timetable::new();
        b.push(0, Entry::job("Y".into(), 0, 9));
        b.push(1, Entry::job("X".into(), 0, 5));
        assert_eq!(makespan(&a), makespan(&b));
    }

    #[test]
    fn test_closure_cost() {
        let entries = |t: &Timetable| t.entry_count() as i64;
        assert_eq!(entries.evaluate(&sample()), 2);
        assert_eq!(entries.name(), "custom");
    }
}
