//! Operation model.
//!
//! A job is an ordered list of operation trees. The leaves are [`Step`]s,
//! each bound to exactly one resource; interior nodes combine children
//! sequentially, concurrently, or as a choice between machines.
//!
//! # Tree Semantics
//!
//! | Node | Scheduled as | Completion |
//! |------|--------------|------------|
//! | `Leaf` | one entry on its resource | entry end |
//! | `Sequence` | children in order, 1-unit gap between | last child end |
//! | `Parallel` | every child from the same earliest start | max child end |
//! | `AlternativeMachines` | one uniformly chosen child | chosen child end |

use serde::{Deserialize, Serialize};

use super::ResourceId;

/// A single unit of work on one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Resource the step runs on.
    pub resource: ResourceId,
    /// Declared duration per unit of required inventory (seconds).
    pub duration: i64,
    /// Display unit for presentation only (e.g., "min").
    pub display_unit: Option<String>,
}

impl Step {
    /// Creates a step on a resource.
    pub fn new(resource: ResourceId, duration: i64) -> Self {
        Self {
            resource,
            duration,
            display_unit: None,
        }
    }

    /// Sets the presentation unit.
    pub fn with_display_unit(mut self, unit: impl Into<String>) -> Self {
        self.display_unit = Some(unit.into());
        self
    }
}

/// An operation tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// A single step.
    Leaf(Step),
    /// Children executed one after another.
    Sequence(Vec<Operation>),
    /// Children executed concurrently, each on its own resource.
    Parallel(Vec<Operation>),
    /// Exactly one child is executed, chosen per build.
    AlternativeMachines(Vec<Operation>),
}

impl Operation {
    /// Creates a leaf operation.
    pub fn step(resource: ResourceId, duration: i64) -> Self {
        Self::Leaf(Step::new(resource, duration))
    }

    /// Creates a sequence node.
    pub fn sequence(children: Vec<Operation>) -> Self {
        Self::Sequence(children)
    }

    /// Creates a parallel node.
    pub fn parallel(children: Vec<Operation>) -> Self {
        Self::Parallel(children)
    }

    /// Creates an alternative-machines node.
    pub fn alternatives(children: Vec<Operation>) -> Self {
        Self::AlternativeMachines(children)
    }

    /// Child nodes (empty for a leaf).
    pub fn children(&self) -> &[Operation] {
        match self {
            Self::Leaf(_) => &[],
            Self::Sequence(c) | Self::Parallel(c) | Self::AlternativeMachines(c) => c,
        }
    }

    /// All leaf steps in this tree, depth-first.
    pub fn steps(&self) -> Vec<&Step> {
        let mut out = Vec::new();
        self.collect_steps(&mut out);
        out
    }

    fn collect_steps<'a>(&'a self, out: &mut Vec<&'a Step>) {
        match self {
            Self::Leaf(step) => out.push(step),
            _ => self.children().iter().for_each(|c| c.collect_steps(out)),
        }
    }

    /// Number of steps that will actually be scheduled.
    ///
    /// Alternative nodes count as one chosen child, so this is the count
    /// for the largest alternative.
    pub fn scheduled_step_count(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Sequence(c) | Self::Parallel(c) => {
                c.iter().map(Operation::scheduled_step_count).sum()
            }
            Self::AlternativeMachines(c) => c
                .iter()
                .map(Operation::scheduled_step_count)
                .max()
                .unwrap_or(0),
        }
    }

    /// Whether any composite node in this tree has no children.
    pub fn has_empty_composite(&self) -> bool {
        match self {
            Self::Leaf(_) => false,
            _ => {
                let children = self.children();
                children.is_empty() || children.iter().any(Operation::has_empty_composite)
            }
        }
    }
}

impl From<Step> for Operation {
    fn from(step: Step) -> Self {
        Self::Leaf(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_builder() {
        let s = Step::new(3, 20).with_display_unit("s");
        assert_eq!(s.resource, 3);
        assert_eq!(s.duration, 20);
        assert_eq!(s.display_unit.as_deref(), Some("s"));
    }

    #[test]
    fn test_nested_steps() {
        let op = Operation::parallel(vec![
            Operation::step(0, 10),
            Operation::sequence(vec![Operation::step(1, 5), Operation::step(2, 5)]),
        ]);
        let resources: Vec<ResourceId> = op.steps().iter().map(|s| s.resource).collect();
        assert_eq!(resources, vec![0, 1, 2]);
        assert_eq!(op.scheduled_step_count(), 3);
    }

    #[test]
    fn test_alternative_step_count() {
        let op = Operation::alternatives(vec![
            Operation::step(0, 20),
            Operation::sequence(vec![Operation::step(1, 10), Operation::step(2, 10)]),
        ]);
        assert_eq!(op.scheduled_step_count(), 2);
        assert_eq!(op.steps().len(), 3);
    }

    #[test]
    fn test_empty_composite_detection() {
        assert!(!Operation::step(0, 1).has_empty_composite());
        assert!(Operation::parallel(vec![]).has_empty_composite());
        assert!(Operation::sequence(vec![Operation::alternatives(vec![])]).has_empty_composite());
    }

    #[test]
    fn test_serde_roundtrip_tree() {
        let op = Operation::alternatives(vec![Operation::step(0, 20), Operation::step(1, 25)]);
        let json = serde_json::to_string(&op).unwrap();
        let back: Operation = serde_json::from_str(&json).unwrap();
        assert_eq!(op, back);
    }
}
