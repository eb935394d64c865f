//! Timetable (solution) model.
//!
//! A timetable maps every resource to the entries scheduled on it, in
//! the order they were appended. Entries on one resource never overlap:
//! the builder only ever appends at or after the previous entry's end.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{JobId, ResourceId};

/// What occupies a resource during an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryLabel {
    /// An operation of a job.
    Job(JobId),
    /// The reserved in-progress slice of a running job.
    Running(JobId),
    /// Machine changeover between two jobs.
    SwitchJobs,
    /// Material purge between jobs of different materials.
    SwitchMaterial,
}

impl EntryLabel {
    /// The job occupying the resource, if this is not a penalty entry.
    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            Self::Job(id) | Self::Running(id) => Some(id),
            Self::SwitchJobs | Self::SwitchMaterial => None,
        }
    }

    /// Whether this entry is a switchover penalty.
    pub fn is_penalty(&self) -> bool {
        matches!(self, Self::SwitchJobs | Self::SwitchMaterial)
    }
}

impl fmt::Display for EntryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Job(id) => write!(f, "{id}"),
            Self::Running(id) => write!(f, "{id} (running)"),
            Self::SwitchJobs => f.write_str("Switch Jobs"),
            Self::SwitchMaterial => f.write_str("Switch Material"),
        }
    }
}

/// One occupied interval on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Job or penalty label.
    pub label: EntryLabel,
    /// Start time.
    pub start: i64,
    /// End time.
    pub end: i64,
}

impl Entry {
    /// Creates an entry.
    pub fn new(label: EntryLabel, start: i64, end: i64) -> Self {
        Self { label, start, end }
    }

    /// Creates a job entry.
    pub fn job(id: JobId, start: i64, end: i64) -> Self {
        Self::new(EntryLabel::Job(id), start, end)
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Per-resource schedule produced by one build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    lanes: BTreeMap<ResourceId, Vec<Entry>>,
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a timetable with one empty lane per resource.
    pub fn with_resources(resources: impl IntoIterator<Item = ResourceId>) -> Self {
        Self {
            lanes: resources.into_iter().map(|id| (id, Vec::new())).collect(),
        }
    }

    /// Appends an entry to a resource's lane, creating the lane if needed.
    pub fn push(&mut self, resource: ResourceId, entry: Entry) {
        self.lanes.entry(resource).or_default().push(entry);
    }

    /// Entries on a resource (empty if unknown).
    pub fn entries(&self, resource: ResourceId) -> &[Entry] {
        self.lanes.get(&resource).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Last entry on a resource.
    pub fn last_entry(&self, resource: ResourceId) -> Option<&Entry> {
        self.entries(resource).last()
    }

    /// End of the last entry on a resource.
    pub fn last_end(&self, resource: ResourceId) -> Option<i64> {
        self.last_entry(resource).map(|e| e.end)
    }

    /// Iterates over (resource, entries) in resource-id order.
    pub fn lanes(&self) -> impl Iterator<Item = (ResourceId, &[Entry])> {
        self.lanes.iter().map(|(&id, entries)| (id, entries.as_slice()))
    }

    /// Makespan: latest last-entry end across all lanes (0 if empty).
    pub fn makespan(&self) -> i64 {
        self.lanes
            .values()
            .filter_map(|entries| entries.last().map(|e| e.end))
            .max()
            .unwrap_or(0)
    }

    /// All entries of a job across every resource.
    pub fn entries_for_job(&self, job: &JobId) -> Vec<(ResourceId, &Entry)> {
        self.lanes()
            .flat_map(|(id, entries)| entries.iter().map(move |e| (id, e)))
            .filter(|(_, e)| e.label.job_id() == Some(job))
            .collect()
    }

    /// Total penalty time charged on a resource.
    pub fn penalty_time(&self, resource: ResourceId) -> i64 {
        self.entries(resource)
            .iter()
            .filter(|e| e.label.is_penalty())
            .map(Entry::duration)
            .sum()
    }

    /// Whether every lane is ordered and free of overlaps.
    pub fn is_consistent(&self) -> bool {
        self.lanes.values().all(|entries| {
            entries.iter().all(|e| e.start <= e.end)
                && entries.windows(2).all(|w| w[0].end <= w[1].start)
        })
    }

    /// Total number of entries.
    pub fn entry_count(&self) -> usize {
        self.lanes.values().map(Vec::len).sum()
    }
}
