//! Job-shop domain models.
//!
//! Provides the data types for describing a shop (resources, jobs,
//! operation trees, running jobs) and the timetables the builder produces.
//!
//! # Domain Mappings
//!
//! | u-jobshop | Injection Molding | Bottling Line |
//! |-----------|-------------------|---------------|
//! | Job | SKU production run | Bottle batch |
//! | Operation | Molding / packing step | Fill / cap / label |
//! | Resource | IMM / packer | Filler / capper |
//! | Timetable | Machine loading plan | Line schedule |

mod job;
mod operation;
mod problem;
mod resource;
mod timetable;

pub use job::{Job, JobId, RunningJob};
pub use operation::{Operation, Step};
pub use problem::{
    ShopProblem, SwitchoverPenalties, DEFAULT_JOB_SWITCH_PENALTY, DEFAULT_MATERIAL_SWITCH_PENALTY,
};
pub use resource::{Resource, ResourceId, ResourceKind};
pub use timetable::{Entry, EntryLabel, Timetable};
