//! Critical path method (CPM/PERT) scheduling over a task dependency graph.
//!
//! A [`TaskGraph`] holds tasks and their predecessor ids and validates edits.
//! [`compute_schedule`] turns a snapshot into a [`ScheduleResult`]: earliest and
//! latest start/finish, slack, level and criticality per task, the project
//! duration, and a cycle flag. [`PertEditor`] ties the two together, recomputing
//! after every edit.

// Allow clippy warning triggered by PyO3 macro expansion
#![cfg_attr(feature = "python", allow(clippy::useless_conversion))]

pub mod logging;

mod config;
pub mod critical_path;
pub mod diagram;
mod editor;
pub mod graph;
pub mod import;
mod interner;
mod models;

#[cfg(feature = "python")]
mod python;

pub use config::{CycleDetection, ScheduleConfig};
pub use critical_path::{
    compute, compute_schedule, critical_chains, critical_links, is_critical_link, ScheduleResult,
    DEFAULT_MAX_CHAINS,
};
pub use diagram::{DiagramEdge, DiagramLayout, DiagramNode};
pub use editor::PertEditor;
pub use graph::{GraphError, TaskField, TaskGraph, TaskUpdate};
pub use import::{import_calendar, CalendarTask, ImportError};
pub use interner::{TaskIndex, TaskPos};
pub use models::{ScheduledTask, Task};
