//! Critical path method (CPM/PERT) engine.
//!
//! A pure function from a task snapshot to a [`ScheduleResult`]: earliest and
//! latest start/finish, slack, level and criticality for every task, plus the
//! project duration and a cycle flag.

mod calculation;
mod chains;
mod relaxation;
mod topology;
mod types;

pub use calculation::{compute, compute_schedule, TaskData};
pub use chains::{critical_chains, critical_links, is_critical_link, DEFAULT_MAX_CHAINS};
pub use topology::{topological_order, CycleDetected};
pub use types::ScheduleResult;
