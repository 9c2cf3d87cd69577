//! Types produced by the critical path calculation.

use crate::models::ScheduledTask;

/// Output of one engine run over a graph snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleResult {
    /// Every task, in graph order, with computed fields filled in.
    pub tasks: Vec<ScheduledTask>,
    /// Largest earliest finish over all tasks; 0 for an empty graph.
    /// Meaningless when `has_cycle` is set.
    pub project_duration: i64,
    /// A circular dependency was found. No timing value should be shown.
    pub has_cycle: bool,
    /// Ids of all zero-slack tasks, in graph order. Empty when `has_cycle`.
    pub critical_task_ids: Vec<String>,
}

impl ScheduleResult {
    /// Result for an empty graph.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Look up a scheduled task by id (first occurrence).
    pub fn task(&self, id: &str) -> Option<&ScheduledTask> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn is_critical(&self, id: &str) -> bool {
        self.task(id).is_some_and(|t| t.is_critical)
    }

    /// Whether ES/EF/LS/LF carry meaning. False for cyclic graphs.
    pub fn has_timings(&self) -> bool {
        !self.has_cycle
    }

    /// Deepest level in the graph, or `None` when there are no tasks.
    pub fn max_level(&self) -> Option<u32> {
        self.tasks.iter().map(|t| t.level).max()
    }
}
