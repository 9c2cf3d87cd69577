//! Core data types for the PERT engine.

/// One unit of work in a project.
///
/// Only `id`, `name`, `duration` and `predecessor_ids` are authoritative; every
/// timing value is derived by the engine and lives on [`ScheduledTask`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    /// Short identifier, unique within a graph and stored uppercased.
    pub id: String,
    /// Free-form label.
    pub name: String,
    /// Whole days of work.
    pub duration: u32,
    /// Ids this task waits on, in the order they were typed.
    pub predecessor_ids: Vec<String>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        duration: u32,
        predecessor_ids: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            predecessor_ids,
        }
    }
}

/// A task annotated with the values computed by one engine run.
///
/// Regenerated on every run; never fed back into the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledTask {
    pub id: String,
    pub name: String,
    pub duration: u32,
    pub predecessor_ids: Vec<String>,
    /// Reverse of every task's `predecessor_ids`, in graph order.
    pub successor_ids: Vec<String>,
    /// Topological depth: 0 for tasks without resolvable predecessors.
    pub level: u32,
    pub earliest_start: i64,
    pub earliest_finish: i64,
    /// `None` means unbounded (the backward pass never reached this task).
    pub latest_start: Option<i64>,
    pub latest_finish: Option<i64>,
    /// `latest_start - earliest_start`, unbounded if `latest_start` is.
    pub slack: Option<i64>,
    pub is_critical: bool,
}

impl ScheduledTask {
    /// Seed a row from its source task with forward-pass initial values.
    pub(crate) fn seed(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            duration: task.duration,
            predecessor_ids: task.predecessor_ids.clone(),
            successor_ids: Vec::new(),
            level: 0,
            earliest_start: 0,
            earliest_finish: i64::from(task.duration),
            latest_start: None,
            latest_finish: None,
            slack: None,
            is_critical: false,
        }
    }
}
