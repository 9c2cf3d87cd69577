//! Editor controller: owns the task graph and keeps its schedule current.
//!
//! Every successful edit is followed by a full recomputation. A rejected edit
//! leaves both the graph and the last schedule untouched.

use crate::config::ScheduleConfig;
use crate::critical_path::{compute, ScheduleResult};
use crate::graph::{
    parse_duration, parse_predecessors, GraphError, TaskField, TaskGraph, TaskUpdate,
};
use crate::log_edits;
use crate::models::Task;

/// Serializes edits to a single graph and holds the schedule for its current state.
#[derive(Clone, Debug)]
pub struct PertEditor {
    graph: TaskGraph,
    config: ScheduleConfig,
    schedule: ScheduleResult,
}

impl Default for PertEditor {
    fn default() -> Self {
        Self::new(ScheduleConfig::default())
    }
}

impl PertEditor {
    /// Start with an empty graph.
    pub fn new(config: ScheduleConfig) -> Self {
        Self::with_graph(TaskGraph::new(), config)
    }

    /// Take ownership of an existing graph (e.g. an import) and schedule it.
    pub fn with_graph(graph: TaskGraph, config: ScheduleConfig) -> Self {
        let schedule = compute(&graph, &config);
        Self {
            graph,
            config,
            schedule,
        }
    }

    /// A small six-task software project, handy as a starting point.
    pub fn sample(config: ScheduleConfig) -> Self {
        let preds = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let graph = TaskGraph::from_tasks(vec![
            Task::new("A", "Requirements analysis", 3, vec![]),
            Task::new("B", "Architecture design", 2, preds(&["A"])),
            Task::new("C", "Interface design", 4, preds(&["A"])),
            Task::new("D", "Backend development", 5, preds(&["B"])),
            Task::new("E", "Frontend development", 4, preds(&["C"])),
            Task::new("F", "Integration", 2, preds(&["D", "E"])),
        ]);
        Self::with_graph(graph, config)
    }

    pub fn graph(&self) -> &TaskGraph {
        &self.graph
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Schedule for the graph as it currently stands.
    pub fn schedule(&self) -> &ScheduleResult {
        &self.schedule
    }

    /// Swap the configuration and recompute.
    pub fn set_config(&mut self, config: ScheduleConfig) -> &ScheduleResult {
        self.config = config;
        self.recompute()
    }

    /// Add a task from editor input.
    ///
    /// `duration` is parsed leniently and clamped to `min_add_duration`;
    /// `predecessors` is a comma-separated id list whose entries must all exist.
    pub fn add_task(
        &mut self,
        id: &str,
        name: &str,
        duration: &str,
        predecessors: &str,
    ) -> Result<&ScheduleResult, GraphError> {
        let verbosity = self.config.verbosity;
        let duration = parse_duration(duration, self.config.min_add_duration);
        let added = self
            .graph
            .add_task(id, name, duration, parse_predecessors(predecessors))
            .map_err(|e| {
                log_edits!(verbosity, "Rejected add of {:?}: {}", id, e);
                e
            })?;
        log_edits!(
            verbosity,
            "Added {} ({} days, after {:?})",
            added.id,
            added.duration,
            added.predecessor_ids
        );
        Ok(self.recompute())
    }

    /// Change one field of a task from editor input.
    ///
    /// Durations are clamped to `min_update_duration`. New predecessor lists
    /// are not checked for existence (see [`TaskGraph::update_task`]).
    pub fn update_task(
        &mut self,
        id: &str,
        field: TaskField,
        value: &str,
    ) -> Result<&ScheduleResult, GraphError> {
        let update = match field {
            TaskField::Name => TaskUpdate::Name(value.to_string()),
            TaskField::Duration => {
                TaskUpdate::Duration(parse_duration(value, self.config.min_update_duration))
            }
            TaskField::Predecessors => TaskUpdate::Predecessors(parse_predecessors(value)),
        };
        let updated = self.graph.update_task(id, update)?;
        log_edits!(
            self.config.verbosity,
            "Updated {} {:?}",
            updated.id,
            field
        );
        Ok(self.recompute())
    }

    /// Like [`PertEditor::update_task`], with the field given by name.
    pub fn update_task_field(
        &mut self,
        id: &str,
        field: &str,
        value: &str,
    ) -> Result<&ScheduleResult, GraphError> {
        let field: TaskField = field.parse()?;
        self.update_task(id, field, value)
    }

    /// Remove a task and every reference to it.
    pub fn remove_task(&mut self, id: &str) -> Result<Task, GraphError> {
        let removed = self.graph.remove_task(id)?;
        log_edits!(self.config.verbosity, "Removed {}", removed.id);
        self.recompute();
        Ok(removed)
    }

    /// Recompute the schedule from scratch.
    pub fn recompute(&mut self) -> &ScheduleResult {
        self.schedule = compute(&self.graph, &self.config);
        log_edits!(
            self.config.verbosity,
            "Recomputed: duration {}, critical {:?}, cycle={}",
            self.schedule.project_duration,
            self.schedule.critical_task_ids,
            self.schedule.has_cycle
        );
        &self.schedule
    }
}
