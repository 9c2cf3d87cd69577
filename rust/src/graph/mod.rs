//! Task graph: the editable set of tasks and their predecessor edges.
//!
//! Structural validation happens here, before a mutation is applied. The engine
//! in [`crate::critical_path`] never mutates a graph; it reads a snapshot.

mod parse;

use std::str::FromStr;

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::interner::TaskIndex;
use crate::models::Task;

pub use parse::{normalize_id, parse_duration, parse_predecessors};

/// Errors that reject a graph edit. The graph is unchanged when one is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Task id must not be empty")]
    EmptyId,
    #[error("Task name must not be empty")]
    EmptyName,
    #[error("Task id \"{0}\" already exists")]
    DuplicateId(String),
    #[error("Predecessor \"{0}\" does not exist")]
    UnknownPredecessor(String),
    #[error("Task not found: {0}")]
    UnknownTask(String),
    #[error("Unknown task field: {0}")]
    UnknownField(String),
}

/// Editable task attribute, as named by the editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskField {
    Name,
    Duration,
    Predecessors,
}

impl FromStr for TaskField {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(Self::Name),
            "duration" => Ok(Self::Duration),
            "predecessors" | "predecessorIds" | "predecessor_ids" => Ok(Self::Predecessors),
            other => Err(GraphError::UnknownField(other.to_string())),
        }
    }
}

/// A typed change to one task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskUpdate {
    Name(String),
    Duration(u32),
    Predecessors(Vec<String>),
}

/// Ordered collection of tasks keyed by unique id.
///
/// Tasks only refer to each other by id string. Insertion order is kept; the
/// diagram uses it to order tasks within a level.
#[derive(Clone, Debug, Default)]
pub struct TaskGraph {
    tasks: Vec<Task>,
    index: TaskIndex,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from an existing task list, keeping what it can.
    ///
    /// Meant for imports and restored snapshots. Ids and predecessor ids are
    /// normalized. Dangling predecessor ids are tolerated (the engine ignores
    /// them). A task whose id is empty or repeats an earlier one is dropped;
    /// use [`TaskGraph::try_from_tasks`] to reject those instead.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut graph = Self::with_capacity(tasks.len());
        for task in tasks {
            let _ = graph.push_normalized(task);
        }
        graph
    }

    /// Like [`TaskGraph::from_tasks`], but fails on the first empty or
    /// repeated id.
    pub fn try_from_tasks(tasks: Vec<Task>) -> Result<Self, GraphError> {
        let mut graph = Self::with_capacity(tasks.len());
        for task in tasks {
            graph.push_normalized(task)?;
        }
        Ok(graph)
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            tasks: Vec::with_capacity(capacity),
            index: TaskIndex::with_capacity(capacity),
        }
    }

    /// Append without checking that predecessors exist.
    fn push_normalized(&mut self, task: Task) -> Result<(), GraphError> {
        let id = normalize_id(&task.id);
        if id.is_empty() {
            return Err(GraphError::EmptyId);
        }
        if self.index.contains(&id) {
            return Err(GraphError::DuplicateId(id));
        }
        let predecessor_ids = normalize_predecessors(&task.predecessor_ids);
        let pos = self.tasks.len();
        self.index.insert(&id, pos);
        self.tasks.push(Task::new(id, task.name, task.duration, predecessor_ids));
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(&normalize_id(id))
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.index
            .get(&normalize_id(id))
            .and_then(|pos| self.tasks.get(pos))
    }

    /// Append a new task.
    ///
    /// The id is normalized and must be new; every predecessor must already be
    /// in the graph. Predecessor order and duplicates are kept as given.
    pub fn add_task(
        &mut self,
        id: &str,
        name: &str,
        duration: u32,
        predecessor_ids: Vec<String>,
    ) -> Result<&Task, GraphError> {
        let id = normalize_id(id);
        if id.is_empty() {
            return Err(GraphError::EmptyId);
        }
        if name.trim().is_empty() {
            return Err(GraphError::EmptyName);
        }
        if self.index.contains(&id) {
            return Err(GraphError::DuplicateId(id));
        }
        let predecessor_ids = normalize_predecessors(&predecessor_ids);
        if let Some(missing) = predecessor_ids.iter().find(|p| !self.index.contains(p)) {
            return Err(GraphError::UnknownPredecessor(missing.clone()));
        }

        let pos = self.tasks.len();
        self.index.insert(&id, pos);
        self.tasks.push(Task::new(id, name, duration, predecessor_ids));
        Ok(&self.tasks[pos])
    }

    /// Apply a change to an existing task.
    ///
    /// Replacement predecessor lists are normalized like in `add_task` but NOT
    /// checked for existence, so an update can leave a dangling reference;
    /// [`TaskGraph::dangling_references`] reports those and the engine treats
    /// them as no constraint.
    ///
    /// Durations are stored as given. Clamping to a minimum is the caller's
    /// job (the editor applies `min_update_duration`).
    pub fn update_task(&mut self, id: &str, update: TaskUpdate) -> Result<&Task, GraphError> {
        let id = normalize_id(id);
        let pos = self
            .index
            .get(&id)
            .ok_or_else(|| GraphError::UnknownTask(id.clone()))?;
        let task = &mut self.tasks[pos];
        match update {
            TaskUpdate::Name(name) => task.name = name,
            TaskUpdate::Duration(duration) => task.duration = duration,
            TaskUpdate::Predecessors(predecessor_ids) => {
                task.predecessor_ids = normalize_predecessors(&predecessor_ids)
            }
        }
        Ok(&self.tasks[pos])
    }

    /// Delete a task and strip its id from every other task's predecessors.
    pub fn remove_task(&mut self, id: &str) -> Result<Task, GraphError> {
        let id = normalize_id(id);
        let pos = self
            .index
            .get(&id)
            .ok_or_else(|| GraphError::UnknownTask(id.clone()))?;
        let removed = self.tasks.remove(pos);
        for task in &mut self.tasks {
            task.predecessor_ids.retain(|p| *p != removed.id);
        }
        self.index = TaskIndex::from_tasks(&self.tasks);
        Ok(removed)
    }

    /// Predecessor references that do not resolve, as `(task_id, missing_id)`.
    pub fn dangling_references(&self) -> Vec<(String, String)> {
        let mut seen: FxHashSet<(&str, &str)> = FxHashSet::default();
        let mut dangling = Vec::new();
        for task in &self.tasks {
            for pred in &task.predecessor_ids {
                if !self.index.contains(pred) && seen.insert((task.id.as_str(), pred.as_str())) {
                    dangling.push((task.id.clone(), pred.clone()));
                }
            }
        }
        dangling
    }
}

/// Normalize predecessor ids, dropping empty tokens. Order and duplicates kept.
fn normalize_predecessors(ids: &[String]) -> Vec<String> {
    ids.iter()
        .map(|p| normalize_id(p))
        .filter(|p| !p.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn chain_graph() -> TaskGraph {
        let mut graph = TaskGraph::new();
        graph.add_task("A", "Analysis", 3, vec![]).unwrap();
        graph.add_task("B", "Build", 2, ids(&["A"])).unwrap();
        graph.add_task("C", "Check", 5, ids(&["B"])).unwrap();
        graph
    }

    #[test]
    fn test_add_task_normalizes_ids() {
        let mut graph = TaskGraph::new();
        graph.add_task(" a ", "Analysis", 3, vec![]).unwrap();
        let task = graph.add_task("b", "Build", 2, ids(&[" a", ""])).unwrap();

        assert_eq!(task.id, "B");
        assert_eq!(task.predecessor_ids, ids(&["A"]));
        assert!(graph.contains("a"));
        assert_eq!(graph.get("b").map(|t| t.name.as_str()), Some("Build"));
    }

    #[test]
    fn test_add_duplicate_id_rejected() {
        let mut graph = chain_graph();
        let err = graph.add_task("a", "Again", 1, vec![]).unwrap_err();

        assert_eq!(err, GraphError::DuplicateId("A".to_string()));
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.get("A").map(|t| t.name.as_str()), Some("Analysis"));
    }

    #[test]
    fn test_add_unknown_predecessor_rejected() {
        let mut graph = chain_graph();
        let err = graph.add_task("D", "Deploy", 1, ids(&["C", "Z"])).unwrap_err();

        assert_eq!(err, GraphError::UnknownPredecessor("Z".to_string()));
        assert!(!graph.contains("D"));
    }

    #[test]
    fn test_add_empty_fields_rejected() {
        let mut graph = TaskGraph::new();
        assert_eq!(
            graph.add_task("  ", "Name", 1, vec![]).unwrap_err(),
            GraphError::EmptyId
        );
        assert_eq!(
            graph.add_task("A", " ", 1, vec![]).unwrap_err(),
            GraphError::EmptyName
        );
        assert!(graph.is_empty());
    }

    #[test]
    fn test_update_skips_existence_check() {
        let mut graph = chain_graph();
        graph
            .update_task("c", TaskUpdate::Predecessors(ids(&["B", "GHOST"])))
            .unwrap();

        assert_eq!(graph.get("C").unwrap().predecessor_ids, ids(&["B", "GHOST"]));
        assert_eq!(
            graph.dangling_references(),
            vec![("C".to_string(), "GHOST".to_string())]
        );
    }

    #[test]
    fn test_update_name_and_duration() {
        let mut graph = chain_graph();
        graph
            .update_task("B", TaskUpdate::Name("Rebuild".to_string()))
            .unwrap();
        graph.update_task("B", TaskUpdate::Duration(7)).unwrap();

        let task = graph.get("B").unwrap();
        assert_eq!(task.name, "Rebuild");
        assert_eq!(task.duration, 7);
    }

    #[test]
    fn test_update_unknown_task() {
        let mut graph = chain_graph();
        let err = graph
            .update_task("Q", TaskUpdate::Duration(2))
            .unwrap_err();
        assert_eq!(err, GraphError::UnknownTask("Q".to_string()));
    }

    #[test]
    fn test_remove_sweeps_references() {
        let mut graph = chain_graph();
        graph.add_task("D", "Docs", 1, ids(&["A", "B"])).unwrap();

        let removed = graph.remove_task("b").unwrap();

        assert_eq!(removed.id, "B");
        assert!(!graph.contains("B"));
        assert!(graph
            .iter()
            .all(|t| !t.predecessor_ids.iter().any(|p| p == "B")));
        assert_eq!(graph.get("D").unwrap().predecessor_ids, ids(&["A"]));
        // Index is rebuilt after the shift
        assert_eq!(graph.get("C").map(|t| t.duration), Some(5));
        assert_eq!(graph.get("D").map(|t| t.duration), Some(1));
    }

    #[test]
    fn test_remove_unknown_task() {
        let mut graph = chain_graph();
        assert_eq!(
            graph.remove_task("X").unwrap_err(),
            GraphError::UnknownTask("X".to_string())
        );
        assert_eq!(graph.len(), 3);
    }

    #[test]
    fn test_task_field_from_str() {
        assert_eq!("name".parse::<TaskField>(), Ok(TaskField::Name));
        assert_eq!("duration".parse::<TaskField>(), Ok(TaskField::Duration));
        assert_eq!(
            "predecessorIds".parse::<TaskField>(),
            Ok(TaskField::Predecessors)
        );
        assert_eq!(
            "color".parse::<TaskField>(),
            Err(GraphError::UnknownField("color".to_string()))
        );
    }

    #[test]
    fn test_update_normalizes_predecessors() {
        let mut graph = chain_graph();
        graph
            .update_task("C", TaskUpdate::Predecessors(ids(&[" a", "b", ""])))
            .unwrap();

        assert_eq!(graph.get("C").unwrap().predecessor_ids, ids(&["A", "B"]));
        assert!(graph.dangling_references().is_empty());
    }

    #[test]
    fn test_update_duration_not_clamped() {
        let mut graph = chain_graph();
        graph.update_task("A", TaskUpdate::Duration(0)).unwrap();
        assert_eq!(graph.get("A").unwrap().duration, 0);
    }

    #[test]
    fn test_from_tasks_normalizes_and_drops_repeats() {
        let mut graph = TaskGraph::from_tasks(vec![
            Task::new("a", "Alpha", 2, vec![]),
            Task::new("B", "Beta", 3, ids(&["a "])),
            Task::new("b", "Beta again", 9, vec![]),
            Task::new(" ", "Blank", 1, vec![]),
        ]);

        let listed: Vec<&str> = graph.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(listed, vec!["A", "B"]);
        assert_eq!(graph.get("b").map(|t| t.name.as_str()), Some("Beta"));
        assert_eq!(graph.get("B").unwrap().predecessor_ids, ids(&["A"]));
        assert!(graph.dangling_references().is_empty());

        // Lowercase imports stay editable and block a second copy
        graph.update_task("a", TaskUpdate::Duration(4)).unwrap();
        assert_eq!(graph.get("A").unwrap().duration, 4);
        assert_eq!(
            graph.add_task("A", "Clash", 1, vec![]).unwrap_err(),
            GraphError::DuplicateId("A".to_string())
        );
        assert_eq!(graph.remove_task("a").unwrap().name, "Alpha");
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_try_from_tasks_rejects_repeats() {
        let err = TaskGraph::try_from_tasks(vec![
            Task::new("a", "Alpha", 2, vec![]),
            Task::new("A", "Alpha again", 1, vec![]),
        ])
        .unwrap_err();
        assert_eq!(err, GraphError::DuplicateId("A".to_string()));

        assert_eq!(
            TaskGraph::try_from_tasks(vec![Task::new("", "Blank", 1, vec![])]).unwrap_err(),
            GraphError::EmptyId
        );

        let graph = TaskGraph::try_from_tasks(vec![Task::new("x", "Ex", 1, ids(&["y"]))]).unwrap();
        assert_eq!(
            graph.dangling_references(),
            vec![("X".to_string(), "Y".to_string())]
        );
    }

    #[test]
    fn test_from_tasks_keeps_dangling() {
        let graph = TaskGraph::from_tasks(vec![Task::new("A", "Alpha", 2, ids(&["Z"]))]);
        assert_eq!(graph.len(), 1);
        assert_eq!(
            graph.dangling_references(),
            vec![("A".to_string(), "Z".to_string())]
        );
    }
}
