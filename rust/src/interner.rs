//! Id-to-position index for task snapshots.
//!
//! Maps task id strings to dense `usize` positions so the passes can work on
//! plain vectors instead of string-keyed maps.

use rustc_hash::FxHashMap;

use crate::models::Task;

/// Dense task position within a snapshot.
pub type TaskPos = usize;

/// Maps task ids to their position in a task slice.
#[derive(Debug, Clone, Default)]
pub struct TaskIndex {
    to_pos: FxHashMap<String, TaskPos>,
}

impl TaskIndex {
    /// Create an empty index with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_pos: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Index a task slice.
    ///
    /// If an id occurs more than once (possible only in unvalidated snapshots)
    /// the first occurrence wins.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut index = Self::with_capacity(tasks.len());
        for (pos, task) in tasks.iter().enumerate() {
            index.insert(&task.id, pos);
        }
        index
    }

    /// Record `id` at `pos` unless it is already indexed.
    /// Returns the position the id resolves to afterwards.
    pub fn insert(&mut self, id: &str, pos: TaskPos) -> TaskPos {
        if let Some(&existing) = self.to_pos.get(id) {
            return existing;
        }
        self.to_pos.insert(id.to_string(), pos);
        pos
    }

    /// Get the position for an id, if it exists.
    #[inline]
    pub fn get(&self, id: &str) -> Option<TaskPos> {
        self.to_pos.get(id).copied()
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.to_pos.contains_key(id)
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.to_pos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_pos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_and_lookup() {
        let tasks = vec![
            Task::new("A", "first", 1, vec![]),
            Task::new("B", "second", 2, vec![]),
        ];
        let index = TaskIndex::from_tasks(&tasks);

        assert_eq!(index.get("A"), Some(0));
        assert_eq!(index.get("B"), Some(1));
        assert_eq!(index.get("C"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let tasks = vec![
            Task::new("A", "first", 1, vec![]),
            Task::new("A", "shadowed", 9, vec![]),
        ];
        let index = TaskIndex::from_tasks(&tasks);

        assert_eq!(index.get("A"), Some(0));
        assert_eq!(index.len(), 1);
    }
}
