//! Layout data for drawing the dependency diagram.
//!
//! Grid coordinates only: tasks go in the column of their level and, within a
//! column, in graph order. Turning cells into pixels is the renderer's job.

use rustc_hash::FxHashMap;

use crate::critical_path::{is_critical_link, ScheduleResult};

/// One task placed on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramNode {
    pub id: String,
    pub name: String,
    /// Equal to the task's level.
    pub column: u32,
    /// Index within the column.
    pub row: usize,
    pub is_critical: bool,
}

/// One predecessor relationship, drawn from `from` to `to`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramEdge {
    pub from: String,
    pub to: String,
    /// Edge lies on a tight critical chain (see [`is_critical_link`]).
    pub critical: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiagramLayout {
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
    /// Number of columns (max level + 1), 0 when empty.
    pub columns: usize,
    /// Height of the tallest column.
    pub rows: usize,
}

impl DiagramLayout {
    /// Lay out a schedule. Returns `None` for a cyclic schedule, which has no
    /// meaningful levels to draw.
    pub fn from_schedule(result: &ScheduleResult) -> Option<Self> {
        if result.has_cycle {
            return None;
        }

        let mut column_heights: FxHashMap<u32, usize> = FxHashMap::default();
        let mut positions: FxHashMap<&str, usize> = FxHashMap::default();
        let mut nodes = Vec::with_capacity(result.tasks.len());

        for (pos, task) in result.tasks.iter().enumerate() {
            let height = column_heights.entry(task.level).or_insert(0);
            nodes.push(DiagramNode {
                id: task.id.clone(),
                name: task.name.clone(),
                column: task.level,
                row: *height,
                is_critical: task.is_critical,
            });
            *height += 1;
            positions.entry(task.id.as_str()).or_insert(pos);
        }

        let mut edges = Vec::new();
        for task in &result.tasks {
            for pred_id in &task.predecessor_ids {
                let Some(&pred) = positions.get(pred_id.as_str()) else {
                    continue;
                };
                let pred_task = &result.tasks[pred];
                if edges
                    .iter()
                    .any(|e: &DiagramEdge| e.from == pred_task.id && e.to == task.id)
                {
                    continue;
                }
                edges.push(DiagramEdge {
                    from: pred_task.id.clone(),
                    to: task.id.clone(),
                    critical: is_critical_link(pred_task, task),
                });
            }
        }

        let columns = result.max_level().map_or(0, |l| l as usize + 1);
        let rows = column_heights.values().copied().max().unwrap_or(0);

        Some(Self {
            nodes,
            edges,
            columns,
            rows,
        })
    }

    pub fn node(&self, id: &str) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScheduleConfig;
    use crate::critical_path::compute_schedule;
    use crate::models::Task;

    fn make_task(id: &str, duration: u32, preds: &[&str]) -> Task {
        Task::new(
            id,
            format!("Task {}", id),
            duration,
            preds.iter().map(|p| p.to_string()).collect(),
        )
    }

    #[test]
    fn test_diamond_layout() {
        let result = compute_schedule(
            &[
                make_task("A", 3, &[]),
                make_task("B", 2, &["A"]),
                make_task("C", 4, &["A"]),
                make_task("D", 2, &["B", "C"]),
            ],
            &ScheduleConfig::default(),
        );
        let layout = DiagramLayout::from_schedule(&result).unwrap();

        assert_eq!(layout.columns, 3);
        assert_eq!(layout.rows, 2);
        let placed = |id: &str| {
            let n = layout.node(id).unwrap();
            (n.column, n.row)
        };
        assert_eq!(placed("A"), (0, 0));
        assert_eq!(placed("B"), (1, 0));
        assert_eq!(placed("C"), (1, 1));
        assert_eq!(placed("D"), (2, 0));

        let critical: Vec<(&str, &str)> = layout
            .edges
            .iter()
            .filter(|e| e.critical)
            .map(|e| (e.from.as_str(), e.to.as_str()))
            .collect();
        assert_eq!(layout.edges.len(), 4);
        assert_eq!(critical, vec![("A", "C"), ("C", "D")]);
    }

    #[test]
    fn test_dangling_and_duplicate_edges_skipped() {
        let result = compute_schedule(
            &[make_task("A", 1, &[]), make_task("B", 1, &["A", "A", "NOPE"])],
            &ScheduleConfig::default(),
        );
        let layout = DiagramLayout::from_schedule(&result).unwrap();
        assert_eq!(layout.edges.len(), 1);
        assert!(layout.edges[0].critical);
    }

    #[test]
    fn test_empty_and_cyclic() {
        let empty = DiagramLayout::from_schedule(&ScheduleResult::empty()).unwrap();
        assert_eq!(empty, DiagramLayout::default());

        let cyclic = compute_schedule(
            &[make_task("A", 1, &["B"]), make_task("B", 1, &["A"])],
            &ScheduleConfig::default(),
        );
        assert!(DiagramLayout::from_schedule(&cyclic).is_none());
    }
}
