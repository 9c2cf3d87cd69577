//! Kahn's algorithm and single-sweep passes in topological order.

use std::collections::VecDeque;

use crate::interner::TaskPos;

use super::calculation::TaskData;

/// Marker returned when the resolvable edges contain a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleDetected {
    /// Positions that were ordered before the cycle blocked progress.
    pub partial_order: Vec<TaskPos>,
}

/// Order tasks so every task comes after all its resolvable predecessors.
///
/// Ready tasks are taken in graph order, so the result is deterministic.
/// Duplicate edges count once per occurrence on both sides and cancel out; a
/// self-reference can never be released and is reported as a cycle.
pub fn topological_order(data: &TaskData) -> Result<Vec<TaskPos>, CycleDetected> {
    let n = data.len();
    let mut in_degree: Vec<usize> = data.preds.iter().map(|p| p.len()).collect();

    let mut queue: VecDeque<TaskPos> = (0..n).filter(|&pos| in_degree[pos] == 0).collect();
    let mut order: Vec<TaskPos> = Vec::with_capacity(n);

    while let Some(pos) = queue.pop_front() {
        order.push(pos);
        for &succ in &data.succs[pos] {
            in_degree[succ] -= 1;
            if in_degree[succ] == 0 {
                queue.push_back(succ);
            }
        }
    }

    if order.len() != n {
        return Err(CycleDetected {
            partial_order: order,
        });
    }
    Ok(order)
}

/// Earliest times and levels, one sweep in `order`.
///
/// Tasks not in `order` keep their seeded values.
pub fn forward_sweep(
    data: &TaskData,
    order: &[TaskPos],
    earliest_start: &mut [i64],
    earliest_finish: &mut [i64],
    level: &mut [u32],
) {
    for &pos in order {
        let mut start: i64 = 0;
        let mut max_pred_level: Option<u32> = None;
        for &pred in &data.preds[pos] {
            start = start.max(earliest_finish[pred]);
            max_pred_level = Some(max_pred_level.map_or(level[pred], |l| l.max(level[pred])));
        }
        earliest_start[pos] = start;
        earliest_finish[pos] = start + data.durations[pos];
        level[pos] = max_pred_level.map_or(0, |l| l.saturating_add(1));
    }
}

/// Latest times, one sweep in reverse `order`.
///
/// Tasks without successors finish at `project_duration`; every other task
/// must finish by the earliest latest-start of its successors.
pub fn backward_sweep(
    data: &TaskData,
    order: &[TaskPos],
    project_duration: i64,
    latest_start: &mut [Option<i64>],
    latest_finish: &mut [Option<i64>],
) {
    for &pos in order.iter().rev() {
        let finish = if data.succs[pos].is_empty() {
            Some(project_duration)
        } else {
            data.succs[pos]
                .iter()
                .filter_map(|&succ| latest_start[succ])
                .min()
        };
        latest_finish[pos] = finish;
        latest_start[pos] = finish.map(|f| f - data.durations[pos]);
    }
}
