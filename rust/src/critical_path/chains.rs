//! Critical links and end-to-end critical chains.
//!
//! The critical set only says which tasks have zero slack. With several
//! equally long paths the set alone does not say how they connect; these
//! helpers rebuild that from the schedule.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::models::ScheduledTask;

use super::types::ScheduleResult;

/// An edge lies on a tight critical chain: both ends are critical and the
/// successor starts exactly when the predecessor finishes.
pub fn is_critical_link(pred: &ScheduledTask, succ: &ScheduledTask) -> bool {
    pred.is_critical && succ.is_critical && pred.earliest_finish == succ.earliest_start
}

fn position_map(result: &ScheduleResult) -> FxHashMap<&str, usize> {
    let mut positions = FxHashMap::with_capacity_and_hasher(result.tasks.len(), Default::default());
    for (pos, task) in result.tasks.iter().enumerate() {
        positions.entry(task.id.as_str()).or_insert(pos);
    }
    positions
}

/// Critical predecessor positions of each task, duplicates removed.
fn critical_preds(result: &ScheduleResult, positions: &FxHashMap<&str, usize>) -> Vec<Vec<usize>> {
    result
        .tasks
        .iter()
        .map(|task| {
            let mut seen = FxHashSet::default();
            task.predecessor_ids
                .iter()
                .filter_map(|id| positions.get(id.as_str()).copied())
                .filter(|&pred| is_critical_link(&result.tasks[pred], task))
                .filter(|&pred| seen.insert(pred))
                .collect()
        })
        .collect()
}

/// Every critical link as `(predecessor_id, successor_id)`, in graph order of
/// the successor. Empty for a cyclic schedule.
pub fn critical_links(result: &ScheduleResult) -> Vec<(String, String)> {
    if result.has_cycle {
        return Vec::new();
    }
    let positions = position_map(result);
    let preds = critical_preds(result, &positions);

    let mut links = Vec::new();
    for (pos, task) in result.tasks.iter().enumerate() {
        for &pred in &preds[pos] {
            links.push((result.tasks[pred].id.clone(), task.id.clone()));
        }
    }
    links
}

/// Chain cap used by the bindings when the caller gives none.
pub const DEFAULT_MAX_CHAINS: usize = 64;

/// Reconstruct start-to-end critical chains, at most `max_chains` of them.
///
/// Starts from each critical task that no critical link leaves and walks
/// backward along critical links until a task with none is reached. Chains
/// are returned start first, ordered by end task then by predecessor listing.
/// Stacked equal-length branches multiply the number of chains, hence the cap;
/// [`critical_links`] gives the whole structure in linear size. Empty for a
/// cyclic schedule.
pub fn critical_chains(result: &ScheduleResult, max_chains: usize) -> Vec<Vec<String>> {
    if result.has_cycle || max_chains == 0 {
        return Vec::new();
    }
    let positions = position_map(result);
    let preds = critical_preds(result, &positions);

    let mut has_critical_succ = vec![false; result.tasks.len()];
    for list in &preds {
        for &pred in list {
            has_critical_succ[pred] = true;
        }
    }

    let mut chains = Vec::new();
    for (end, task) in result.tasks.iter().enumerate() {
        if !task.is_critical || has_critical_succ[end] {
            continue;
        }
        // Depth-first, partial chains stored end first
        let mut stack: Vec<Vec<usize>> = vec![vec![end]];
        while let Some(partial) = stack.pop() {
            let Some(&head) = partial.last() else {
                continue;
            };
            if preds[head].is_empty() {
                chains.push(
                    partial
                        .iter()
                        .rev()
                        .map(|&pos| result.tasks[pos].id.clone())
                        .collect(),
                );
                if chains.len() >= max_chains {
                    return chains;
                }
                continue;
            }
            // Reverse push so the first listed predecessor is explored first
            for &pred in preds[head].iter().rev() {
                let mut next = partial.clone();
                next.push(pred);
                stack.push(next);
            }
        }
    }
    chains
}
