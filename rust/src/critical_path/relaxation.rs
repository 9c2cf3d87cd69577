//! Bounded fixed-point relaxation passes.
//!
//! Every pass revisits all tasks in graph order, updating values in place,
//! until a full pass changes nothing. The number of passes is capped; on a
//! DAG the longest chain has fewer edges than there are tasks, so hitting the
//! cap means the forward values never settled, i.e. a cycle.

use crate::log_debug;

use super::calculation::TaskData;

/// How a relaxation loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelaxationOutcome {
    /// Passes run, including the final pass that changed nothing.
    pub passes: usize,
    /// False when the pass cap was exceeded before a fixed point.
    pub converged: bool,
}

/// Relax earliest start/finish and level to a fixed point.
pub fn forward_relax(
    data: &TaskData,
    max_passes: usize,
    verbosity: u8,
    earliest_start: &mut [i64],
    earliest_finish: &mut [i64],
    level: &mut [u32],
) -> RelaxationOutcome {
    let mut passes = 0;
    loop {
        if passes > max_passes {
            return RelaxationOutcome {
                passes,
                converged: false,
            };
        }
        passes += 1;

        let mut changed = false;
        for pos in 0..data.len() {
            let mut start: i64 = 0;
            let mut max_pred_level: Option<u32> = None;
            for &pred in &data.preds[pos] {
                start = start.max(earliest_finish[pred]);
                max_pred_level = Some(max_pred_level.map_or(level[pred], |l| l.max(level[pred])));
            }
            let finish = start + data.durations[pos];
            let new_level = max_pred_level.map_or(0, |l| l.saturating_add(1));

            if earliest_start[pos] != start
                || earliest_finish[pos] != finish
                || level[pos] != new_level
            {
                log_debug!(
                    verbosity,
                    "  forward pass {}: {} es={} ef={} level={}",
                    passes,
                    data.id(pos),
                    start,
                    finish,
                    new_level
                );
                earliest_start[pos] = start;
                earliest_finish[pos] = finish;
                level[pos] = new_level;
                changed = true;
            }
        }

        if !changed {
            return RelaxationOutcome {
                passes,
                converged: true,
            };
        }
    }
}

/// Relax latest start/finish to a fixed point.
///
/// Sinks are pinned to `project_duration` up front. Hitting the pass cap here
/// leaves values as they are; the caller does not treat it as a cycle.
pub fn backward_relax(
    data: &TaskData,
    project_duration: i64,
    max_passes: usize,
    verbosity: u8,
    latest_start: &mut [Option<i64>],
    latest_finish: &mut [Option<i64>],
) -> RelaxationOutcome {
    for pos in 0..data.len() {
        if data.succs[pos].is_empty() {
            latest_finish[pos] = Some(project_duration);
            latest_start[pos] = Some(project_duration - data.durations[pos]);
        }
    }

    let mut passes = 0;
    loop {
        if passes > max_passes {
            return RelaxationOutcome {
                passes,
                converged: false,
            };
        }
        passes += 1;

        let mut changed = false;
        for pos in 0..data.len() {
            if data.succs[pos].is_empty() {
                continue;
            }
            let finish = data.succs[pos]
                .iter()
                .filter_map(|&succ| latest_start[succ])
                .min();
            let start = finish.map(|f| f - data.durations[pos]);

            if latest_finish[pos] != finish || latest_start[pos] != start {
                log_debug!(
                    verbosity,
                    "  backward pass {}: {} ls={:?} lf={:?}",
                    passes,
                    data.id(pos),
                    start,
                    finish
                );
                latest_finish[pos] = finish;
                latest_start[pos] = start;
                changed = true;
            }
        }

        if !changed {
            return RelaxationOutcome {
                passes,
                converged: true,
            };
        }
    }
}
