//! Critical path calculation using forward and backward passes.

use crate::config::{CycleDetection, ScheduleConfig};
use crate::graph::TaskGraph;
use crate::interner::{TaskIndex, TaskPos};
use crate::models::{ScheduledTask, Task};
use crate::{log_debug, log_passes};

use super::relaxation::{backward_relax, forward_relax};
use super::topology::{backward_sweep, forward_sweep, topological_order};
use super::types::ScheduleResult;

/// Pre-computed adjacency for one snapshot.
///
/// Edges are stored by position and only for predecessor ids that resolve;
/// anything else is dropped here and never constrains a task.
pub struct TaskData<'a> {
    tasks: &'a [Task],
    /// Durations as signed time units.
    pub durations: Vec<i64>,
    /// Resolvable predecessors per task, one entry per listed occurrence.
    pub preds: Vec<Vec<TaskPos>>,
    /// Reverse of `preds`, in graph order of the dependent task.
    pub succs: Vec<Vec<TaskPos>>,
}

impl<'a> TaskData<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        let index = TaskIndex::from_tasks(tasks);
        let n = tasks.len();

        let durations = tasks.iter().map(|t| i64::from(t.duration)).collect();
        let mut preds: Vec<Vec<TaskPos>> = vec![Vec::new(); n];
        let mut succs: Vec<Vec<TaskPos>> = vec![Vec::new(); n];

        for (pos, task) in tasks.iter().enumerate() {
            for pred_id in &task.predecessor_ids {
                if let Some(pred) = index.get(pred_id) {
                    preds[pos].push(pred);
                    succs[pred].push(pos);
                }
            }
        }

        Self {
            tasks,
            durations,
            preds,
            succs,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn id(&self, pos: TaskPos) -> &str {
        &self.tasks[pos].id
    }
}

/// Compute the schedule for a graph. See [`compute_schedule`].
pub fn compute(graph: &TaskGraph, config: &ScheduleConfig) -> ScheduleResult {
    compute_schedule(graph.tasks(), config)
}

/// Run the critical path method over a task snapshot.
///
/// 1. Forward pass: earliest start/finish and level of every task
/// 2. Cycle check (strategy per `config.cycle_detection`)
/// 3. Backward pass: latest start/finish, skipped on a cycle
/// 4. Slack and criticality
///
/// Pure and deterministic; never fails. Unresolvable predecessor ids are
/// ignored. A cycle is reported through `has_cycle`, with latest times left
/// unbounded and no critical tasks.
pub fn compute_schedule(tasks: &[Task], config: &ScheduleConfig) -> ScheduleResult {
    if tasks.is_empty() {
        return ScheduleResult::empty();
    }

    let verbosity = config.verbosity;
    let data = TaskData::new(tasks);
    let n = data.len();
    let max_passes = config.max_passes(n);

    let mut earliest_start = vec![0_i64; n];
    let mut earliest_finish = data.durations.clone();
    let mut level = vec![0_u32; n];
    let mut latest_start: Vec<Option<i64>> = vec![None; n];
    let mut latest_finish: Vec<Option<i64>> = vec![None; n];

    let has_cycle = match config.cycle_detection {
        CycleDetection::Topological => match topological_order(&data) {
            Ok(order) => {
                forward_sweep(
                    &data,
                    &order,
                    &mut earliest_start,
                    &mut earliest_finish,
                    &mut level,
                );
                let project_duration = max_finish(&earliest_finish);
                backward_sweep(
                    &data,
                    &order,
                    project_duration,
                    &mut latest_start,
                    &mut latest_finish,
                );
                false
            }
            Err(cycle) => {
                log_passes!(
                    verbosity,
                    "Cycle detected: {} of {} tasks could be ordered",
                    cycle.partial_order.len(),
                    n
                );
                // Times for the orderable part only; nothing is rendered anyway
                forward_sweep(
                    &data,
                    &cycle.partial_order,
                    &mut earliest_start,
                    &mut earliest_finish,
                    &mut level,
                );
                true
            }
        },
        CycleDetection::BoundedRelaxation => {
            let forward = forward_relax(
                &data,
                max_passes,
                verbosity,
                &mut earliest_start,
                &mut earliest_finish,
                &mut level,
            );
            log_passes!(
                verbosity,
                "Forward pass: {} passes (cap {}), converged={}",
                forward.passes,
                max_passes,
                forward.converged
            );
            if forward.converged {
                let backward = backward_relax(
                    &data,
                    max_finish(&earliest_finish),
                    max_passes,
                    verbosity,
                    &mut latest_start,
                    &mut latest_finish,
                );
                log_passes!(
                    verbosity,
                    "Backward pass: {} passes, converged={}",
                    backward.passes,
                    backward.converged
                );
            }
            !forward.converged
        }
    };

    let project_duration = max_finish(&earliest_finish);

    let mut scheduled: Vec<ScheduledTask> = tasks.iter().map(ScheduledTask::seed).collect();
    for (pos, row) in scheduled.iter_mut().enumerate() {
        row.successor_ids = data.succs[pos]
            .iter()
            .map(|&succ| data.id(succ).to_string())
            .collect();
        row.level = level[pos];
        row.earliest_start = earliest_start[pos];
        row.earliest_finish = earliest_finish[pos];
        row.latest_start = latest_start[pos];
        row.latest_finish = latest_finish[pos];
        row.slack = latest_start[pos].map(|ls| ls - earliest_start[pos]);
        row.is_critical = !has_cycle && row.slack == Some(0);
        log_debug!(
            verbosity,
            "  {} es={} ef={} ls={:?} lf={:?} slack={:?}",
            row.id,
            row.earliest_start,
            row.earliest_finish,
            row.latest_start,
            row.latest_finish,
            row.slack
        );
    }

    let critical_task_ids: Vec<String> = scheduled
        .iter()
        .filter(|t| t.is_critical)
        .map(|t| t.id.clone())
        .collect();

    log_passes!(
        verbosity,
        "Schedule: {} tasks, duration {}, {} critical, cycle={}",
        n,
        project_duration,
        critical_task_ids.len(),
        has_cycle
    );

    ScheduleResult {
        tasks: scheduled,
        project_duration,
        has_cycle,
        critical_task_ids,
    }
}

fn max_finish(earliest_finish: &[i64]) -> i64 {
    earliest_finish.iter().copied().max().unwrap_or(0).max(0)
}
