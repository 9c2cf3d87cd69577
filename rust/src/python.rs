//! Python bindings (feature `python`).
//!
//! Thin wrapper classes over the Rust types; all logic stays in the core modules.

use chrono::NaiveDate;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::config::{CycleDetection, ScheduleConfig};
use crate::critical_path::{
    compute_schedule, critical_chains, critical_links, ScheduleResult, DEFAULT_MAX_CHAINS,
};
use crate::editor::PertEditor;
use crate::graph::{GraphError, TaskGraph};
use crate::import::{import_calendar, CalendarTask};
use crate::models::{ScheduledTask, Task};

fn graph_err(e: GraphError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// A task to be scheduled.
#[pyclass(name = "Task")]
#[derive(Clone, Debug)]
pub struct PyTask {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    #[pyo3(get, set)]
    pub duration: u32,
    #[pyo3(get, set)]
    pub predecessor_ids: Vec<String>,
}

#[pymethods]
impl PyTask {
    #[new]
    #[pyo3(signature = (id, name, duration, predecessor_ids=None))]
    fn new(id: String, name: String, duration: u32, predecessor_ids: Option<Vec<String>>) -> Self {
        Self {
            id,
            name,
            duration,
            predecessor_ids: predecessor_ids.unwrap_or_default(),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Task(id={:?}, duration={}, predecessors={:?})",
            self.id, self.duration, self.predecessor_ids
        )
    }
}

impl From<&Task> for PyTask {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            name: task.name.clone(),
            duration: task.duration,
            predecessor_ids: task.predecessor_ids.clone(),
        }
    }
}

impl From<PyTask> for Task {
    fn from(task: PyTask) -> Self {
        Task::new(task.id, task.name, task.duration, task.predecessor_ids)
    }
}

/// A task annotated with computed schedule values. Read-only.
#[pyclass(name = "ScheduledTask")]
#[derive(Clone, Debug)]
pub struct PyScheduledTask {
    #[pyo3(get)]
    pub id: String,
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub duration: u32,
    #[pyo3(get)]
    pub predecessor_ids: Vec<String>,
    #[pyo3(get)]
    pub successor_ids: Vec<String>,
    #[pyo3(get)]
    pub level: u32,
    #[pyo3(get)]
    pub earliest_start: i64,
    #[pyo3(get)]
    pub earliest_finish: i64,
    #[pyo3(get)]
    pub latest_start: Option<i64>,
    #[pyo3(get)]
    pub latest_finish: Option<i64>,
    #[pyo3(get)]
    pub slack: Option<i64>,
    #[pyo3(get)]
    pub is_critical: bool,
}

#[pymethods]
impl PyScheduledTask {
    fn __repr__(&self) -> String {
        format!(
            "ScheduledTask(id={:?}, es={}, ef={}, slack={:?}, critical={})",
            self.id, self.earliest_start, self.earliest_finish, self.slack, self.is_critical
        )
    }
}

impl From<&ScheduledTask> for PyScheduledTask {
    fn from(t: &ScheduledTask) -> Self {
        Self {
            id: t.id.clone(),
            name: t.name.clone(),
            duration: t.duration,
            predecessor_ids: t.predecessor_ids.clone(),
            successor_ids: t.successor_ids.clone(),
            level: t.level,
            earliest_start: t.earliest_start,
            earliest_finish: t.earliest_finish,
            latest_start: t.latest_start,
            latest_finish: t.latest_finish,
            slack: t.slack,
            is_critical: t.is_critical,
        }
    }
}

/// Result of one schedule computation.
#[pyclass(name = "ScheduleResult")]
#[derive(Clone, Debug)]
pub struct PyScheduleResult {
    #[pyo3(get)]
    pub tasks: Vec<PyScheduledTask>,
    #[pyo3(get)]
    pub project_duration: i64,
    #[pyo3(get)]
    pub has_cycle: bool,
    #[pyo3(get)]
    pub critical_task_ids: Vec<String>,
    result: ScheduleResult,
}

#[pymethods]
impl PyScheduleResult {
    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(tasks={}, project_duration={}, has_cycle={}, critical={:?})",
            self.tasks.len(),
            self.project_duration,
            self.has_cycle,
            self.critical_task_ids
        )
    }

    /// Start-to-end critical chains, computed on request and capped.
    #[pyo3(signature = (max_chains=DEFAULT_MAX_CHAINS))]
    fn critical_chains(&self, max_chains: usize) -> Vec<Vec<String>> {
        critical_chains(&self.result, max_chains)
    }

    /// Critical links as `(predecessor_id, successor_id)` pairs.
    fn critical_links(&self) -> Vec<(String, String)> {
        critical_links(&self.result)
    }
}

impl From<&ScheduleResult> for PyScheduleResult {
    fn from(result: &ScheduleResult) -> Self {
        Self {
            tasks: result.tasks.iter().map(PyScheduledTask::from).collect(),
            project_duration: result.project_duration,
            has_cycle: result.has_cycle,
            critical_task_ids: result.critical_task_ids.clone(),
            result: result.clone(),
        }
    }
}

/// Engine and editor configuration.
#[pyclass(name = "ScheduleConfig")]
#[derive(Clone, Debug)]
pub struct PyScheduleConfig {
    #[pyo3(get, set)]
    pub iteration_margin: usize,
    #[pyo3(get, set)]
    pub min_update_duration: u32,
    #[pyo3(get, set)]
    pub min_add_duration: u32,
    /// "topological" or "bounded_relaxation"
    #[pyo3(get, set)]
    pub cycle_detection: String,
    #[pyo3(get, set)]
    pub verbosity: u8,
}

#[pymethods]
impl PyScheduleConfig {
    #[new]
    #[pyo3(signature = (
        iteration_margin=None,
        min_update_duration=None,
        min_add_duration=None,
        cycle_detection=None,
        verbosity=None
    ))]
    fn new(
        iteration_margin: Option<usize>,
        min_update_duration: Option<u32>,
        min_add_duration: Option<u32>,
        cycle_detection: Option<String>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = ScheduleConfig::default();
        Self {
            iteration_margin: iteration_margin.unwrap_or(defaults.iteration_margin),
            min_update_duration: min_update_duration.unwrap_or(defaults.min_update_duration),
            min_add_duration: min_add_duration.unwrap_or(defaults.min_add_duration),
            cycle_detection: cycle_detection
                .unwrap_or_else(|| defaults.cycle_detection.name().to_string()),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleConfig(cycle_detection={:?}, iteration_margin={}, verbosity={})",
            self.cycle_detection, self.iteration_margin, self.verbosity
        )
    }
}

impl PyScheduleConfig {
    fn to_config(&self) -> PyResult<ScheduleConfig> {
        let cycle_detection = CycleDetection::from_name(&self.cycle_detection).ok_or_else(|| {
            PyValueError::new_err(format!(
                "Unknown cycle detection strategy: {}",
                self.cycle_detection
            ))
        })?;
        Ok(ScheduleConfig {
            iteration_margin: self.iteration_margin,
            min_update_duration: self.min_update_duration,
            min_add_duration: self.min_add_duration,
            cycle_detection,
            verbosity: self.verbosity,
        })
    }
}

fn resolve_config(config: Option<&PyScheduleConfig>) -> PyResult<ScheduleConfig> {
    config.map_or_else(|| Ok(ScheduleConfig::default()), |c| c.to_config())
}

/// Editor holding a task graph and its current schedule.
#[pyclass(name = "PertEditor")]
pub struct PyPertEditor {
    inner: PertEditor,
}

#[pymethods]
impl PyPertEditor {
    #[new]
    #[pyo3(signature = (tasks=None, config=None, sample=false))]
    fn new(
        tasks: Option<Vec<PyTask>>,
        config: Option<PyScheduleConfig>,
        sample: bool,
    ) -> PyResult<Self> {
        let config = resolve_config(config.as_ref())?;
        let inner = match tasks {
            Some(tasks) => {
                let graph = TaskGraph::try_from_tasks(tasks.into_iter().map(Task::from).collect())
                    .map_err(graph_err)?;
                PertEditor::with_graph(graph, config)
            }
            None if sample => PertEditor::sample(config),
            None => PertEditor::new(config),
        };
        Ok(Self { inner })
    }

    /// Add a task; `duration` may be any value, it is read through `str()`.
    #[pyo3(signature = (id, name, duration, predecessors=""))]
    fn add_task(
        &mut self,
        id: &str,
        name: &str,
        duration: &Bound<'_, PyAny>,
        predecessors: &str,
    ) -> PyResult<PyScheduleResult> {
        let duration = duration.str()?.to_string();
        self.inner
            .add_task(id, name, &duration, predecessors)
            .map(PyScheduleResult::from)
            .map_err(graph_err)
    }

    fn update_task(
        &mut self,
        id: &str,
        field: &str,
        value: &Bound<'_, PyAny>,
    ) -> PyResult<PyScheduleResult> {
        let value = value.str()?.to_string();
        self.inner
            .update_task_field(id, field, &value)
            .map(PyScheduleResult::from)
            .map_err(graph_err)
    }

    fn remove_task(&mut self, id: &str) -> PyResult<PyTask> {
        self.inner
            .remove_task(id)
            .map(|t| PyTask::from(&t))
            .map_err(graph_err)
    }

    #[getter]
    fn tasks(&self) -> Vec<PyTask> {
        self.inner.graph().iter().map(PyTask::from).collect()
    }

    #[getter]
    fn schedule(&self) -> PyScheduleResult {
        PyScheduleResult::from(self.inner.schedule())
    }

    fn __repr__(&self) -> String {
        format!(
            "PertEditor(tasks={}, project_duration={})",
            self.inner.graph().len(),
            self.inner.schedule().project_duration
        )
    }
}

/// Compute the schedule for a list of tasks.
#[pyfunction(name = "compute_schedule")]
#[pyo3(signature = (tasks, config=None))]
fn py_compute_schedule(
    tasks: Vec<PyTask>,
    config: Option<PyScheduleConfig>,
) -> PyResult<PyScheduleResult> {
    let config = resolve_config(config.as_ref())?;
    let tasks: Vec<Task> = tasks.into_iter().map(Task::from).collect();
    Ok(PyScheduleResult::from(&compute_schedule(&tasks, &config)))
}

/// Convert `(name, start, end)` calendar entries into a chained task list.
#[pyfunction(name = "import_calendar")]
fn py_import_calendar(entries: Vec<(String, NaiveDate, NaiveDate)>) -> Vec<PyTask> {
    let calendar: Vec<CalendarTask> = entries
        .into_iter()
        .map(|(name, start, end)| CalendarTask::new(name, start, end))
        .collect();
    import_calendar(&calendar).iter().map(PyTask::from).collect()
}

/// The pert.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTask>()?;
    m.add_class::<PyScheduledTask>()?;
    m.add_class::<PyScheduleResult>()?;
    m.add_class::<PyScheduleConfig>()?;
    m.add_class::<PyPertEditor>()?;

    m.add_function(wrap_pyfunction!(py_compute_schedule, m)?)?;
    m.add_function(wrap_pyfunction!(py_import_calendar, m)?)?;

    Ok(())
}
