//! Configuration types for the PERT engine and editor.

/// How the engine decides a graph contains a circular dependency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CycleDetection {
    /// Kahn's algorithm over resolvable edges; passes then run in topological order.
    #[default]
    Topological,
    /// Repeated relaxation passes until a fixed point, flagging a cycle when
    /// `task_count + iteration_margin` passes are exceeded.
    BoundedRelaxation,
}

impl CycleDetection {
    /// Parse a strategy name ("topological" / "kahn" or "relaxation" / "bounded_relaxation").
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "topological" | "kahn" => Some(Self::Topological),
            "relaxation" | "bounded_relaxation" => Some(Self::BoundedRelaxation),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Topological => "topological",
            Self::BoundedRelaxation => "bounded_relaxation",
        }
    }
}

/// Configuration for schedule computation and graph edits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// Extra relaxation passes allowed beyond the task count.
    pub iteration_margin: usize,
    /// Floor applied when a duration is changed through `update_task`.
    pub min_update_duration: u32,
    /// Floor applied to the duration given to `add_task`.
    pub min_add_duration: u32,
    /// Cycle detection strategy.
    pub cycle_detection: CycleDetection,
    /// Verbosity level: 0=silent, 1=edits, 2=passes, 3=debug.
    pub verbosity: u8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            iteration_margin: 5,
            min_update_duration: 1,
            min_add_duration: 0,
            cycle_detection: CycleDetection::Topological,
            verbosity: 0,
        }
    }
}

impl ScheduleConfig {
    /// Maximum number of passes a relaxation loop may run for `task_count` tasks.
    pub fn max_passes(&self, task_count: usize) -> usize {
        task_count + self.iteration_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ScheduleConfig::default();
        assert_eq!(config.iteration_margin, 5);
        assert_eq!(config.min_update_duration, 1);
        assert_eq!(config.min_add_duration, 0);
        assert_eq!(config.cycle_detection, CycleDetection::Topological);
        assert_eq!(config.max_passes(10), 15);
    }

    #[test]
    fn test_cycle_detection_names() {
        assert_eq!(
            CycleDetection::from_name("Kahn"),
            Some(CycleDetection::Topological)
        );
        assert_eq!(
            CycleDetection::from_name(" relaxation "),
            Some(CycleDetection::BoundedRelaxation)
        );
        assert_eq!(CycleDetection::from_name("dfs"), None);
        assert_eq!(
            CycleDetection::from_name(CycleDetection::BoundedRelaxation.name()),
            Some(CycleDetection::BoundedRelaxation)
        );
    }
}
