//! Build a task graph from a calendar (date range) task list.
//!
//! A one-way heuristic: each date range becomes a whole-day duration and the
//! tasks are chained in list order. Nothing maps a graph back to dates.

use chrono::NaiveDate;
use thiserror::Error;

use crate::graph::TaskGraph;
use crate::models::Task;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    #[error("Invalid {field} date for \"{task}\": {value}")]
    InvalidDate {
        task: String,
        field: &'static str,
        value: String,
    },
}

/// A task as kept by the calendar view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarTask {
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CalendarTask {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Parse ISO `YYYY-MM-DD` start and end dates.
    pub fn parse(name: &str, start: &str, end: &str) -> Result<Self, ImportError> {
        let parse = |field: &'static str, value: &str| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
                ImportError::InvalidDate {
                    task: name.to_string(),
                    field,
                    value: value.to_string(),
                }
            })
        };
        Ok(Self::new(name, parse("start", start)?, parse("end", end)?))
    }

    /// Inclusive length of the range in days, at least 1.
    pub fn duration_days(&self) -> u32 {
        let days = (self.end - self.start).num_days().unsigned_abs() + 1;
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}

/// Spreadsheet-style id for the `n`th task: A..Z, AA..AZ, BA, ...
pub fn sequence_id(n: usize) -> String {
    let mut n = n + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Convert calendar tasks into a linear chain: task `n` depends on task `n-1`.
pub fn import_calendar(tasks: &[CalendarTask]) -> TaskGraph {
    let imported = tasks
        .iter()
        .enumerate()
        .map(|(n, task)| {
            let predecessors = if n == 0 {
                Vec::new()
            } else {
                vec![sequence_id(n - 1)]
            };
            Task::new(
                sequence_id(n),
                task.name.clone(),
                task.duration_days(),
                predecessors,
            )
        })
        .collect();
    TaskGraph::from_tasks(imported)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_duration_days() {
        let task = CalendarTask::new("Analysis", date(2025, 11, 20), date(2025, 11, 23));
        assert_eq!(task.duration_days(), 4);

        let same_day = CalendarTask::new("Kickoff", date(2025, 1, 1), date(2025, 1, 1));
        assert_eq!(same_day.duration_days(), 1);

        // Reversed ranges count the same span
        let reversed = CalendarTask::new("Oops", date(2025, 1, 10), date(2025, 1, 8));
        assert_eq!(reversed.duration_days(), 3);
    }

    #[test]
    fn test_parse_dates() {
        let task = CalendarTask::parse("Design", "2025-03-01", " 2025-03-05").unwrap();
        assert_eq!(task.start, date(2025, 3, 1));
        assert_eq!(task.duration_days(), 5);

        let err = CalendarTask::parse("Design", "2025-13-01", "2025-03-05").unwrap_err();
        assert_eq!(
            err,
            ImportError::InvalidDate {
                task: "Design".to_string(),
                field: "start",
                value: "2025-13-01".to_string(),
            }
        );
    }

    #[test]
    fn test_sequence_id() {
        assert_eq!(sequence_id(0), "A");
        assert_eq!(sequence_id(25), "Z");
        assert_eq!(sequence_id(26), "AA");
        assert_eq!(sequence_id(27), "AB");
        assert_eq!(sequence_id(51), "AZ");
        assert_eq!(sequence_id(52), "BA");
        assert_eq!(sequence_id(701), "ZZ");
        assert_eq!(sequence_id(702), "AAA");
    }

    #[test]
    fn test_import_builds_linear_chain() {
        let graph = import_calendar(&[
            CalendarTask::new("Analysis", date(2025, 11, 20), date(2025, 11, 23)),
            CalendarTask::new("Build", date(2025, 11, 24), date(2025, 11, 25)),
            CalendarTask::new("Ship", date(2025, 11, 26), date(2025, 11, 26)),
        ]);

        let tasks = graph.tasks();
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].id, "A");
        assert!(tasks[0].predecessor_ids.is_empty());
        assert_eq!(tasks[1].predecessor_ids, vec!["A"]);
        assert_eq!(tasks[2].predecessor_ids, vec!["B"]);
        assert_eq!(
            tasks.iter().map(|t| t.duration).collect::<Vec<_>>(),
            vec![4, 2, 1]
        );
        assert!(graph.dangling_references().is_empty());
    }

    #[test]
    fn test_import_empty() {
        assert!(import_calendar(&[]).is_empty());
    }
}
