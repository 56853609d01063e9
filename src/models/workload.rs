//! Workload configuration.
//!
//! The configuration is what a user (or a file) supplies: an ordered list of
//! task specs plus the two global parameters. It is turned into a
//! [`Workload`](crate::scheduler::Workload) before simulating.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::MAX_PRIORITY;

/// Longest processing period accepted by validation.
pub const MAX_PERIOD_UNITS: u32 = 20;

/// Per-run simulation parameters.
///
/// Passed explicitly into every run; nothing is kept in global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimParams {
    /// Input units owed between two processing periods.
    pub input_time: u32,
    /// Processing units per tick (the tick's shared budget).
    pub tick_length: u32,
}

impl SimParams {
    /// Creates parameters.
    pub fn new(input_time: u32, tick_length: u32) -> Self {
        Self {
            input_time,
            tick_length,
        }
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            input_time: 5,
            tick_length: 3,
        }
    }
}

/// One task as configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    /// Priority, `0..=127`.
    pub priority: u8,
    /// Processing periods, each `1..=20`.
    pub periods: Vec<u32>,
}

impl TaskSpec {
    /// Creates a task spec.
    pub fn new(priority: u8, periods: Vec<u32>) -> Self {
        Self { priority, periods }
    }
}

/// A complete workload configuration.
///
/// # Example
///
/// ```
/// use u_tick::models::{TaskSpec, WorkloadConfig};
///
/// let json = r#"{"input_time":1,"tick_length":2,"tasks":[{"priority":4,"periods":[3,1]}]}"#;
/// let config = WorkloadConfig::from_json(json).unwrap();
/// assert_eq!(config.tasks, vec![TaskSpec::new(4, vec![3, 1])]);
/// assert_eq!(config.params.tick_length, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Global parameters.
    #[serde(flatten)]
    pub params: SimParams,
    /// Tasks in entry order; position = task id.
    pub tasks: Vec<TaskSpec>,
}

impl WorkloadConfig {
    /// Creates a configuration.
    pub fn new(params: SimParams, tasks: Vec<TaskSpec>) -> Self {
        Self { params, tasks }
    }

    /// Built-in dataset: six tasks over three priority levels.
    pub fn default_dataset() -> Self {
        let tasks = vec![
            TaskSpec::new(3, vec![6, 4, 3, 4, 6, 8, 5, 9, 7]),
            TaskSpec::new(2, vec![3, 2, 1, 6, 8, 9, 7, 4, 3, 1]),
            TaskSpec::new(2, vec![2, 1, 2, 3, 1, 6, 1, 8, 9, 7]),
            TaskSpec::new(2, vec![5, 3, 5, 6, 6, 7, 8, 2, 1, 8]),
            TaskSpec::new(1, vec![5, 4, 3, 2, 1, 8, 7, 6, 3, 2, 1]),
            TaskSpec::new(1, vec![5, 9, 3, 1, 2, 9, 7, 6, 4, 2, 1]),
        ];
        Self::new(SimParams::default(), tasks)
    }

    /// Generates `task_count` tasks with random priorities and periods.
    ///
    /// Priorities are drawn from `0..=max_priority`, period counts from
    /// `1..=10`, period lengths from `1..=MAX_PERIOD_UNITS`.
    pub fn random<R: Rng>(
        params: SimParams,
        task_count: usize,
        max_priority: u8,
        rng: &mut R,
    ) -> Self {
        let max_priority = max_priority.min(MAX_PRIORITY);
        let tasks = (0..task_count)
            .map(|_| {
                let count = rng.random_range(1..=10);
                let periods = (0..count)
                    .map(|_| rng.random_range(1..=MAX_PERIOD_UNITS))
                    .collect();
                TaskSpec::new(rng.random_range(0..=max_priority), periods)
            })
            .collect();
        Self::new(params, tasks)
    }

    /// Parses a JSON configuration.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Total processing need of all tasks.
    pub fn total_work(&self) -> u64 {
        self.tasks
            .iter()
            .flat_map(|t| t.periods.iter())
            .map(|&p| u64::from(p))
            .sum()
    }
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self::default_dataset()
    }
}
