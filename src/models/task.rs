//! Task model.
//!
//! A task is a sequence of processing periods separated by input phases.
//! The immutable part (`id`, `priority`, `periods`) comes from the workload
//! configuration; the cursor fields advance as the tick engine gives the
//! task turns.

use serde::{Deserialize, Serialize};

/// Stable task identity. Doubles as the task's timeline row.
pub type TaskId = usize;

/// Number of priority levels (and buckets).
pub const PRIORITY_LEVELS: usize = 128;

/// Highest valid priority.
pub const MAX_PRIORITY: u8 = (PRIORITY_LEVELS - 1) as u8;

/// A unit of work serviced by the simulated processor.
///
/// # Phases
/// At any observation point a task is either processing (`residual > 0`),
/// waiting for input (`residual == 0`, more periods left), or terminal
/// (`residual == 0` on the last period). Terminal tasks are destroyed before
/// their next turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable identity in `[0, N)`.
    pub id: TaskId,
    /// Scheduling priority (higher = served first), `0..=127`.
    pub priority: u8,
    /// Processing amounts, one per period. Validated input never has an
    /// empty list; a task without periods starts terminal.
    pub periods: Vec<u32>,
    /// Index of the current period.
    pub period_cursor: usize,
    /// Units left in the current period.
    pub residual: u32,
    /// Input units still owed before the next period may start.
    pub pending_input: u32,
    /// Already given a turn in the current tick pass.
    #[serde(skip)]
    pub touched_this_tick: bool,
    /// Received at least one processing unit in the current turn.
    #[serde(skip)]
    pub became_active: bool,
}

impl Task {
    /// Creates a task positioned at the start of its first period.
    pub fn new(id: TaskId, priority: u8, periods: Vec<u32>) -> Self {
        let residual = periods.first().copied().unwrap_or(0);
        Self {
            id,
            priority,
            periods,
            period_cursor: 0,
            residual,
            pending_input: 0,
            touched_this_tick: false,
            became_active: false,
        }
    }

    /// Priority clamped into the bucket range.
    #[inline]
    pub fn bucket(&self) -> usize {
        usize::from(self.priority.min(MAX_PRIORITY))
    }

    /// Whether the current period is the last one.
    #[inline]
    pub fn on_last_period(&self) -> bool {
        self.period_cursor + 1 >= self.periods.len()
    }

    /// Whether the task has finished all of its work.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.on_last_period() && self.residual == 0
    }

    /// Moves to the next period and reloads `residual` from it.
    pub fn advance_period(&mut self) {
        debug_assert!(!self.on_last_period(), "advancing past the last period");
        self.period_cursor += 1;
        self.residual = self.periods[self.period_cursor];
    }

    /// Total processing need across all periods.
    pub fn total_work(&self) -> u64 {
        self.periods.iter().map(|&p| u64::from(p)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_starts_on_first_period() {
        let task = Task::new(2, 7, vec![4, 1, 3]);
        assert_eq!(task.id, 2);
        assert_eq!(task.period_cursor, 0);
        assert_eq!(task.residual, 4);
        assert_eq!(task.pending_input, 0);
        assert!(!task.is_terminal());
        assert_eq!(task.total_work(), 8);
    }

    #[test]
    fn test_advance_period() {
        let mut task = Task::new(0, 0, vec![2, 5]);
        task.residual = 0;
        assert!(!task.is_terminal());
        task.advance_period();
        assert_eq!(task.period_cursor, 1);
        assert_eq!(task.residual, 5);
        assert!(task.on_last_period());
        task.residual = 0;
        assert!(task.is_terminal());
    }

    #[test]
    fn test_task_without_work_starts_terminal() {
        assert!(Task::new(0, 0, vec![]).is_terminal());
        assert!(Task::new(0, 0, vec![0]).is_terminal());
        assert!(!Task::new(0, 0, vec![0, 2]).is_terminal());
    }

    #[test]
    fn test_bucket_clamped() {
        let task = Task::new(0, 200, vec![1]);
        assert_eq!(task.bucket(), PRIORITY_LEVELS - 1);
        assert_eq!(Task::new(0, 5, vec![1]).bucket(), 5);
    }

    #[test]
    fn test_transient_flags_not_serialized() {
        let mut task = Task::new(1, 3, vec![2]);
        task.touched_this_tick = true;
        task.became_active = true;
        let json = serde_json::to_string(&task).unwrap();
        assert!(!json.contains("touched_this_tick"));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert!(!back.touched_this_tick);
        assert!(!back.became_active);
        assert_eq!(back.periods, vec![2]);
    }
}
