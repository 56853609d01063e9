//! Simulation error taxonomy.
//!
//! Configuration anomalies (an empty workload, zero tasks) are not errors:
//! the policy loops simply run zero ticks. Three conditions abort a run:
//! tasks are queued but the tick has no units to spend, the timeline table
//! cannot grow, or the engine selects a task id that has no live task behind
//! it.

use std::collections::TryReserveError;
use std::fmt;

use crate::models::TaskId;

/// Error aborting a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Tasks are queued but `tick_length` is zero, so none can ever progress.
    ZeroTickLength {
        /// Tasks that were waiting.
        queued: usize,
    },
    /// The timeline table could not reserve room for more ticks.
    TimelineAllocation {
        /// Tick capacity that was requested.
        requested_ticks: usize,
        /// Allocator message.
        reason: String,
    },
    /// A queue yielded a task id whose arena slot is empty.
    MissingTask {
        /// Offending task id.
        id: TaskId,
    },
}

impl SimError {
    pub(crate) fn allocation(requested_ticks: usize, err: TryReserveError) -> Self {
        Self::TimelineAllocation {
            requested_ticks,
            reason: err.to_string(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroTickLength { queued } => {
                write!(f, "tick_length is 0 with {queued} task(s) queued")
            }
            Self::TimelineAllocation {
                requested_ticks,
                reason,
            } => write!(
                f,
                "failed to grow timeline to {requested_ticks} ticks: {reason}"
            ),
            Self::MissingTask { id } => {
                write!(f, "task {id} was scheduled but is no longer alive")
            }
        }
    }
}

impl std::error::Error for SimError {}

/// Result alias for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
