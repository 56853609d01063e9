//! Run metrics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Ticks | Number of ticks until every task finished |
//! | Downtime (per tick) | `tick_length` minus processing units consumed |
//! | Total downtime | Sum of per-tick downtime |
//! | Utilization | Total processing need / (ticks x tick_length) |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::timeline::{TimelineRender, TimelineTable};

/// Which selection policy produced a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    /// Highest priority first, round-robin within a level.
    Priority,
    /// Single FIFO round-robin queue.
    Fifo,
}

impl Policy {
    /// Lowercase policy name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Fifo => "fifo",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one complete run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Policy used.
    pub policy: Policy,
    /// Ticks simulated.
    pub tick_count: usize,
    /// Units per tick.
    pub tick_length: u32,
    /// Unused budget, one entry per tick.
    pub downtime: Vec<u32>,
    /// Total processing need of the workload.
    pub total_work: u64,
    /// Execution timeline.
    pub timeline: TimelineTable,
}

impl RunReport {
    /// Sum of per-tick downtime.
    pub fn total_downtime(&self) -> u64 {
        self.downtime.iter().map(|&d| u64::from(d)).sum()
    }

    /// Elapsed time units.
    pub fn total_units(&self) -> u64 {
        self.tick_count as u64 * u64::from(self.tick_length)
    }

    /// Processing need over elapsed units; `0.0` for an empty run.
    pub fn utilization(&self) -> f64 {
        let units = self.total_units();
        if units == 0 {
            0.0
        } else {
            self.total_work as f64 / units as f64
        }
    }

    /// Printable timeline with summary.
    pub fn render(&self) -> TimelineRender<'_> {
        TimelineRender {
            policy: self.policy.name(),
            table: &self.timeline,
            tick_count: self.tick_count,
            downtime: &self.downtime,
            utilization: self.utilization(),
        }
    }

    /// Short form used by the sweep: utilization percent and total downtime.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            tick_length: self.tick_length,
            tick_count: self.tick_count,
            utilization: self.utilization(),
            total_downtime: self.total_downtime(),
        }
    }
}

/// Timeline-free digest of a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Units per tick.
    pub tick_length: u32,
    /// Ticks simulated.
    pub tick_count: usize,
    /// Processing need over elapsed units.
    pub utilization: f64,
    /// Sum of per-tick downtime.
    pub total_downtime: u64,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4.0}%|{:>3}",
            self.utilization * 100.0,
            self.total_downtime
        )
    }
}
