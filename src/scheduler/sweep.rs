//! Parameter sweep over tick length and input time.
//!
//! Every grid point runs the priority policy on a fresh snapshot of the
//! canonical workload with timeline output suppressed, keeping only the
//! utilization and downtime.

use std::fmt;
use std::ops::RangeInclusive;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{Policy, RunSummary, Simulator};
use crate::error::SimResult;
use crate::models::SimParams;

/// Grid bounds for a sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Tick lengths to try (rows).
    pub tick_lengths: RangeInclusive<u32>,
    /// Input times to try (columns).
    pub input_times: RangeInclusive<u32>,
}

impl SweepConfig {
    /// Creates a sweep grid.
    pub fn new(tick_lengths: RangeInclusive<u32>, input_times: RangeInclusive<u32>) -> Self {
        Self {
            tick_lengths,
            input_times,
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self::new(1..=10, 0..=9)
    }
}

/// One grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Parameters used.
    pub params: SimParams,
    /// Outcome.
    pub summary: RunSummary,
}

/// Result of a sweep, row-major by tick length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Grid bounds.
    pub config: SweepConfig,
    /// Points, `input_times` varying fastest.
    pub points: Vec<SweepPoint>,
}

impl SweepReport {
    /// Point for a parameter pair.
    pub fn get(&self, tick_length: u32, input_time: u32) -> Option<&SweepPoint> {
        self.points
            .iter()
            .find(|p| p.params.tick_length == tick_length && p.params.input_time == input_time)
    }
}

impl fmt::Display for SweepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("tick\\input")?;
        for input in self.config.input_times.clone() {
            write!(f, "|{input:>9}")?;
        }
        writeln!(f)?;

        for tick_length in self.config.tick_lengths.clone() {
            write!(f, "{tick_length:>10}")?;
            for point in self
                .points
                .iter()
                .filter(|p| p.params.tick_length == tick_length)
            {
                write!(f, "|{}", point.summary)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Simulator {
    /// Runs the priority policy at every grid point.
    ///
    /// Each point starts from the canonical workload; the canonical workload
    /// is restored from the last pre-run copy when the sweep ends.
    pub fn sweep(&mut self, config: &SweepConfig) -> SimResult<SweepReport> {
        let mut points = Vec::new();
        for tick_length in config.tick_lengths.clone() {
            for input_time in config.input_times.clone() {
                let params = SimParams::new(input_time, tick_length);
                let summary = self.run(Policy::Priority, &params)?.summary();
                debug!(
                    "sweep tick_length={tick_length} input_time={input_time}: {:.4}",
                    summary.utilization
                );
                points.push(SweepPoint { params, summary });
            }
        }
        Ok(SweepReport {
            config: config.clone(),
            points,
        })
    }
}
