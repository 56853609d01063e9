//! Tick-driven simulation of the two scheduling policies.
//!
//! # Policies
//!
//! | Policy | Container | Selection | Stall rotation |
//! |--------|-----------|-----------|----------------|
//! | Priority | `PriorityBuckets` | highest untouched bucket head | last served bucket |
//! | FIFO | `FifoQueue` (flattened buckets) | queue head | whole queue |
//!
//! Both share the per-turn state machine in `turn` and the tick loop in
//! `runner`; only selection differs.
//!
//! # Modes
//!
//! - `Simulator::run`: one policy, full timeline.
//! - `Simulator::compare`: priority then FIFO on the same workload.
//! - `Simulator::sweep`: priority policy over a tick length x input time grid.

mod driver;
mod report;
mod runner;
#[cfg(test)]
mod scenarios;
mod sweep;
mod turn;

pub use driver::{simulate, Comparison, Simulator, Workload};
pub use report::{Policy, RunReport, RunSummary};
pub use runner::run_queue;
pub use sweep::{SweepConfig, SweepPoint, SweepReport};
pub use turn::{take_turn, TickBudget, TurnOutcome};
