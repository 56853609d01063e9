//! Simulation driver: canonical workload, snapshots, and runs.
//!
//! # Restore protocol
//!
//! A run drains its queue destructively, so it never touches the canonical
//! workload. [`simulate`] takes a snapshot by value, copies it before
//! draining, and hands the untouched copy back as the next canonical
//! workload. [`Simulator`] wires the two together.

use log::info;

use super::runner::run_queue;
use super::{Policy, RunReport};
use crate::error::SimResult;
use crate::models::{SimParams, TaskArena, TaskSpec, WorkloadConfig};
use crate::queue::{FifoQueue, PriorityBuckets};

/// Tasks plus their priority buckets: the unit that gets snapshotted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workload {
    arena: TaskArena,
    buckets: PriorityBuckets,
}

impl Workload {
    /// Creates an empty workload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a workload; task ids follow the order of `specs`.
    pub fn from_specs(specs: &[TaskSpec]) -> Self {
        let mut workload = Self::new();
        for spec in specs {
            workload.add_task(spec.priority, spec.periods.clone());
        }
        workload
    }

    /// Adds a task and queues it in its bucket.
    pub fn add_task(&mut self, priority: u8, periods: Vec<u32>) {
        let id = self.arena.insert(priority, periods);
        if let Some(task) = self.arena.get(id) {
            self.buckets.push(task);
        }
    }

    /// Deep copy for a destructive run.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Task storage.
    pub fn arena(&self) -> &TaskArena {
        &self.arena
    }

    /// Priority buckets.
    pub fn buckets(&self) -> &PriorityBuckets {
        &self.buckets
    }

    /// Number of tasks.
    pub fn task_count(&self) -> usize {
        self.arena.live_count()
    }

    /// Whether there are no tasks.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total processing need.
    pub fn total_work(&self) -> u64 {
        self.arena.total_work()
    }
}

/// Runs `policy` over `snapshot`.
///
/// Returns the report and a pre-run copy of the snapshot to install as the
/// new canonical workload.
pub fn simulate(
    snapshot: Workload,
    policy: Policy,
    params: &SimParams,
) -> SimResult<(RunReport, Workload)> {
    let next_canonical = snapshot.clone();
    let Workload { arena, buckets } = snapshot;

    info!(
        "{policy} run: {} task(s), input_time={}, tick_length={}",
        arena.live_count(),
        params.input_time,
        params.tick_length
    );

    let report = match policy {
        Policy::Priority => run_queue(policy, arena, buckets, params)?,
        Policy::Fifo => {
            let fifo = FifoQueue::from_buckets(&buckets);
            run_queue(policy, arena, fifo, params)?
        }
    };

    info!(
        "{policy} run done: {} tick(s), downtime {}, utilization {:.4}",
        report.tick_count,
        report.total_downtime(),
        report.utilization()
    );
    Ok((report, next_canonical))
}

/// Reports of a priority run and a FIFO run over the same workload.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Priority policy.
    pub priority: RunReport,
    /// FIFO policy.
    pub fifo: RunReport,
}

/// Owner of the canonical workload.
///
/// # Example
///
/// ```
/// use u_tick::models::{SimParams, TaskSpec};
/// use u_tick::scheduler::{Policy, Simulator};
///
/// let mut sim = Simulator::from_specs(&[TaskSpec::new(5, vec![3])]);
/// let report = sim.run(Policy::Priority, &SimParams::new(0, 3)).unwrap();
/// assert_eq!(report.tick_count, 1);
/// assert!((report.utilization() - 1.0).abs() < 1e-10);
///
/// // The canonical workload is intact for the next run.
/// assert_eq!(sim.workload().task_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    workload: Workload,
}

impl Simulator {
    /// Creates a simulator around a canonical workload.
    pub fn new(workload: Workload) -> Self {
        Self { workload }
    }

    /// Creates a simulator from task specs.
    pub fn from_specs(specs: &[TaskSpec]) -> Self {
        Self::new(Workload::from_specs(specs))
    }

    /// Creates a simulator from a configuration (its params are not stored).
    pub fn from_config(config: &WorkloadConfig) -> Self {
        Self::from_specs(&config.tasks)
    }

    /// Canonical workload.
    pub fn workload(&self) -> &Workload {
        &self.workload
    }

    /// Replaces the canonical workload.
    pub fn set_workload(&mut self, workload: Workload) {
        self.workload = workload;
    }

    /// Drops every task.
    pub fn reset(&mut self) {
        self.workload = Workload::new();
    }

    /// Runs one policy on a snapshot and installs the restored copy.
    pub fn run(&mut self, policy: Policy, params: &SimParams) -> SimResult<RunReport> {
        let (report, next) = simulate(self.workload.snapshot(), policy, params)?;
        self.workload = next;
        Ok(report)
    }

    /// Runs the priority policy, then FIFO, on the same workload.
    pub fn compare(&mut self, params: &SimParams) -> SimResult<Comparison> {
        let priority = self.run(Policy::Priority, params)?;
        let fifo = self.run(Policy::Fifo, params)?;
        Ok(Comparison { priority, fifo })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::CellState;

    #[test]
    fn test_from_specs_assigns_rows_in_order() {
        let workload = Workload::from_specs(&[TaskSpec::new(1, vec![2]), TaskSpec::new(4, vec![1])]);
        assert_eq!(workload.task_count(), 2);
        assert_eq!(workload.arena().get(1).unwrap().priority, 4);
        assert_eq!(workload.buckets().bucket(4).unwrap().peek(), Some(1));
        assert_eq!(workload.total_work(), 3);
    }

    #[test]
    fn test_simulate_returns_pristine_copy() {
        let workload = Workload::from_specs(&[TaskSpec::new(0, vec![2, 3])]);
        let (report, next) = simulate(workload.snapshot(), Policy::Priority, &SimParams::new(1, 2)).unwrap();
        assert!(report.tick_count > 0);
        assert_eq!(next, workload);
    }

    #[test]
    fn test_run_keeps_canonical_workload() {
        let specs = [TaskSpec::new(2, vec![3, 1]), TaskSpec::new(2, vec![2])];
        let mut sim = Simulator::from_specs(&specs);
        let before = sim.workload().clone();

        let first = sim.run(Policy::Priority, &SimParams::new(1, 2)).unwrap();
        assert_eq!(sim.workload(), &before);
        let second = sim.run(Policy::Priority, &SimParams::new(1, 2)).unwrap();

        assert_eq!(first.tick_count, second.tick_count);
        assert_eq!(first.downtime, second.downtime);
        assert_eq!(first.timeline, second.timeline);
    }

    #[test]
    fn test_compare_runs_both_policies() {
        let mut sim = Simulator::from_config(&WorkloadConfig::default_dataset());
        let cmp = sim.compare(&SimParams::default()).unwrap();
        assert_eq!(cmp.priority.policy, Policy::Priority);
        assert_eq!(cmp.fifo.policy, Policy::Fifo);
        assert_eq!(cmp.priority.total_work, cmp.fifo.total_work);
        assert_eq!(sim.workload().task_count(), 6);
    }

    #[test]
    fn test_empty_workload_is_degenerate_not_fatal() {
        let mut sim = Simulator::default();
        let report = sim.run(Policy::Fifo, &SimParams::default()).unwrap();
        assert_eq!(report.tick_count, 0);
        assert_eq!(report.total_downtime(), 0);
        assert!((report.utilization() - 0.0).abs() < 1e-10);
        assert!(report.render().to_string().contains("Total ticks: 0"));
    }

    #[test]
    fn test_reset() {
        let mut sim = Simulator::from_specs(&[TaskSpec::new(0, vec![1])]);
        sim.reset();
        assert!(sim.workload().is_empty());
    }

    #[test]
    fn test_fifo_run_uses_flatten_order() {
        let mut sim = Simulator::from_specs(&[TaskSpec::new(0, vec![1]), TaskSpec::new(7, vec![1])]);
        let report = sim.run(Policy::Fifo, &SimParams::new(0, 1)).unwrap();
        assert_eq!(report.timeline.get(0, 1, 0), Some(CellState::Processing));
        assert_eq!(report.timeline.get(1, 0, 0), Some(CellState::Processing));
    }
}
