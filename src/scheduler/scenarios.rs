//! End-to-end behaviour of both policies.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use super::{Policy, RunReport, Simulator};
use crate::models::{SimParams, TaskSpec, WorkloadConfig};
use crate::timeline::CellState;

fn run(specs: &[TaskSpec], policy: Policy, input_time: u32, tick_length: u32) -> RunReport {
    Simulator::from_specs(specs)
        .run(policy, &SimParams::new(input_time, tick_length))
        .unwrap()
}

fn cells(report: &RunReport, row: usize) -> Vec<CellState> {
    (0..report.tick_count)
        .flat_map(|t| report.timeline.tick_row(t, row).iter().copied())
        .collect()
}

fn check_invariants(specs: &[TaskSpec], report: &RunReport) {
    let len = report.tick_length as usize;

    // Conservation: every unit of work shows up exactly once.
    for (row, spec) in specs.iter().enumerate() {
        let need: u32 = spec.periods.iter().sum();
        let done = report
            .timeline
            .count_in_row(row, report.tick_count, CellState::Processing);
        assert_eq!(done, need as usize, "row {row}");

        // A task's row ends with its final processing unit.
        let row_cells = cells(report, row);
        let last = row_cells.iter().rposition(|&c| c != CellState::Off);
        assert_eq!(last.map(|i| row_cells[i]), Some(CellState::Processing), "row {row}");
    }

    // One processor: no column holds two processing cells.
    for tick in 0..report.tick_count {
        let mut busy = 0;
        for offset in 0..len {
            let processing = (0..specs.len())
                .filter(|&row| report.timeline.get(tick, row, offset) == Some(CellState::Processing))
                .count();
            assert!(processing <= 1, "tick {tick} offset {offset}");
            busy += processing;
        }
        assert_eq!(busy + report.downtime[tick] as usize, len, "tick {tick}");
    }

    let utilization = report.utilization();
    assert!(utilization > 0.0 && utilization <= 1.0 + 1e-12);
    assert_eq!(report.downtime.len(), report.tick_count);
}

#[test]
fn test_scenario_single_task_single_tick() {
    let specs = [TaskSpec::new(5, vec![3])];
    let report = run(&specs, Policy::Priority, 0, 3);

    assert_eq!(report.tick_count, 1);
    assert_eq!(report.timeline.tick_row(0, 0), &[CellState::Processing; 3]);
    assert!((report.utilization() - 1.0).abs() < 1e-10);
    check_invariants(&specs, &report);
}

#[test]
fn test_scenario_equal_priorities_take_turns() {
    let specs = [TaskSpec::new(1, vec![2]), TaskSpec::new(1, vec![2])];
    let report = run(&specs, Policy::Priority, 0, 2);

    assert_eq!(report.tick_count, 2);
    assert_eq!(report.downtime, vec![0, 0]);
    assert_eq!(report.timeline.tick_row(0, 0), &[CellState::Processing; 2]);
    assert_eq!(report.timeline.tick_row(0, 1), &[CellState::Off; 2]);
    assert_eq!(report.timeline.tick_row(1, 1), &[CellState::Processing; 2]);
    check_invariants(&specs, &report);
}

#[test]
fn test_scenario_input_wait_between_periods() {
    let specs = [TaskSpec::new(0, vec![2, 2])];
    let report = run(&specs, Policy::Priority, 1, 2);

    let t = &report.timeline;
    assert_eq!(t.tick_row(0, 0), &[CellState::Processing; 2]);
    assert_eq!(t.tick_row(1, 0), &[CellState::InputWait, CellState::Off]);
    assert_eq!(t.tick_row(2, 0), &[CellState::Processing; 2]);
    assert_eq!(report.tick_count, 3);
    assert_eq!(report.downtime, vec![0, 2, 0]);
    assert!((report.utilization() - 4.0 / 6.0).abs() < 1e-10);
    check_invariants(&specs, &report);
}

#[test]
fn test_scenario_sweep_points_are_standalone_runs() {
    let specs = [TaskSpec::new(3, vec![2, 4]), TaskSpec::new(3, vec![5])];
    let mut sim = Simulator::from_specs(&specs);
    let sweep = sim
        .sweep(&super::SweepConfig::new(1..=2, 0..=1))
        .unwrap();
    assert_eq!(sweep.points.len(), 4);

    for point in &sweep.points {
        let single = run(&specs, Policy::Priority, point.params.input_time, point.params.tick_length);
        assert_eq!(single.summary(), point.summary);
    }
}

#[test]
fn test_default_dataset_both_policies() {
    let config = WorkloadConfig::default_dataset();
    let mut sim = Simulator::from_config(&config);
    let cmp = sim.compare(&config.params).unwrap();

    check_invariants(&config.tasks, &cmp.priority);
    check_invariants(&config.tasks, &cmp.fifo);
    assert_eq!(cmp.priority.total_work, config.total_work());
}

#[test]
fn test_priority_drains_higher_level_first() {
    let specs = [TaskSpec::new(1, vec![3]), TaskSpec::new(9, vec![3])];
    let report = run(&specs, Policy::Priority, 0, 1);

    let high = cells(&report, 1);
    let low = cells(&report, 0);
    let high_done = high.iter().rposition(|&c| c == CellState::Processing).unwrap();
    let low_start = low.iter().position(|&c| c == CellState::Processing).unwrap();
    assert!(high_done < low_start);
}

#[test]
fn test_random_workloads_keep_invariants() {
    let mut rng = SmallRng::seed_from_u64(0x5eed);
    for round in 0..40 {
        let tick_length = (round % 10) as u32 + 1;
        let input_time = (round % 7) as u32;
        let config = WorkloadConfig::random(SimParams::new(input_time, tick_length), 1 + round % 8, 6, &mut rng);

        for policy in [Policy::Priority, Policy::Fifo] {
            let report = run(&config.tasks, policy, input_time, tick_length);
            check_invariants(&config.tasks, &report);
        }
    }
}

#[test]
fn test_runs_are_deterministic() {
    let config = WorkloadConfig::random(SimParams::new(2, 3), 8, 3, &mut SmallRng::seed_from_u64(99));
    for policy in [Policy::Priority, Policy::Fifo] {
        let a = run(&config.tasks, policy, 2, 3);
        let b = run(&config.tasks, policy, 2, 3);
        assert_eq!(a.timeline, b.timeline);
        assert_eq!(a.downtime, b.downtime);
    }
}
