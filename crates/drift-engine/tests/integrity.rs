//! Integrity invariant under the safe strategies.
//!
//! For GlobalLock and CellLocks the sum of the final cell array must equal
//! the particle count for any run parameters — the lock discipline makes
//! every transfer atomic, so no update can be lost.

use std::time::Duration;

use drift_core::StrategyKind;
use drift_engine::{NullReporter, SimConfig, Simulation};

fn run_once(kind: StrategyKind, cells: u32, particles: u32, duration_ms: u64) {
    let config = SimConfig {
        cells,
        particles,
        move_probability: 0.9,
        tick_period: Duration::ZERO,
        snapshot_period: Duration::from_millis(50),
        seed: 42,
    };
    let sim = Simulation::new(config, kind).unwrap();
    let report = sim
        .run(Duration::from_millis(duration_ms), &NullReporter)
        .unwrap();

    assert!(
        report.passed,
        "{kind}: sum {} != expected {}",
        report.sum, report.expected
    );
    assert_eq!(report.sum, i64::from(particles));
    assert_eq!(report.workers_joined, particles as usize);
    assert!(report.total_ticks >= u64::from(particles));
}

#[test]
fn global_lock_always_passes() {
    run_once(StrategyKind::GlobalLock, 1, 4, 100);
    run_once(StrategyKind::GlobalLock, 8, 16, 150);
    run_once(StrategyKind::GlobalLock, 32, 48, 150);
}

#[test]
fn cell_locks_always_pass() {
    run_once(StrategyKind::CellLocks, 1, 4, 100);
    run_once(StrategyKind::CellLocks, 8, 16, 150);
    run_once(StrategyKind::CellLocks, 32, 48, 150);
}

#[test]
fn safe_strategies_pass_repeatedly() {
    for _ in 0..3 {
        run_once(StrategyKind::GlobalLock, 8, 24, 100);
        run_once(StrategyKind::CellLocks, 8, 24, 100);
    }
}

/// The reference scenario: 10 cells, 100 particles, p = 0.5, 5 seconds,
/// global lock.
#[test]
fn reference_scenario_global_lock() {
    let config = SimConfig {
        cells: 10,
        particles: 100,
        move_probability: 0.5,
        tick_period: Duration::ZERO,
        snapshot_period: Duration::from_millis(1000),
        seed: 42,
    };
    let sim = Simulation::new(config, StrategyKind::GlobalLock).unwrap();
    let report = sim.run(Duration::from_millis(5000), &NullReporter).unwrap();

    assert_eq!(report.sum, 100);
    assert!(report.passed);
    assert!(report.total_ticks > 0);
    assert_eq!(report.final_cells.len(), 10);
}
