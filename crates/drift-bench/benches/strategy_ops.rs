//! Criterion micro-benchmarks for the uncontended per-transfer cost of
//! each mutation strategy.
//!
//! Single-threaded on purpose: this measures the fixed overhead of each
//! discipline (nothing, one mutex, two ordered mutexes), not contention.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use drift_bench::bench_fixture;
use drift_core::StrategyKind;

const CELLS: usize = 64;

/// One pass of alternating interior transfers across the lattice.
fn transfer_sweep(c: &mut Criterion, kind: StrategyKind, label: &str) {
    let (lattice, strategy) = bench_fixture(CELLS, kind);

    c.bench_function(label, |b| {
        b.iter(|| {
            for i in 0..CELLS - 1 {
                strategy.transfer(black_box(&lattice), i, i + 1);
                strategy.transfer(black_box(&lattice), i + 1, i);
            }
        });
    });
}

fn bench_unsynchronized(c: &mut Criterion) {
    transfer_sweep(c, StrategyKind::Unsynchronized, "transfer_unsynchronized");
}

fn bench_global_lock(c: &mut Criterion) {
    transfer_sweep(c, StrategyKind::GlobalLock, "transfer_global_lock");
}

fn bench_cell_locks(c: &mut Criterion) {
    transfer_sweep(c, StrategyKind::CellLocks, "transfer_cell_locks");
}

/// The clamped-edge path: `from == to` returns before any lock.
fn bench_cell_locks_self_transfer(c: &mut Criterion) {
    let (lattice, strategy) = bench_fixture(CELLS, StrategyKind::CellLocks);

    c.bench_function("self_transfer_cell_locks", |b| {
        b.iter(|| {
            for i in 0..CELLS {
                strategy.transfer(black_box(&lattice), i, i);
            }
        });
    });
}

criterion_group!(
    benches,
    bench_unsynchronized,
    bench_global_lock,
    bench_cell_locks,
    bench_cell_locks_self_transfer
);
criterion_main!(benches);
