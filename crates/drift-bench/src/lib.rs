//! Shared fixtures for the Drift benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use drift_core::{Lattice, MoveStrategy, StrategyKind};

/// Build a seeded lattice and a strategy sized for it.
///
/// The lattice starts with ten units per cell so decrement-heavy transfer
/// sequences stay far from zero.
pub fn bench_fixture(cells: usize, kind: StrategyKind) -> (Lattice, Box<dyn MoveStrategy>) {
    let lattice = Lattice::new(cells).expect("bench lattice is non-empty");
    for i in 0..cells {
        lattice.store(i, 10);
    }
    (lattice, kind.build(cells))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_seeds_every_cell() {
        let (lattice, strategy) = bench_fixture(8, StrategyKind::CellLocks);
        assert_eq!(lattice.sum(), 80);
        assert_eq!(strategy.name(), "cell-locks");
    }
}
