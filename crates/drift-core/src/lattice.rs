//! Fixed-length shared array of cell occupancy counters.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::error::LatticeError;

/// A fixed-length, shared array of cell occupancy counters.
///
/// The lattice is the only shared mutable state in a simulation. Cells are
/// [`AtomicI64`] accessed with relaxed loads and stores: individual accesses
/// are always well-defined, but a read-modify-write sequence is only as
/// atomic as the [`strategy`](crate::strategy) wrapping it. Counters are
/// signed because a racy run can transiently drive a cell below zero.
///
/// Invariant: outside a run window, the sum of all counters equals the
/// number of particles seeded by [`reset`](Lattice::reset) — unless an
/// unsynchronized run lost updates, which is exactly what the integrity
/// check reports.
///
/// # Examples
///
/// ```
/// use drift_core::Lattice;
///
/// let lattice = Lattice::new(5).unwrap();
/// lattice.reset(100);
/// assert_eq!(lattice.load(0), 100);
/// assert_eq!(lattice.sum(), 100);
/// ```
#[derive(Debug)]
pub struct Lattice {
    cells: Box<[AtomicI64]>,
}

impl Lattice {
    /// Create a lattice with `len` cells, all zero.
    ///
    /// Returns `Err(LatticeError::Empty)` if `len == 0`.
    pub fn new(len: usize) -> Result<Self, LatticeError> {
        if len == 0 {
            return Err(LatticeError::Empty);
        }
        let cells = (0..len).map(|_| AtomicI64::new(0)).collect();
        Ok(Self { cells })
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always returns `false` — construction rejects `len == 0`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Read one cell counter (relaxed).
    ///
    /// Strategy-facing: cross-thread ordering is the caller's discipline,
    /// not the lattice's.
    pub fn load(&self, index: usize) -> i64 {
        self.cells[index].load(Ordering::Relaxed)
    }

    /// Overwrite one cell counter (relaxed). Strategy-facing.
    pub fn store(&self, index: usize, value: i64) {
        self.cells[index].store(value, Ordering::Relaxed);
    }

    /// Zero every cell, then seed cell 0 with `origin_count`.
    ///
    /// All particles start colocated at the origin cell.
    pub fn reset(&self, origin_count: i64) {
        self.clear();
        self.cells[0].store(origin_count, Ordering::Relaxed);
    }

    /// Zero every cell.
    pub fn clear(&self) {
        for cell in self.cells.iter() {
            cell.store(0, Ordering::Relaxed);
        }
    }

    /// Copy out all cell counters.
    ///
    /// Taken mid-run this is best-effort: each cell is read atomically but
    /// the cells are not read at one instant, and an unsynchronized run may
    /// expose transient values. Only a snapshot taken after the stop
    /// rendezvous is guaranteed consistent.
    pub fn snapshot(&self) -> Vec<i64> {
        self.cells
            .iter()
            .map(|cell| cell.load(Ordering::Relaxed))
            .collect()
    }

    /// Sum of all cell counters, read cell-by-cell like [`snapshot`](Lattice::snapshot).
    pub fn sum(&self) -> i64 {
        self.cells
            .iter()
            .map(|cell| cell.load(Ordering::Relaxed))
            .sum()
    }
}
