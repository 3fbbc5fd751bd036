//! Mutation strategies: the concurrency discipline around a transfer.
//!
//! All three strategies have the same observable effect on the lattice —
//! decrement `from`, increment `to` — and differ only in the locking
//! wrapped around that read-modify-write:
//!
//! | Strategy | Discipline | Correctness | Contention |
//! |----------|------------|-------------|------------|
//! | [`Unsynchronized`] | none | lost updates possible | none |
//! | [`GlobalLock`] | one mutex for every transfer | safe | high |
//! | [`CellLocks`] | one mutex per cell, ordered acquisition | safe | low |

use std::fmt;
use std::sync::Mutex;

use crate::lattice::Lattice;

/// The concurrency discipline wrapping a one-unit transfer between cells.
///
/// Strategies are shared across all worker threads of a run; the lattice is
/// passed into each call rather than stored, so a strategy owns nothing but
/// its lock state.
pub trait MoveStrategy: Send + Sync {
    /// Short machine-friendly name, used in reports and logs.
    fn name(&self) -> &str;

    /// Transfer one unit from cell `from` to cell `to`.
    ///
    /// Both indices must be in bounds for `lattice`; workers guarantee this
    /// by clamping targets to the lattice edges.
    fn transfer(&self, lattice: &Lattice, from: usize, to: usize);
}

// ── Unsynchronized ───────────────────────────────────────────────

/// No locking at all — the baseline that demonstrates lost updates.
///
/// Each counter update is a split load/store pair, not a single atomic
/// read-modify-write: two workers that load the same cell value before
/// either stores will lose one of the updates. The integrity check after an
/// unsynchronized run reports exactly this.
#[derive(Debug, Default)]
pub struct Unsynchronized;

impl MoveStrategy for Unsynchronized {
    fn name(&self) -> &str {
        "unsynchronized"
    }

    fn transfer(&self, lattice: &Lattice, from: usize, to: usize) {
        // Split load/store, not fetch_sub/fetch_add: the window between
        // the load and the store is the demonstrated failure mode.
        let v = lattice.load(from);
        lattice.store(from, v - 1);
        let v = lattice.load(to);
        lattice.store(to, v + 1);
    }
}

// ── GlobalLock ───────────────────────────────────────────────────

/// One exclusive lock guarding every transfer.
///
/// Strictly serializes all moves system-wide: safe, maximally contended.
#[derive(Debug, Default)]
pub struct GlobalLock {
    lock: Mutex<()>,
}

impl GlobalLock {
    /// Create the global-lock strategy.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MoveStrategy for GlobalLock {
    fn name(&self) -> &str {
        "global-lock"
    }

    fn transfer(&self, lattice: &Lattice, from: usize, to: usize) {
        let _guard = self.lock.lock().unwrap();
        lattice.store(from, lattice.load(from) - 1);
        lattice.store(to, lattice.load(to) + 1);
    }
}

// ── CellLocks ────────────────────────────────────────────────────

/// One lock per cell, acquired in ascending index order.
///
/// Two transfers contend only if they share a cell. Every caller acquires
/// `min(from, to)` before `max(from, to)` and releases in reverse, so the
/// classic two-resource deadlock cannot form.
#[derive(Debug)]
pub struct CellLocks {
    locks: Box<[Mutex<()>]>,
}

impl CellLocks {
    /// Create one lock per cell for a lattice of `cells` cells.
    pub fn new(cells: usize) -> Self {
        let locks = (0..cells).map(|_| Mutex::new(())).collect();
        Self { locks }
    }
}

impl MoveStrategy for CellLocks {
    fn name(&self) -> &str {
        "cell-locks"
    }

    fn transfer(&self, lattice: &Lattice, from: usize, to: usize) {
        if from == to {
            // Clamped edge hop: net-zero transfer, and taking the same
            // lock twice would self-deadlock.
            return;
        }
        let (lo, hi) = if from < to { (from, to) } else { (to, from) };
        // Guards drop in reverse declaration order: release hi, then lo.
        let _lo = self.locks[lo].lock().unwrap();
        let _hi = self.locks[hi].lock().unwrap();
        lattice.store(from, lattice.load(from) - 1);
        lattice.store(to, lattice.load(to) + 1);
    }
}

// ── StrategyKind ─────────────────────────────────────────────────

/// Tagged selector for the built-in strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrategyKind {
    /// [`Unsynchronized`].
    Unsynchronized,
    /// [`GlobalLock`].
    GlobalLock,
    /// [`CellLocks`].
    CellLocks,
}

impl StrategyKind {
    /// All built-in strategies, in demonstration order.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Unsynchronized,
        StrategyKind::GlobalLock,
        StrategyKind::CellLocks,
    ];

    /// Build the strategy for a lattice of `cells` cells.
    pub fn build(self, cells: usize) -> Box<dyn MoveStrategy> {
        match self {
            Self::Unsynchronized => Box::new(Unsynchronized),
            Self::GlobalLock => Box::new(GlobalLock::new()),
            Self::CellLocks => Box::new(CellLocks::new(cells)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unsynchronized => "unsynchronized",
            Self::GlobalLock => "global-lock",
            Self::CellLocks => "cell-locks",
        };
        write!(f, "{name}")
    }
}
