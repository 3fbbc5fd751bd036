//! Drift: a discrete-cell particle diffusion lab for comparing
//! concurrency-control strategies.
//!
//! N worker threads ("particles") hop between adjacent cells of a shared
//! counter lattice while a controller coordinates a start/stop barrier
//! rendezvous around a timed observation window. The interesting part is
//! the [`types::MoveStrategy`] wrapped around each transfer: no locking
//! (which loses updates — the integrity check exists to show it), one
//! global lock, or one ordered lock per cell.
//!
//! # Quick start
//!
//! ```rust
//! use drift::prelude::*;
//! use std::time::Duration;
//!
//! let config = SimConfig {
//!     cells: 4,
//!     particles: 8,
//!     ..Default::default()
//! };
//! let sim = Simulation::new(config, StrategyKind::GlobalLock).unwrap();
//! let report = sim.run(Duration::from_millis(50), &NullReporter).unwrap();
//!
//! // A locked strategy never loses a particle.
//! assert!(report.passed);
//! assert_eq!(report.sum, 8);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `drift-core` | The cell [`types::Lattice`] and mutation strategies |
//! | [`engine`] | `drift-engine` | [`engine::Simulation`], configuration, reporting hooks |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core lattice and strategy types (`drift-core`).
pub use drift_core as types;

/// Simulation controller, workers, config, and reporting (`drift-engine`).
pub use drift_engine as engine;

/// Common imports for typical Drift usage.
///
/// ```rust
/// use drift::prelude::*;
/// ```
pub mod prelude {
    // Lattice and strategies
    pub use drift_core::{
        CellLocks, GlobalLock, Lattice, LatticeError, MoveStrategy, StrategyKind, Unsynchronized,
    };

    // Engine
    pub use drift_engine::{
        ConfigError, NullReporter, Reporter, RunError, RunReport, SimConfig, Simulation,
    };
}
