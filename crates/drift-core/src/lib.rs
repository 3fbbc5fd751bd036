//! Core types for the Drift concurrency lab.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! shared cell [`Lattice`] and the three [`strategy`] implementations that
//! wrap a particle transfer in different concurrency disciplines.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod lattice;
pub mod strategy;

pub use error::LatticeError;
pub use lattice::Lattice;
pub use strategy::{CellLocks, GlobalLock, MoveStrategy, StrategyKind, Unsynchronized};
