//! Error types for the Drift core crate.

use std::error::Error;
use std::fmt;

/// Errors from [`Lattice`](crate::Lattice) construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LatticeError {
    /// The lattice would have zero cells.
    Empty,
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "lattice must have at least one cell"),
        }
    }
}

impl Error for LatticeError {}
