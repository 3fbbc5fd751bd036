//! Simulation engine for the Drift concurrency lab.
//!
//! A [`Simulation`] owns a shared cell lattice and a mutation strategy,
//! spawns one worker thread per particle, and coordinates a two-phase
//! barrier rendezvous (all-start, all-stop) around a timed observation
//! window. Output goes through the [`Reporter`] collaborator; the final
//! outcome — including whether the integrity invariant held — comes back
//! as a [`RunReport`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod report;
pub mod sim;
mod worker;

pub use config::{ConfigError, SimConfig};
pub use report::{NullReporter, Reporter};
pub use sim::{RunError, RunReport, Simulation};
