//! Run configuration and validation.

use std::error::Error;
use std::fmt;
use std::time::Duration;

// ── SimConfig ────────────────────────────────────────────────────

/// Construction parameters for a [`Simulation`](crate::Simulation).
///
/// Validated once at construction via [`validate`](SimConfig::validate);
/// a valid config has no further failure modes during a run.
#[derive(Clone, Debug)]
pub struct SimConfig {
    /// Number of cells in the lattice. Must be at least 1. Default: 10.
    pub cells: u32,
    /// Number of particles, one worker thread each. Must be at least 1.
    /// Default: 100.
    pub particles: u32,
    /// Probability in `[0, 1]` that a worker hops on a given tick.
    /// Default: 0.5.
    pub move_probability: f64,
    /// Delay between worker ticks. `Duration::ZERO` means the worker only
    /// yields between ticks. Default: zero.
    pub tick_period: Duration,
    /// Interval between periodic snapshots during the run window.
    /// Must be non-zero. Default: 1 second.
    pub snapshot_period: Duration,
    /// Seed for the per-worker RNG streams; worker `i` derives its stream
    /// from `seed ^ i`. Default: 42.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cells: 10,
            particles: 100,
            move_probability: 0.5,
            tick_period: Duration::ZERO,
            snapshot_period: Duration::from_millis(1000),
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cells == 0 {
            return Err(ConfigError::NoCells);
        }
        if self.particles == 0 {
            return Err(ConfigError::NoParticles);
        }
        if !self.move_probability.is_finite() || !(0.0..=1.0).contains(&self.move_probability) {
            return Err(ConfigError::InvalidMoveProbability {
                value: self.move_probability,
            });
        }
        if self.snapshot_period.is_zero() {
            return Err(ConfigError::SnapshotPeriodZero);
        }
        Ok(())
    }
}

// ── ConfigError ──────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The lattice would have zero cells.
    NoCells,
    /// No particles to simulate.
    NoParticles,
    /// move_probability is NaN, infinite, or outside `[0, 1]`.
    InvalidMoveProbability {
        /// The invalid value.
        value: f64,
    },
    /// The snapshot period is zero, which would spin the controller.
    SnapshotPeriodZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCells => write!(f, "cells must be at least 1"),
            Self::NoParticles => write!(f, "particles must be at least 1"),
            Self::InvalidMoveProbability { value } => {
                write!(f, "move_probability must be in [0, 1], got {value}")
            }
            Self::SnapshotPeriodZero => write!(f, "snapshot_period must be non-zero"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_cells() {
        let config = SimConfig {
            cells: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoCells));
    }

    #[test]
    fn rejects_zero_particles() {
        let config = SimConfig {
            particles: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoParticles));
    }

    #[test]
    fn rejects_out_of_range_probability() {
        for value in [-0.1, 1.1, f64::NAN, f64::INFINITY] {
            let config = SimConfig {
                move_probability: value,
                ..Default::default()
            };
            assert!(
                matches!(
                    config.validate(),
                    Err(ConfigError::InvalidMoveProbability { .. })
                ),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_probability_bounds() {
        for value in [0.0, 1.0] {
            let config = SimConfig {
                move_probability: value,
                ..Default::default()
            };
            assert_eq!(config.validate(), Ok(()), "{value} should be accepted");
        }
    }

    #[test]
    fn rejects_zero_snapshot_period() {
        let config = SimConfig {
            snapshot_period: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::SnapshotPeriodZero));
    }
}
