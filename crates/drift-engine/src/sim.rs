//! Simulation controller: run lifecycle and the two-phase rendezvous.
//!
//! ```text
//! Controller                          Worker × N
//!     |                                   |
//!     | lattice.reset()                   |
//!     | spawn workers ------------------->| start_barrier.wait()
//!     | reporter.snapshot(initial)        |
//!     | start_barrier.wait() ============>| tick loop (strategy.transfer)
//!     | snapshot loop, budgeted sleep     |
//!     | handle.stop() per worker -------->| flag observed after the
//!     |                                   |   in-flight tick
//!     | stop_barrier.wait() <============ | stop_barrier.wait()
//!     | final snapshot + integrity        |
//!     | join -> WorkerReport, sum ticks   |
//! ```
//!
//! The start barrier orders "lattice fully initialized" before any worker
//! tick; the stop barrier orders every worker's last tick before the
//! controller's final read. Everything between the two barriers is only as
//! ordered as the active strategy makes it.

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use drift_core::{Lattice, MoveStrategy, StrategyKind};
use tracing::{debug, info};

use crate::config::{ConfigError, SimConfig};
use crate::report::Reporter;
use crate::worker::{Particle, WorkerHandle};

// ── RunError ─────────────────────────────────────────────────────

/// Error starting a run.
#[derive(Debug, PartialEq, Eq)]
pub enum RunError {
    /// A run is already in progress on this instance.
    AlreadyRunning,
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRunning => write!(f, "simulation is already running"),
        }
    }
}

impl Error for RunError {}

// ── RunReport ────────────────────────────────────────────────────

/// Outcome of a completed run.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Wall-clock time from start-barrier release to stop-barrier release.
    pub elapsed: Duration,
    /// Ticks performed, summed across all workers.
    pub total_ticks: u64,
    /// The lattice after the stop rendezvous (consistent by construction).
    pub final_cells: Vec<i64>,
    /// Sum of `final_cells`.
    pub sum: i64,
    /// The particle count the sum is checked against.
    pub expected: i64,
    /// Whether `sum == expected`. An unsynchronized run that lost updates
    /// reports `false` here — that is an outcome, not an error.
    pub passed: bool,
    /// Worker threads joined cleanly.
    pub workers_joined: usize,
}

// ── Simulation ───────────────────────────────────────────────────

/// Owner of the shared lattice, the strategy, and the run lifecycle.
///
/// A single instance is not reentrant: concurrent calls to
/// [`run`](Simulation::run) race for the running flag and exactly one wins.
pub struct Simulation {
    config: SimConfig,
    lattice: Arc<Lattice>,
    strategy: Arc<dyn MoveStrategy>,
    running: AtomicBool,
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("config", &self.config)
            .field("lattice", &self.lattice)
            .field("strategy", &"<dyn MoveStrategy>")
            .field("running", &self.running)
            .finish()
    }
}

impl Simulation {
    /// Create a simulation with one of the built-in strategies.
    pub fn new(config: SimConfig, kind: StrategyKind) -> Result<Self, ConfigError> {
        config.validate()?;
        let strategy: Arc<dyn MoveStrategy> = Arc::from(kind.build(config.cells as usize));
        Self::with_strategy(config, strategy)
    }

    /// Create a simulation with a caller-supplied strategy.
    ///
    /// The strategy must be sized for `config.cells` if it holds per-cell
    /// state (as [`drift_core::CellLocks`] does).
    pub fn with_strategy(
        config: SimConfig,
        strategy: Arc<dyn MoveStrategy>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let lattice = Lattice::new(config.cells as usize).map_err(|_| ConfigError::NoCells)?;
        Ok(Self {
            config,
            lattice: Arc::new(lattice),
            strategy,
            running: AtomicBool::new(false),
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Name of the active strategy.
    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    /// Whether a run is currently in progress.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run the simulation for approximately `duration`.
    ///
    /// Blocks the calling thread for the duration plus a bounded drain
    /// latency (one in-flight tick plus one tick period per worker, then
    /// the stop rendezvous). Reporting goes through `reporter` at the
    /// defined call points; the same data comes back in the [`RunReport`].
    ///
    /// # Errors
    ///
    /// [`RunError::AlreadyRunning`] if another run is in progress on this
    /// instance. The in-flight run is not disturbed.
    ///
    /// # Hangs
    ///
    /// A worker that never reaches the stop barrier — a panicked worker
    /// thread, or a strategy that never releases a lock — blocks this call
    /// indefinitely. There is no timeout.
    pub fn run(&self, duration: Duration, reporter: &dyn Reporter) -> Result<RunReport, RunError> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| RunError::AlreadyRunning)?;

        let particles = self.config.particles as usize;
        debug!(
            particles,
            cells = self.config.cells,
            strategy = self.strategy.name(),
            "starting run"
        );

        // All particles start colocated in cell 0. The start barrier below
        // orders this before any worker tick.
        self.lattice.reset(self.config.particles as i64);

        let start_barrier = Arc::new(Barrier::new(particles + 1));
        let stop_barrier = Arc::new(Barrier::new(particles + 1));

        let mut workers: Vec<WorkerHandle> = Vec::with_capacity(particles);
        for worker_id in 0..particles {
            workers.push(Particle::spawn(
                worker_id,
                self.config.cells as usize,
                self.config.move_probability,
                self.config.tick_period,
                self.config.seed,
                Arc::clone(&self.lattice),
                Arc::clone(&self.strategy),
                Arc::clone(&start_barrier),
                Arc::clone(&stop_barrier),
            ));
        }

        reporter.snapshot(&self.lattice.snapshot());

        start_barrier.wait();
        let started = Instant::now();
        debug!("start barrier released");

        // Observation window: snapshot, then sleep whatever remains of the
        // snapshot period or the run, whichever is shorter.
        loop {
            let elapsed = started.elapsed();
            if elapsed >= duration {
                break;
            }
            reporter.snapshot(&self.lattice.snapshot());
            thread::sleep((duration - elapsed).min(self.config.snapshot_period));
        }

        for worker in &workers {
            worker.stop();
        }
        stop_barrier.wait();
        let elapsed = started.elapsed();
        debug!(elapsed_ms = elapsed.as_millis() as u64, "stop barrier released");

        // No worker mutates the lattice past the stop barrier.
        let final_cells = self.lattice.snapshot();
        let sum: i64 = final_cells.iter().sum();
        let expected = i64::from(self.config.particles);
        let passed = sum == expected;

        reporter.snapshot(&final_cells);
        reporter.integrity(sum, expected, passed);

        let mut total_ticks = 0u64;
        let mut workers_joined = 0usize;
        for worker in workers {
            if let Ok(report) = worker.join() {
                total_ticks += report.ticks;
                workers_joined += 1;
            }
        }
        reporter.ticks(total_ticks);

        info!(
            strategy = self.strategy.name(),
            total_ticks, sum, expected, passed, "run complete"
        );

        self.lattice.clear();
        self.running.store(false, Ordering::Release);

        Ok(RunReport {
            elapsed,
            total_ticks,
            final_cells,
            sum,
            expected,
            passed,
            workers_joined,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NullReporter;

    fn small_config() -> SimConfig {
        SimConfig {
            cells: 4,
            particles: 8,
            move_probability: 0.5,
            tick_period: Duration::ZERO,
            snapshot_period: Duration::from_millis(50),
            seed: 42,
        }
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SimConfig {
            cells: 0,
            ..small_config()
        };
        assert_eq!(
            Simulation::new(config, StrategyKind::GlobalLock).unwrap_err(),
            ConfigError::NoCells
        );
    }

    #[test]
    fn run_while_running_fails() {
        let sim = Simulation::new(small_config(), StrategyKind::GlobalLock).unwrap();
        sim.running.store(true, Ordering::Release);
        assert_eq!(
            sim.run(Duration::ZERO, &NullReporter).unwrap_err(),
            RunError::AlreadyRunning
        );
        sim.running.store(false, Ordering::Release);

        // The guard releases after a real run completes.
        sim.run(Duration::ZERO, &NullReporter).unwrap();
        assert!(!sim.is_running());
        sim.run(Duration::ZERO, &NullReporter).unwrap();
    }

    #[test]
    fn zero_duration_still_ticks_every_worker() {
        let sim = Simulation::new(small_config(), StrategyKind::GlobalLock).unwrap();
        let report = sim.run(Duration::ZERO, &NullReporter).unwrap();

        // Each worker performs its in-flight tick before observing stop.
        assert!(report.total_ticks >= 8);
        assert_eq!(report.workers_joined, 8);
        assert!(report.passed);
        assert_eq!(report.sum, 8);
    }

    #[test]
    fn lattice_cleared_after_run() {
        let sim = Simulation::new(small_config(), StrategyKind::CellLocks).unwrap();
        sim.run(Duration::from_millis(20), &NullReporter).unwrap();
        assert_eq!(sim.lattice.sum(), 0);
    }

    #[test]
    fn strategy_name_passthrough() {
        let sim = Simulation::new(small_config(), StrategyKind::CellLocks).unwrap();
        assert_eq!(sim.strategy_name(), "cell-locks");
    }

    #[test]
    fn report_cells_match_lattice_len() {
        let sim = Simulation::new(small_config(), StrategyKind::GlobalLock).unwrap();
        let report = sim.run(Duration::from_millis(20), &NullReporter).unwrap();
        assert_eq!(report.final_cells.len(), 4);
        assert_eq!(report.expected, 8);
    }
}
