//! Particle worker threads.
//!
//! Each particle runs on its own named thread: it blocks at the start
//! barrier, then ticks until its stop flag is observed, then blocks at the
//! stop barrier. The tick count travels back to the controller through the
//! `JoinHandle`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use drift_core::{Lattice, MoveStrategy};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Final accounting returned by a worker thread when it exits.
#[derive(Debug)]
pub(crate) struct WorkerReport {
    /// Ticks performed, monotone over the worker's lifetime.
    pub ticks: u64,
}

/// Controller-side handle to a spawned worker.
pub(crate) struct WorkerHandle {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<WorkerReport>,
}

impl WorkerHandle {
    /// Request cooperative shutdown. Non-blocking; the worker observes the
    /// flag after its in-flight tick, within one tick period.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// Join the worker thread and recover its report.
    pub fn join(self) -> thread::Result<WorkerReport> {
        self.thread.join()
    }
}

/// One particle: a private position, a private RNG stream, and shared
/// references to the lattice, strategy, and rendezvous barriers.
pub(crate) struct Particle {
    position: usize,
    cells: usize,
    move_probability: f64,
    tick_period: Duration,
    ticks: u64,
    rng: ChaCha8Rng,
    lattice: Arc<Lattice>,
    strategy: Arc<dyn MoveStrategy>,
    start_barrier: Arc<Barrier>,
    stop_barrier: Arc<Barrier>,
    stop: Arc<AtomicBool>,
}

impl Particle {
    /// Spawn worker `worker_id` on a named thread.
    ///
    /// The RNG stream is derived from `seed ^ worker_id`, so runs with the
    /// same seed draw the same per-worker sequences.
    #[allow(clippy::too_many_arguments)]
    pub fn spawn(
        worker_id: usize,
        cells: usize,
        move_probability: f64,
        tick_period: Duration,
        seed: u64,
        lattice: Arc<Lattice>,
        strategy: Arc<dyn MoveStrategy>,
        start_barrier: Arc<Barrier>,
        stop_barrier: Arc<Barrier>,
    ) -> WorkerHandle {
        let stop = Arc::new(AtomicBool::new(false));
        let particle = Particle {
            position: 0,
            cells,
            move_probability,
            tick_period,
            ticks: 0,
            rng: ChaCha8Rng::seed_from_u64(seed ^ worker_id as u64),
            lattice,
            strategy,
            start_barrier,
            stop_barrier,
            stop: Arc::clone(&stop),
        };
        let thread = thread::Builder::new()
            .name(format!("drift-worker-{worker_id}"))
            .spawn(move || particle.run())
            .expect("failed to spawn worker thread");
        WorkerHandle { stop, thread }
    }

    /// Thread body. Consumes self and returns the report through the
    /// `JoinHandle`.
    fn run(mut self) -> WorkerReport {
        self.start_barrier.wait();

        loop {
            self.tick();
            if self.tick_period.is_zero() {
                thread::yield_now();
            } else {
                thread::sleep(self.tick_period);
            }
            // Checked after the tick: stop always lands between ticks,
            // never inside one.
            if self.stop.load(Ordering::Acquire) {
                break;
            }
        }

        self.stop_barrier.wait();
        WorkerReport { ticks: self.ticks }
    }

    /// One iteration: maybe hop one cell left or right, clamped at the
    /// lattice edges. A clamped hop with `target == position` still counts
    /// as a tick and still goes through the strategy.
    fn tick(&mut self) {
        self.ticks += 1;

        if self.rng.random::<f64>() > self.move_probability {
            return;
        }

        let step = if self.rng.random::<bool>() { 1 } else { -1 };
        let target = clamp_target(self.position, step, self.cells);
        self.strategy.transfer(&self.lattice, self.position, target);
        self.position = target;
    }
}

/// Clamp a one-cell hop to `[0, cells - 1]`. Edges reflect into a
/// self-transfer rather than wrapping.
fn clamp_target(position: usize, step: i64, cells: usize) -> usize {
    (position as i64 + step).clamp(0, cells as i64 - 1) as usize
}
