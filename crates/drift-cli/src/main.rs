//! Drift demo CLI.
//!
//! Runs the particle diffusion lab under one or all of the locking
//! strategies and renders snapshots, the integrity check, and the tick
//! total to the console.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use drift::prelude::*;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Drift concurrency lab.
#[derive(Parser, Debug)]
#[command(name = "drift")]
#[command(
    about = "Particle diffusion over a shared lattice under different locking strategies",
    long_about = None
)]
struct Args {
    /// Number of lattice cells
    #[arg(short, long, default_value = "10")]
    cells: u32,

    /// Number of particles (one worker thread each)
    #[arg(short, long, default_value = "100")]
    particles: u32,

    /// Per-tick move probability in [0, 1]
    #[arg(short, long, default_value = "0.5")]
    move_probability: f64,

    /// Run duration in milliseconds
    #[arg(short, long, default_value = "5000")]
    duration_ms: u64,

    /// Worker tick period in microseconds (0 = yield only)
    #[arg(long, default_value = "0")]
    tick_micros: u64,

    /// Snapshot interval in milliseconds
    #[arg(long, default_value = "1000")]
    snapshot_ms: u64,

    /// Seed for the per-worker RNG streams
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Strategy to run
    #[arg(short = 'S', long, value_enum, default_value = "all")]
    strategy: StrategyArg,

    /// Verbose output (engine debug events)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    Unsynchronized,
    GlobalLock,
    CellLocks,
    All,
}

impl StrategyArg {
    fn kinds(self) -> Vec<StrategyKind> {
        match self {
            Self::Unsynchronized => vec![StrategyKind::Unsynchronized],
            Self::GlobalLock => vec![StrategyKind::GlobalLock],
            Self::CellLocks => vec![StrategyKind::CellLocks],
            Self::All => StrategyKind::ALL.to_vec(),
        }
    }
}

/// Renders the report hooks the way the lab has always printed them:
/// an index row and a value row per snapshot, a pass/fail integrity line,
/// and a thousands-separated tick total.
struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn snapshot(&self, cells: &[i64]) {
        let mut out = String::from("Snapshot:\n");
        for index in 0..cells.len() {
            out.push_str(&format!("{index:>4} "));
        }
        out.push('\n');
        for value in cells {
            out.push_str(&format!("{value:>4} "));
        }
        out.push('\n');
        println!("{out}");
    }

    fn integrity(&self, sum: i64, expected: i64, passed: bool) {
        if passed {
            println!("Integrity check passed ( {sum} == {expected} )");
        } else {
            println!("Integrity check failed ( {sum} != {expected} )");
        }
    }

    fn ticks(&self, total: u64) {
        println!("Ticks performed: {}\n", group_digits(total));
    }
}

/// Group a decimal rendering into threes: `1234567` → `1,234,567`.
fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("failed to set tracing subscriber");

    let config = SimConfig {
        cells: args.cells,
        particles: args.particles,
        move_probability: args.move_probability,
        tick_period: Duration::from_micros(args.tick_micros),
        snapshot_period: Duration::from_millis(args.snapshot_ms),
        seed: args.seed,
    };
    let duration = Duration::from_millis(args.duration_ms);

    for kind in args.strategy.kinds() {
        println!("Strategy: {kind}");

        let sim = match Simulation::new(config.clone(), kind) {
            Ok(sim) => sim,
            Err(e) => {
                eprintln!("invalid configuration: {e}");
                std::process::exit(2);
            }
        };
        let report = sim
            .run(duration, &ConsoleReporter)
            .expect("fresh simulation cannot already be running");

        println!(
            "Simulation done in {:.1} seconds\n",
            report.elapsed.as_secs_f64()
        );
    }

    println!("Finished");
}
