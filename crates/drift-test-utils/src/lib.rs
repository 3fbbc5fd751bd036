//! Test utilities for Drift development.
//!
//! Provides a [`RecordingReporter`] that captures the controller's report
//! stream for assertions, and canned configurations for fast test runs.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::time::Duration;

use crossbeam_channel::{unbounded, Receiver, Sender};
use drift_engine::{Reporter, SimConfig};

/// One captured report hook invocation, in call order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReportEvent {
    Snapshot(Vec<i64>),
    Integrity {
        sum: i64,
        expected: i64,
        passed: bool,
    },
    Ticks(u64),
}

/// Captures the report stream through a channel.
///
/// The controller sends from its own thread; the test drains afterwards
/// with [`drain`](RecordingReporter::drain). Events come out in call order.
pub struct RecordingReporter {
    tx: Sender<ReportEvent>,
    rx: Receiver<ReportEvent>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Collect every event recorded so far.
    pub fn drain(&self) -> Vec<ReportEvent> {
        self.rx.try_iter().collect()
    }
}

impl Default for RecordingReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for RecordingReporter {
    fn snapshot(&self, cells: &[i64]) {
        let _ = self.tx.send(ReportEvent::Snapshot(cells.to_vec()));
    }

    fn integrity(&self, sum: i64, expected: i64, passed: bool) {
        let _ = self.tx.send(ReportEvent::Integrity {
            sum,
            expected,
            passed,
        });
    }

    fn ticks(&self, total: u64) {
        let _ = self.tx.send(ReportEvent::Ticks(total));
    }
}

/// Small, fast configuration for integration tests: 8 cells, 16 workers,
/// yield-only ticks, 50 ms snapshots.
pub fn test_config() -> SimConfig {
    SimConfig {
        cells: 8,
        particles: 16,
        move_probability: 0.5,
        tick_period: Duration::ZERO,
        snapshot_period: Duration::from_millis(50),
        seed: 42,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_call_order() {
        let reporter = RecordingReporter::new();
        reporter.snapshot(&[1, 2]);
        reporter.integrity(3, 3, true);
        reporter.ticks(99);

        let events = reporter.drain();
        assert_eq!(
            events,
            vec![
                ReportEvent::Snapshot(vec![1, 2]),
                ReportEvent::Integrity {
                    sum: 3,
                    expected: 3,
                    passed: true
                },
                ReportEvent::Ticks(99),
            ]
        );
    }

    #[test]
    fn drain_empties_the_buffer() {
        let reporter = RecordingReporter::new();
        reporter.ticks(1);
        assert_eq!(reporter.drain().len(), 1);
        assert!(reporter.drain().is_empty());
    }

    #[test]
    fn test_config_is_valid() {
        assert!(test_config().validate().is_ok());
    }
}
