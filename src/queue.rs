use std::sync::atomic::{AtomicU64, Ordering};

use crate::{input::PuzzleInput, output::OutputBuffer};

/// Shared state of one batch run: the immutable puzzle view, the
/// pre-formatted output buffer, and the three atomic counters that drive the
/// claim protocol. The counters are 64-bit so large batches cannot wrap.
#[derive(Debug)]
pub struct WorkQueue<'a> {
    pub input: &'a PuzzleInput,
    pub output: &'a OutputBuffer,
    next_puzzle: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
}

impl<'a> WorkQueue<'a> {
    pub fn new(input: &'a PuzzleInput, output: &'a OutputBuffer) -> Self {
        Self {
            input,
            output,
            next_puzzle: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }

    /// Claims the next unprocessed puzzle index. The fetch-and-add gives a
    /// total order on claims, so every index is handed out exactly once.
    /// `None` means the batch is drained and the worker should exit.
    pub fn claim(&self) -> Option<u64> {
        let claim = self.next_puzzle.fetch_add(1, Ordering::Relaxed);

        (claim < self.total()).then_some(claim)
    }

    pub fn record_success(&self) {
        self.completed.fetch_add(1, Ordering::Release);
    }

    /// A failed puzzle still counts as completed; the completion counter is
    /// what the driver's termination condition watches.
    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Release);
        self.completed.fetch_add(1, Ordering::Release);
    }

    pub fn total(&self) -> u64 {
        self.input.total_puzzles()
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Acquire)
    }
}
