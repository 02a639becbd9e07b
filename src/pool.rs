use log::{debug, info, warn};

use crate::{
    dlx::WorkOrder,
    input::PuzzleInput,
    output::OutputBuffer,
    queue::WorkQueue,
};

/// Counter snapshot taken after the pool has drained.
#[derive(Debug, Clone, Copy)]
pub struct BatchSummary {
    pub completed: u64,
    pub failed: u64,
}

/// Drains the whole batch across all usable cores: `num_cpus::get() - 1`
/// spawned workers plus the driver thread itself. Every thread owns one
/// `WorkOrder` and loops claim-build-solve-decode until the cursor runs past
/// the end; the scoped join doubles as the termination condition, since a
/// worker only exits once its claim exceeds the total.
pub fn run_batch(input: &PuzzleInput, output: &OutputBuffer) -> BatchSummary {
    let queue = WorkQueue::new(input, output);
    let spawned = num_cpus::get().saturating_sub(1);

    debug!("Running {} workers ({} spawned + driver)", spawned + 1, spawned);

    crossbeam::thread::scope(|s| {
        for _ in 0..spawned {
            let queue = &queue;

            s.spawn(move |_| solve_loop(queue, false));
        }

        solve_loop(&queue, true);
    })
    .expect("A solver worker thread panicked");

    debug_assert_eq!(queue.completed(), queue.total());

    BatchSummary {
        completed: queue.completed(),
        failed: queue.failed(),
    }
}

/// Claim-and-solve loop shared by the workers and the driver. The driver
/// additionally reports progress derived from the completion counter.
fn solve_loop(queue: &WorkQueue, report_progress: bool) {
    let mut order = WorkOrder::new();
    let total = queue.total();
    let mut last_decile = 0;

    while let Some(claim) = queue.claim() {
        let puzzle = queue.input.puzzle(claim);

        // Safety: `claim` came out of the atomic cursor, so this worker holds
        // the only reference to the slot
        let slot = unsafe { queue.output.solution_slot(claim) };
        slot.copy_from_slice(puzzle);

        if order.solve_in_place(slot) {
            queue.record_success();
        } else {
            warn!("Puzzle {} has no solution, leaving it unsolved", claim);
            queue.record_failure();
        }

        if report_progress {
            let decile = queue.completed() * 10 / total;

            if decile > last_decile {
                last_decile = decile;
                info!(
                    "Solved {}/{} puzzles ({}%)",
                    queue.completed(),
                    total,
                    decile * 10
                );
            }
        }
    }
}
