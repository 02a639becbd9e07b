use std::{cell::UnsafeCell, fs, path::Path, slice};

use crate::{dlx::CELLS, error::BatchError, input::PuzzleInput};

/// `<puzzle>','<solution>'\n'`
pub const RECORD_SIZE: usize = 2 * CELLS + 2;
const SOLUTION_OFFSET: usize = CELLS + 1;

/// Pre-formatted output buffer shared by all workers.
///
/// The driver lays out the complete file up front: the header verbatim, then
/// one record per puzzle with the puzzle bytes in both the puzzle and the
/// solution position. Workers only ever touch the 81-byte solution slot of
/// the records they have claimed, so the ranges handed out are disjoint and
/// no synchronization is needed on the buffer itself.
#[derive(Debug)]
pub struct OutputBuffer {
    bytes: UnsafeCell<Box<[u8]>>,
    header_size: usize,
    total_puzzles: u64,
}

// Disjointness of the slot ranges is what makes the shared mutation sound;
// see `solution_slot`.
unsafe impl Sync for OutputBuffer {}

impl OutputBuffer {
    /// Builds the pre-populated buffer for `input`. Record lines always end
    /// in `'\n'` regardless of the input terminator.
    pub fn prepare(input: &PuzzleInput) -> Self {
        let header = input.header();
        let total = input.total_puzzles();
        let size = header.len() + total as usize * RECORD_SIZE;

        let mut bytes = vec![0u8; size].into_boxed_slice();
        bytes[..header.len()].copy_from_slice(header);

        for i in 0..total {
            let puzzle = input.puzzle(i);
            let record = &mut bytes[header.len() + i as usize * RECORD_SIZE..][..RECORD_SIZE];

            record[..CELLS].copy_from_slice(puzzle);
            record[CELLS] = b',';
            record[SOLUTION_OFFSET..SOLUTION_OFFSET + CELLS].copy_from_slice(puzzle);
            record[RECORD_SIZE - 1] = b'\n';
        }

        Self {
            bytes: UnsafeCell::new(bytes),
            header_size: header.len(),
            total_puzzles: total,
        }
    }

    /// Returns the mutable 81-byte solution slot of record `index`.
    ///
    /// # Safety
    ///
    /// The caller must hold the unique claim on `index` (one successful
    /// `WorkQueue::claim` hands out each index exactly once), so no two live
    /// slices ever overlap.
    pub unsafe fn solution_slot(&self, index: u64) -> &mut [u8] {
        debug_assert!(index < self.total_puzzles);

        let offset = self.header_size + index as usize * RECORD_SIZE + SOLUTION_OFFSET;
        let base = (*self.bytes.get()).as_mut_ptr();

        slice::from_raw_parts_mut(base.add(offset), CELLS)
    }

    /// Persists the buffer to `path`, creating or truncating the file.
    pub fn persist(self, path: &Path) -> Result<(), BatchError> {
        fs::write(path, self.into_bytes()).map_err(|source| BatchError::OutputWrite {
            path: path.to_owned(),
            source,
        })
    }

    /// Consumes the buffer, which requires all slot borrows to have ended.
    pub fn into_bytes(self) -> Box<[u8]> {
        self.bytes.into_inner()
    }
}
