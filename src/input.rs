use std::{fs, path::Path, str};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{dlx::CELLS, error::BatchError};

/// Shape of a single record's cell bytes. Only the first record is validated;
/// the hot loop trusts the framing after that.
static PUZZLE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{81}$").expect("Invalid puzzle line regex"));

/// Parsed view of a puzzle collection file.
///
/// Line 1 is an arbitrary header; every following line is 81 ASCII cell bytes
/// plus the line terminator. The terminator width (LF or CRLF) is detected
/// from the header and assumed uniform, giving a fixed record stride.
#[derive(Debug)]
pub struct PuzzleInput {
    bytes: Vec<u8>,
    header_size: usize,
    line_end_size: usize,
    total_puzzles: u64,
}

impl PuzzleInput {
    pub fn load(path: &Path) -> Result<Self, BatchError> {
        let bytes = fs::read(path).map_err(|source| BatchError::InputRead {
            path: path.to_owned(),
            source,
        })?;

        Self::parse(bytes)
    }

    /// Frames an in-memory collection: locates the header, detects the line
    /// terminator, and derives the puzzle count from the remaining length.
    pub fn parse(bytes: Vec<u8>) -> Result<Self, BatchError> {
        let newline = bytes
            .iter()
            .position(|&b| b == b'\n')
            .ok_or_else(|| BatchError::MalformedInput("Missing header line".to_owned()))?;

        let line_end_size = if newline > 0 && bytes[newline - 1] == b'\r' {
            2
        } else {
            1
        };
        let header_size = newline + 1;
        let stride = CELLS + line_end_size;

        let remaining = bytes.len() - header_size;
        let total_puzzles = (remaining.div_ceil(stride)) as u64;

        if total_puzzles > 0 {
            // A trailing partial line is tolerated only when its 81 cell
            // bytes are all present
            let last_offset = (total_puzzles as usize - 1) * stride;

            if last_offset + CELLS > remaining {
                return Err(BatchError::MalformedInput(
                    "Final record is missing cell bytes".to_owned(),
                ));
            }

            let first = &bytes[header_size..header_size + CELLS];
            let valid = str::from_utf8(first)
                .map(|line| PUZZLE_LINE.is_match(line))
                .unwrap_or(false);

            if !valid {
                return Err(BatchError::MalformedInput(
                    "First record is not an 81-digit puzzle line".to_owned(),
                ));
            }
        }

        Ok(Self {
            bytes,
            header_size,
            line_end_size,
            total_puzzles,
        })
    }

    /// Header bytes verbatim, terminator included.
    pub fn header(&self) -> &[u8] {
        &self.bytes[..self.header_size]
    }

    /// The 81 cell bytes of puzzle `index`.
    pub fn puzzle(&self, index: u64) -> &[u8] {
        let offset = self.header_size + index as usize * self.stride();
        &self.bytes[offset..offset + CELLS]
    }

    pub fn stride(&self) -> usize {
        CELLS + self.line_end_size
    }

    pub fn total_puzzles(&self) -> u64 {
        self.total_puzzles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE: &str =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn frames_lf_collection() {
        let raw = format!("puzzles\n{}\n{}\n", PUZZLE, PUZZLE);
        let input = PuzzleInput::parse(raw.into_bytes()).unwrap();

        assert_eq!(input.header(), b"puzzles\n");
        assert_eq!(input.stride(), 82);
        assert_eq!(input.total_puzzles(), 2);
        assert_eq!(input.puzzle(1), PUZZLE.as_bytes());
    }

    #[test]
    fn frames_crlf_collection() {
        let raw = format!("puzzles\r\n{}\r\n", PUZZLE);
        let input = PuzzleInput::parse(raw.into_bytes()).unwrap();

        assert_eq!(input.header(), b"puzzles\r\n");
        assert_eq!(input.stride(), 83);
        assert_eq!(input.total_puzzles(), 1);
        assert_eq!(input.puzzle(0), PUZZLE.as_bytes());
    }

    #[test]
    fn tolerates_missing_final_terminator() {
        let raw = format!("puzzles\n{}", PUZZLE);
        let input = PuzzleInput::parse(raw.into_bytes()).unwrap();

        assert_eq!(input.total_puzzles(), 1);
        assert_eq!(input.puzzle(0), PUZZLE.as_bytes());
    }

    #[test]
    fn rejects_headerless_input() {
        assert!(matches!(
            PuzzleInput::parse(b"no terminator here".to_vec()),
            Err(BatchError::MalformedInput(_))
        ));
    }

    #[test]
    fn rejects_truncated_final_record() {
        let raw = format!("puzzles\n{}\n12345", PUZZLE);

        assert!(matches!(
            PuzzleInput::parse(raw.into_bytes()),
            Err(BatchError::MalformedInput(_))
        ));
    }

    #[test]
    fn rejects_non_digit_first_record() {
        let raw = format!("puzzles\n{}x\n", &PUZZLE[..80]);

        assert!(matches!(
            PuzzleInput::parse(raw.into_bytes()),
            Err(BatchError::MalformedInput(_))
        ));
    }

    #[test]
    fn empty_collection_has_no_puzzles() {
        let input = PuzzleInput::parse(b"puzzles,solutions\n".to_vec()).unwrap();
        assert_eq!(input.total_puzzles(), 0);
    }
}
