use std::{collections::HashSet, hash::Hash};

use crate::dlx::{CELLS, SIZE, UNKNOWN_CELL};

const BOX_COUNT: usize = 3;

/// Checks for default Sudoku constraints, i.e. all digits on the same row, column, and 3x3 square
/// of the 81-byte board are unique. Unknown cells are ignored, so the check applies to partial
/// and completed boards alike.
pub fn check_default_constraints(board: &[u8]) -> bool {
    debug_assert_eq!(board.len(), CELLS);

    (0..SIZE).all(|i| check_row(board, i))
        && (0..SIZE).all(|j| check_col(board, j))
        && (0..BOX_COUNT).all(|br| (0..BOX_COUNT).all(|bc| check_square(board, br, bc)))
}

/// Returns `true` when the board has no unknown cells left.
pub fn is_complete(board: &[u8]) -> bool {
    board.iter().all(|&cell| cell != UNKNOWN_CELL)
}

fn check_row(board: &[u8], row_idx: usize) -> bool {
    has_unique_items(
        board[row_idx * SIZE..(row_idx + 1) * SIZE]
            .iter()
            .filter(|&&x| x != UNKNOWN_CELL),
    )
}

fn check_col(board: &[u8], col_idx: usize) -> bool {
    has_unique_items(
        board
            .iter()
            .skip(col_idx)
            .step_by(SIZE)
            .filter(|&&x| x != UNKNOWN_CELL),
    )
}

fn check_square(board: &[u8], br_idx: usize, bc_idx: usize) -> bool {
    let square = board
        .chunks(SIZE)
        .skip(br_idx * 3)
        .take(3)
        .flat_map(|row| row.iter().skip(bc_idx * 3).take(3))
        .filter(|&x| x != &UNKNOWN_CELL);

    has_unique_items(square)
}

pub fn has_unique_items<T>(iter: T) -> bool
where
    T: IntoIterator,
    T::Item: Eq + Hash,
{
    let mut uniq = HashSet::new();
    iter.into_iter().all(move |x| uniq.insert(x))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLVED: &[u8] =
        b"534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    #[test]
    fn solved_board_is_valid_and_complete() {
        assert!(check_default_constraints(SOLVED));
        assert!(is_complete(SOLVED));
    }

    #[test]
    fn duplicate_in_row_is_rejected() {
        let mut board = vec![UNKNOWN_CELL; CELLS];
        board[0] = b'5';
        board[8] = b'5';
        assert!(!check_default_constraints(&board));
    }

    #[test]
    fn duplicate_in_column_is_rejected() {
        let mut board = vec![UNKNOWN_CELL; CELLS];
        board[0] = b'5';
        board[8 * SIZE] = b'5';
        assert!(!check_default_constraints(&board));
    }

    #[test]
    fn duplicate_in_square_is_rejected() {
        // Same 3x3 square, different row and column
        let mut board = vec![UNKNOWN_CELL; CELLS];
        board[0] = b'5';
        board[SIZE + 1] = b'5';
        assert!(!check_default_constraints(&board));
    }

    #[test]
    fn unknown_cells_are_ignored() {
        let mut board = SOLVED.to_vec();
        board[0] = UNKNOWN_CELL;
        board[40] = UNKNOWN_CELL;
        assert!(check_default_constraints(&board));
        assert!(!is_complete(&board));
    }
}
