//! Win rules for noughts.
//!
//! A win is a line of cells all holding the same mark. Lines are derived
//! from the board size once and never change, so the rule set is pure data
//! that engines clone from the match that built it.

use crate::{Board, Cell, Mark};
use tracing::instrument;

/// Precomputed winning lines for one board size.
///
/// Lines are ordered rows (top to bottom), columns (left to right), the
/// main diagonal, then the anti-diagonal. Each line holds 1-based indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinRuleSet {
    size: usize,
    lines: Vec<Vec<usize>>,
}

impl WinRuleSet {
    /// Builds the `2 * size + 2` lines for a `size`×`size` board.
    #[instrument]
    pub fn for_size(size: usize) -> Self {
        let index = |row: usize, col: usize| row * size + col + 1;
        let mut lines = Vec::with_capacity(2 * size + 2);

        for row in 0..size {
            lines.push((0..size).map(|col| index(row, col)).collect());
        }
        for col in 0..size {
            lines.push((0..size).map(|row| index(row, col)).collect());
        }
        lines.push((0..size).map(|i| index(i, i)).collect());
        lines.push((0..size).map(|i| index(i, size - 1 - i)).collect());

        Self { size, lines }
    }

    /// Returns the board size these rules were built for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns all lines.
    pub fn lines(&self) -> &[Vec<usize>] {
        &self.lines
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the rule set has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Checks if any line is entirely held by `mark`.
    #[instrument(skip(board))]
    pub fn is_winning(&self, board: &Board, mark: Mark) -> bool {
        self.winning_line(board, mark).is_some()
    }

    /// Returns the first line entirely held by `mark`, in evaluation order.
    pub fn winning_line(&self, board: &Board, mark: Mark) -> Option<&[usize]> {
        let cells = board.cells();
        self.lines
            .iter()
            .find(|line| {
                line.iter()
                    .all(|&index| cells.get(index - 1) == Some(&Cell::Marked(mark)))
            })
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(size: usize, cells: &[(usize, Mark)]) -> Board {
        let mut board = Board::new(size).unwrap();
        for &(index, mark) in cells {
            board.place(index, mark).unwrap();
        }
        board
    }

    #[test]
    fn test_classic_lines() {
        let rules = WinRuleSet::for_size(3);
        let expected: Vec<Vec<usize>> = vec![
            vec![1, 2, 3],
            vec![4, 5, 6],
            vec![7, 8, 9],
            vec![1, 4, 7],
            vec![2, 5, 8],
            vec![3, 6, 9],
            vec![1, 5, 9],
            vec![3, 5, 7],
        ];
        assert_eq!(rules.lines(), expected.as_slice());
    }

    #[test]
    fn test_line_shape_for_all_sizes() {
        for size in 1..=8 {
            let rules = WinRuleSet::for_size(size);
            assert_eq!(rules.len(), 2 * size + 2);
            assert!(rules.lines().iter().all(|line| line.len() == size));
            for index in 1..=size * size {
                assert!(
                    rules.lines().iter().any(|line| line.contains(&index)),
                    "index {} of size {} is in no line",
                    index,
                    size
                );
            }
        }
    }

    #[test]
    fn test_empty_board_never_wins() {
        let rules = WinRuleSet::for_size(3);
        let board = Board::new(3).unwrap();
        assert!(!rules.is_winning(&board, Mark::A));
        assert!(!rules.is_winning(&board, Mark::B));
    }

    #[test]
    fn test_anti_diagonal_on_four_by_four() {
        let rules = WinRuleSet::for_size(4);
        let board = board_with(4, &[(4, Mark::B), (7, Mark::B), (10, Mark::B), (13, Mark::B)]);
        assert!(rules.is_winning(&board, Mark::B));
        assert!(!rules.is_winning(&board, Mark::A));
        assert_eq!(rules.winning_line(&board, Mark::B), Some(&[4, 7, 10, 13][..]));
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let rules = WinRuleSet::for_size(3);
        let board = board_with(3, &[(1, Mark::A), (2, Mark::A), (3, Mark::B)]);
        assert!(!rules.is_winning(&board, Mark::A));
        assert!(!rules.is_winning(&board, Mark::B));
    }

    #[test]
    fn test_first_line_in_order_is_reported() {
        let rules = WinRuleSet::for_size(3);
        // Top row and left column both complete.
        let board = board_with(
            3,
            &[(1, Mark::A), (2, Mark::A), (3, Mark::A), (4, Mark::A), (7, Mark::A)],
        );
        assert_eq!(rules.winning_line(&board, Mark::A), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn test_single_cell_board() {
        let rules = WinRuleSet::for_size(1);
        assert_eq!(rules.len(), 4);
        let board = board_with(1, &[(1, Mark::A)]);
        assert!(rules.is_winning(&board, Mark::A));
    }
}
