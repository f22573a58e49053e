//! N×N board storage.

use crate::{Cell, GameError, GameErrorKind, GameResult, Mark};
use tracing::{instrument, warn};

/// Square board of cells in row-major order.
///
/// Cells are addressed by a 1-based index in `1..=size²`; the offset into
/// storage is `index - 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates an empty board with `size` rows and columns.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidBoardSize`] when `size` is zero.
    #[instrument]
    pub fn new(size: usize) -> GameResult<Self> {
        if size == 0 {
            return Err(GameError::new(GameErrorKind::InvalidBoardSize(size)));
        }
        Ok(Self {
            size,
            cells: vec![Cell::Empty; size * size],
        })
    }

    /// Returns the number of rows (and columns).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Gets the cell at the given 1-based index.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::OutOfRange`] outside `1..=cell_count()`.
    #[track_caller]
    pub fn cell_at(&self, index: usize) -> GameResult<Cell> {
        let offset = self.offset(index)?;
        Ok(self.cells[offset])
    }

    /// Places a mark at the given 1-based index.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::OutOfRange`] for a bad index and
    /// [`GameErrorKind::CellOccupied`] if the cell already holds a mark.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn place(&mut self, index: usize, mark: Mark) -> GameResult<()> {
        let offset = self.offset(index)?;
        if !self.cells[offset].is_empty() {
            warn!(index, ?mark, "Refusing to overwrite occupied cell");
            return Err(GameError::new(GameErrorKind::CellOccupied { index }));
        }
        self.cells[offset] = Cell::Marked(mark);
        Ok(())
    }

    /// Checks whether the index is on the board and still empty.
    pub fn is_available(&self, index: usize) -> bool {
        matches!(self.cell_at(index), Ok(Cell::Empty))
    }

    /// Returns the indices of all empty cells, ascending.
    pub fn available_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(offset, _)| offset + 1)
            .collect()
    }

    /// Checks if every cell holds a mark.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Counts the cells held by `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Cell::Marked(mark))
            .count()
    }

    /// Iterates over rows, each a slice of `size` cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    #[track_caller]
    fn offset(&self, index: usize) -> GameResult<usize> {
        if index == 0 || index > self.cells.len() {
            return Err(GameError::new(GameErrorKind::OutOfRange {
                index,
                cells: self.cells.len(),
            }));
        }
        Ok(index - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(3).unwrap();
        assert_eq!(board.cell_count(), 9);
        assert_eq!(board.available_indices(), (1..=9).collect::<Vec<_>>());
        assert!(!board.is_full());
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = Board::new(0).unwrap_err();
        assert_eq!(err.kind(), &GameErrorKind::InvalidBoardSize(0));
    }

    #[test]
    fn test_cell_at_out_of_range() {
        let board = Board::new(3).unwrap();
        for index in [0, 10, 100] {
            assert!(matches!(
                board.cell_at(index).unwrap_err().kind(),
                GameErrorKind::OutOfRange { cells: 9, .. }
            ));
        }
    }

    #[test]
    fn test_place_and_lookup() {
        let mut board = Board::new(3).unwrap();
        board.place(5, Mark::A).unwrap();
        assert_eq!(board.cell_at(5).unwrap(), Cell::Marked(Mark::A));
        assert_eq!(board.cells()[4], Cell::Marked(Mark::A));
        assert!(!board.is_available(5));
        assert_eq!(board.count(Mark::A), 1);
        assert_eq!(board.count(Mark::B), 0);
    }

    #[test]
    fn test_place_twice_is_occupied() {
        let mut board = Board::new(3).unwrap();
        board.place(1, Mark::A).unwrap();
        let err = board.place(1, Mark::B).unwrap_err();
        assert_eq!(err.kind(), &GameErrorKind::CellOccupied { index: 1 });
        assert_eq!(board.cell_at(1).unwrap(), Cell::Marked(Mark::A));
    }

    #[test]
    fn test_available_indices_ascending_after_moves() {
        let mut board = Board::new(3).unwrap();
        for index in [9, 1, 5] {
            board.place(index, Mark::B).unwrap();
        }
        assert_eq!(board.available_indices(), vec![2, 3, 4, 6, 7, 8]);
    }

    #[test]
    fn test_distinct_moves_never_collide() {
        for size in 1..=5 {
            let mut board = Board::new(size).unwrap();
            let cells = size * size;
            // Stride through the board so the order is not simply ascending.
            let order: Vec<usize> = (0..cells).map(|i| (i * 7) % cells + 1).collect();
            let mut unique = order.clone();
            unique.sort_unstable();
            unique.dedup();
            if unique.len() != cells {
                continue;
            }
            for (n, index) in order.into_iter().enumerate() {
                let mark = if n % 2 == 0 { Mark::A } else { Mark::B };
                board.place(index, mark).unwrap();
            }
            assert!(board.is_full());
        }
    }

    #[test]
    fn test_rows() {
        let mut board = Board::new(2).unwrap();
        board.place(3, Mark::B).unwrap();
        let rows: Vec<_> = board.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], &[Cell::Marked(Mark::B), Cell::Empty]);
    }
}
