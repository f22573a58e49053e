//! Game engine: board plus win rules.

use crate::{Board, GameError, GameErrorKind, GameResult, Mark, WinRuleSet};
use strum::IntoEnumIterator;
use tracing::{debug, instrument, warn};

/// Owns one board and the rules that judge it.
///
/// The engine is the only thing that mutates the board. It re-validates
/// every move even though controllers only offer available indices.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    rules: WinRuleSet,
    moves_made: usize,
}

impl GameEngine {
    /// Creates an engine with a fresh board and rules for `size`.
    #[instrument]
    pub fn new(size: usize) -> GameResult<Self> {
        let board = Board::new(size)?;
        Ok(Self {
            board,
            rules: WinRuleSet::for_size(size),
            moves_made: 0,
        })
    }

    /// Creates an engine with a fresh board for prebuilt rules.
    #[instrument(skip(rules), fields(size = rules.size()))]
    pub fn with_rules(rules: WinRuleSet) -> GameResult<Self> {
        let board = Board::new(rules.size())?;
        Ok(Self {
            board,
            rules,
            moves_made: 0,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the win rules.
    pub fn rules(&self) -> &WinRuleSet {
        &self.rules
    }

    /// Returns how many moves have been applied.
    pub fn moves_made(&self) -> usize {
        self.moves_made
    }

    /// Returns the indices still open for play, ascending.
    pub fn available_indices(&self) -> Vec<usize> {
        self.board.available_indices()
    }

    /// Applies `mark` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidMove`] if `index` is off the board or
    /// already taken. The board is left untouched in that case.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, index: usize, mark: Mark) -> GameResult<()> {
        if !self.board.is_available(index) {
            warn!(index, ?mark, "Rejecting move to unavailable cell");
            return Err(GameError::new(GameErrorKind::InvalidMove { index, mark }));
        }
        self.board.place(index, mark)?;
        self.moves_made += 1;
        debug!(index, ?mark, moves_made = self.moves_made, "Move applied");
        Ok(())
    }

    /// Checks whether `mark` holds a complete line.
    pub fn check_victory(&self, mark: Mark) -> bool {
        self.rules.is_winning(&self.board, mark)
    }

    /// Returns the first complete line held by `mark`.
    pub fn winning_line(&self, mark: Mark) -> Option<&[usize]> {
        self.rules.winning_line(&self.board, mark)
    }

    /// Checks for a full board with no winner.
    pub fn is_draw(&self) -> bool {
        self.board.is_full() && Mark::iter().all(|mark| !self.check_victory(mark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(engine: &mut GameEngine, moves: &[(usize, Mark)]) {
        for &(index, mark) in moves {
            engine.apply_move(index, mark).unwrap();
        }
    }

    #[test]
    fn test_apply_move_counts() {
        let mut engine = GameEngine::new(3).unwrap();
        play(&mut engine, &[(5, Mark::A), (1, Mark::B)]);
        assert_eq!(engine.moves_made(), 2);
        assert_eq!(engine.available_indices(), vec![2, 3, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn test_occupied_cell_is_invalid_move() {
        let mut engine = GameEngine::new(3).unwrap();
        play(&mut engine, &[(5, Mark::A)]);
        let before = engine.board().clone();
        let err = engine.apply_move(5, Mark::B).unwrap_err();
        assert_eq!(
            err.kind(),
            &GameErrorKind::InvalidMove {
                index: 5,
                mark: Mark::B
            }
        );
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.moves_made(), 1);
    }

    #[test]
    fn test_off_board_is_invalid_move() {
        let mut engine = GameEngine::new(3).unwrap();
        for index in [0, 10] {
            assert!(matches!(
                engine.apply_move(index, Mark::A).unwrap_err().kind(),
                GameErrorKind::InvalidMove { .. }
            ));
        }
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let mut engine = GameEngine::new(3).unwrap();
        // A B A / A B B / B A A
        play(
            &mut engine,
            &[
                (1, Mark::A),
                (2, Mark::B),
                (3, Mark::A),
                (5, Mark::B),
                (4, Mark::A),
                (6, Mark::B),
                (8, Mark::A),
                (7, Mark::B),
                (9, Mark::A),
            ],
        );
        assert!(!engine.check_victory(Mark::A));
        assert!(!engine.check_victory(Mark::B));
        assert!(engine.is_draw());
    }

    #[test]
    fn test_win_on_full_board_is_not_draw() {
        let mut engine = GameEngine::new(3).unwrap();
        // A B B / A B A / _ A B, then A fills the last cell to close the
        // left column.
        play(
            &mut engine,
            &[
                (1, Mark::A),
                (2, Mark::B),
                (4, Mark::A),
                (3, Mark::B),
                (6, Mark::A),
                (5, Mark::B),
                (8, Mark::A),
                (9, Mark::B),
            ],
        );
        assert!(!engine.check_victory(Mark::A));
        engine.apply_move(7, Mark::A).unwrap();
        assert!(engine.board().is_full());
        assert!(engine.check_victory(Mark::A));
        assert!(!engine.is_draw());
    }

    #[test]
    fn test_partial_board_is_not_draw() {
        let mut engine = GameEngine::new(3).unwrap();
        play(&mut engine, &[(1, Mark::A)]);
        assert!(!engine.is_draw());
    }

    #[test]
    fn test_with_rules_matches_size() {
        let engine = GameEngine::with_rules(WinRuleSet::for_size(4)).unwrap();
        assert_eq!(engine.board().cell_count(), 16);
        assert_eq!(engine.rules().len(), 10);
    }
}
