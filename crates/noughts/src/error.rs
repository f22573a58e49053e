//! Game error types.

use crate::Mark;
use derive_more::{Display, Error};
use tracing::instrument;

/// Specific failure behind a [`GameError`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GameErrorKind {
    /// A cell index outside `1..=cells` was used.
    #[display("Cell {} is out of range (1-{})", index, cells)]
    OutOfRange {
        /// Offending index.
        index: usize,
        /// Number of cells on the board.
        cells: usize,
    },

    /// A mark was placed on a cell that already holds one.
    #[display("Cell {} is already occupied", index)]
    CellOccupied {
        /// Offending index.
        index: usize,
    },

    /// A move source offered an index that is not currently available.
    #[display("Invalid move: {:?} cannot play cell {}", mark, index)]
    InvalidMove {
        /// Offending index.
        index: usize,
        /// Mark that tried to move.
        mark: Mark,
    },

    /// Boards need at least one row.
    #[display("Invalid board size: {}", _0)]
    InvalidBoardSize(usize),

    /// Both seats in a match carry the same name.
    #[display("Duplicate player name: {}", _0)]
    DuplicatePlayerName(String),

    /// The round already reached a terminal state.
    #[display("Round is already finished")]
    RoundFinished,

    /// A scripted move source ran out of moves.
    #[display("Move source '{}' has no moves left", _0)]
    SourceExhausted(String),

    /// Interactive input reached end of stream.
    #[display("Input closed")]
    InputClosed,

    /// Terminal or stream failure inside a collaborator.
    #[display("I/O error: {}", _0)]
    Io(String),
}

/// Game error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Game error: {} at {}:{}", kind, file, line)]
pub struct GameError {
    /// What went wrong.
    pub kind: GameErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl GameError {
    /// Creates a new game error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: GameErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &GameErrorKind {
        &self.kind
    }
}

impl From<std::io::Error> for GameError {
    #[track_caller]
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::new(GameErrorKind::InputClosed)
        } else {
            Self::new(GameErrorKind::Io(err.to_string()))
        }
    }
}

/// Result alias for game operations.
pub type GameResult<T> = Result<T, GameError>;
