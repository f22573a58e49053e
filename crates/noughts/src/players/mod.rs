//! Move sources: the capabilities that pick a cell for each turn.

mod opportunist;
mod random;
mod scripted;
mod shuffled;

pub use opportunist::OpportunistMoveSource;
pub use random::RandomMoveSource;
pub use scripted::ScriptedMoveSource;
pub use shuffled::ShuffledMoveSource;

use crate::{Board, GameResult, Mark, WinRuleSet};

/// What a move source may look at when choosing.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    /// Mark that is about to move.
    pub mark: Mark,
    /// Display name of the player to move.
    pub name: &'a str,
    /// 1-based number of the move being requested.
    pub move_number: usize,
    /// Current board.
    pub board: &'a Board,
    /// Rules the board is judged by.
    pub rules: &'a WinRuleSet,
}

/// Trait for anything that can supply moves.
///
/// Implementations must return a member of `available`. The round
/// controller rejects anything else with
/// [`GameErrorKind::InvalidMove`](crate::GameErrorKind::InvalidMove).
#[async_trait::async_trait]
pub trait MoveSource: Send {
    /// Gets the next move for this player.
    ///
    /// `available` is never empty and is sorted ascending.
    async fn next_move(&mut self, available: &[usize], turn: &TurnContext<'_>)
    -> GameResult<usize>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
