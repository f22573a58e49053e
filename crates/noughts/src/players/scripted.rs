//! Player that replays a fixed list of moves.

use super::{MoveSource, TurnContext};
use crate::{GameError, GameErrorKind, GameResult};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Replays indices in order, one per turn.
///
/// The script is returned as-is, so an index that is no longer available
/// reaches the engine and is rejected there.
#[derive(Debug, Clone)]
pub struct ScriptedMoveSource {
    name: String,
    moves: VecDeque<usize>,
}

impl ScriptedMoveSource {
    /// Creates a scripted player.
    pub fn new(name: impl Into<String>, moves: impl IntoIterator<Item = usize>) -> Self {
        Self {
            name: name.into(),
            moves: moves.into_iter().collect(),
        }
    }
}

#[async_trait::async_trait]
impl MoveSource for ScriptedMoveSource {
    #[instrument(
        skip(self, _available, turn),
        fields(player = %self.name, move_number = turn.move_number)
    )]
    async fn next_move(
        &mut self,
        _available: &[usize],
        turn: &TurnContext<'_>,
    ) -> GameResult<usize> {
        let index = self
            .moves
            .pop_front()
            .ok_or_else(|| GameError::new(GameErrorKind::SourceExhausted(self.name.clone())))?;
        debug!(index, remaining = self.moves.len(), "Scripted move");
        Ok(index)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
