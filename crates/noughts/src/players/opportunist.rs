//! Random player that never misses an immediate win.

use super::random::pick_uniform;
use super::{MoveSource, TurnContext};
use crate::GameResult;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

/// Takes a winning cell when one exists, otherwise plays uniformly at random.
///
/// Only the current move is examined; there is no lookahead and no blocking
/// of the opponent.
#[derive(Debug)]
pub struct OpportunistMoveSource {
    name: String,
    rng: StdRng,
}

impl OpportunistMoveSource {
    /// Creates an opportunist seeded from the operating system.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible opportunist.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

/// Returns the lowest available index that completes a line for the mover.
fn winning_index(available: &[usize], turn: &TurnContext<'_>) -> Option<usize> {
    available.iter().copied().find(|&index| {
        let mut board = turn.board.clone();
        board.place(index, turn.mark).is_ok() && turn.rules.is_winning(&board, turn.mark)
    })
}

#[async_trait::async_trait]
impl MoveSource for OpportunistMoveSource {
    #[instrument(skip(self, turn), fields(player = %self.name, move_number = turn.move_number))]
    async fn next_move(
        &mut self,
        available: &[usize],
        turn: &TurnContext<'_>,
    ) -> GameResult<usize> {
        if let Some(index) = winning_index(available, turn) {
            debug!(index, "Taking winning cell");
            return Ok(index);
        }
        let index = pick_uniform(&mut self.rng, available, &self.name)?;
        debug!(index, "No win available, random pick");
        Ok(index)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
