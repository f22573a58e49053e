//! Player that works through a shuffled order of cells.

use super::{MoveSource, TurnContext};
use crate::{GameError, GameErrorKind, GameResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Shuffles every cell index once per board and plays the first one still
/// open on each turn.
///
/// A new permutation is drawn whenever the board comes back with more open
/// cells than on the previous turn, which is how a fresh round shows up.
#[derive(Debug)]
pub struct ShuffledMoveSource {
    name: String,
    rng: StdRng,
    order: Vec<usize>,
    last_open: usize,
}

impl ShuffledMoveSource {
    /// Creates a shuffling player seeded from the operating system.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_rng(name.into(), StdRng::from_os_rng())
    }

    /// Creates a reproducible shuffling player.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(name.into(), StdRng::seed_from_u64(seed))
    }

    fn with_rng(name: String, rng: StdRng) -> Self {
        Self {
            name,
            rng,
            order: Vec::new(),
            last_open: 0,
        }
    }

    fn reshuffle(&mut self, cells: usize) {
        self.order = (1..=cells).collect();
        self.order.shuffle(&mut self.rng);
        debug!(player = %self.name, order = ?self.order, "Shuffled move order");
    }
}

#[async_trait::async_trait]
impl MoveSource for ShuffledMoveSource {
    #[instrument(skip(self, turn), fields(player = %self.name, move_number = turn.move_number))]
    async fn next_move(
        &mut self,
        available: &[usize],
        turn: &TurnContext<'_>,
    ) -> GameResult<usize> {
        let cells = turn.board.cell_count();
        if self.order.len() != cells || available.len() >= self.last_open {
            self.reshuffle(cells);
        }
        self.last_open = available.len();

        let index = self
            .order
            .iter()
            .copied()
            .find(|index| available.contains(index))
            .ok_or_else(|| GameError::new(GameErrorKind::SourceExhausted(self.name.clone())))?;
        debug!(index, "Next cell in shuffled order");
        Ok(index)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
