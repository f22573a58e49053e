//! Uniform random player.

use super::{MoveSource, TurnContext};
use crate::{GameError, GameErrorKind, GameResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

/// Picks uniformly among the available cells.
#[derive(Debug)]
pub struct RandomMoveSource {
    name: String,
    rng: StdRng,
}

impl RandomMoveSource {
    /// Creates a random player seeded from the operating system.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible random player.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

/// Draws one index uniformly from `available`.
pub(crate) fn pick_uniform(rng: &mut StdRng, available: &[usize], name: &str) -> GameResult<usize> {
    if available.is_empty() {
        return Err(GameError::new(GameErrorKind::SourceExhausted(name.to_string())));
    }
    Ok(available[rng.random_range(0..available.len())])
}

#[async_trait::async_trait]
impl MoveSource for RandomMoveSource {
    #[instrument(skip(self, turn), fields(player = %self.name, move_number = turn.move_number))]
    async fn next_move(
        &mut self,
        available: &[usize],
        turn: &TurnContext<'_>,
    ) -> GameResult<usize> {
        let index = pick_uniform(&mut self.rng, available, &self.name)?;
        debug!(index, "Random pick");
        Ok(index)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Mark, WinRuleSet};

    #[tokio::test]
    async fn test_random_picks_are_available() {
        let board = Board::new(3).unwrap();
        let rules = WinRuleSet::for_size(3);
        let turn = TurnContext {
            mark: Mark::A,
            name: "bot",
            move_number: 1,
            board: &board,
            rules: &rules,
        };
        let available = [2, 4, 8];
        let mut source = RandomMoveSource::seeded("bot", 7);
        for _ in 0..100 {
            let index = source.next_move(&available, &turn).await.unwrap();
            assert!(available.contains(&index));
        }
    }

    #[tokio::test]
    async fn test_same_seed_same_choices() {
        let board = Board::new(3).unwrap();
        let rules = WinRuleSet::for_size(3);
        let turn = TurnContext {
            mark: Mark::B,
            name: "bot",
            move_number: 1,
            board: &board,
            rules: &rules,
        };
        let available: Vec<usize> = (1..=9).collect();
        let mut first = RandomMoveSource::seeded("bot", 42);
        let mut second = RandomMoveSource::seeded("bot", 42);
        for _ in 0..20 {
            assert_eq!(
                first.next_move(&available, &turn).await.unwrap(),
                second.next_move(&available, &turn).await.unwrap()
            );
        }
    }

    #[test]
    fn test_empty_available_is_exhausted() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = pick_uniform(&mut rng, &[], "bot").unwrap_err();
        assert!(matches!(err.kind(), GameErrorKind::SourceExhausted(_)));
    }
}
