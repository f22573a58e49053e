//! Round controller: one board from first move to win or draw.
//!
//! The round alternates strictly between the two seats. The mark that moves
//! first is fixed when the round is built; after that, parity of the moves
//! already made decides whose turn it is. Victory is checked for the mover
//! only, straight after the move, so a move that fills the last cell and
//! completes a line is a win and never a draw.

use crate::{
    GameEngine, GameError, GameErrorKind, GameResult, Mark, Move, MoveSource, Renderer, SymbolMap,
    TurnContext,
};
use tracing::{debug, info, instrument};

/// Lifecycle of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Built but not run.
    NotStarted,
    /// Moves are being played.
    InProgress,
    /// A mark completed a line.
    Won(Mark),
    /// Board filled with no line.
    Drawn,
}

impl RoundState {
    /// Checks if no more moves can be played.
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundState::Won(_) | RoundState::Drawn)
    }
}

/// Result of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundOutcome {
    /// The mark completed a line.
    Won(Mark),
    /// Board filled with no line.
    Drawn,
}

impl RoundOutcome {
    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Mark> {
        match self {
            RoundOutcome::Won(mark) => Some(mark),
            RoundOutcome::Drawn => None,
        }
    }

    /// Returns true if the round was a draw.
    pub fn is_draw(self) -> bool {
        matches!(self, RoundOutcome::Drawn)
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundOutcome::Won(mark) => write!(f, "{:?} wins", mark),
            RoundOutcome::Drawn => write!(f, "Draw"),
        }
    }
}

/// Drives one round between two move sources.
pub struct Round<'a> {
    engine: GameEngine,
    first: Mark,
    player_a: &'a mut dyn MoveSource,
    player_b: &'a mut dyn MoveSource,
    state: RoundState,
    history: Vec<Move>,
}

impl<'a> Round<'a> {
    /// Creates a round on `engine` where `first` makes the opening move.
    pub fn new(
        engine: GameEngine,
        first: Mark,
        player_a: &'a mut dyn MoveSource,
        player_b: &'a mut dyn MoveSource,
    ) -> Self {
        Self {
            engine,
            first,
            player_a,
            player_b,
            state: RoundState::NotStarted,
            history: Vec::new(),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Returns the outcome once the round is over.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        match self.state {
            RoundState::Won(mark) => Some(RoundOutcome::Won(mark)),
            RoundState::Drawn => Some(RoundOutcome::Drawn),
            RoundState::NotStarted | RoundState::InProgress => None,
        }
    }

    /// Returns the mark whose turn it is.
    pub fn to_move(&self) -> Mark {
        if self.engine.moves_made() % 2 == 0 {
            self.first
        } else {
            self.first.opponent()
        }
    }

    /// Returns the engine.
    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns the display name bound to `mark`.
    pub fn player_name(&self, mark: Mark) -> &str {
        match mark {
            Mark::A => self.player_a.name(),
            Mark::B => self.player_b.name(),
        }
    }

    /// Plays the round to completion.
    ///
    /// The renderer sees the empty board once, then every applied move.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::RoundFinished`] if the round already ended,
    /// [`GameErrorKind::InvalidMove`] if a source picks an unavailable cell,
    /// and any error a source reports.
    #[instrument(skip_all, fields(first = ?self.first, size = self.engine.board().size()))]
    pub async fn run(
        &mut self,
        renderer: &mut dyn Renderer,
        symbols: &SymbolMap,
    ) -> GameResult<RoundOutcome> {
        if self.state.is_terminal() {
            return Err(GameError::new(GameErrorKind::RoundFinished));
        }
        if self.state == RoundState::NotStarted {
            info!(
                a = self.player_a.name(),
                b = self.player_b.name(),
                "Round started"
            );
            self.state = RoundState::InProgress;
            renderer.render(self.engine.board(), symbols);
        }

        let outcome = loop {
            let mark = self.to_move();
            let available = self.engine.available_indices();
            let source: &mut dyn MoveSource = match mark {
                Mark::A => &mut *self.player_a,
                Mark::B => &mut *self.player_b,
            };
            let name = source.name().to_string();
            let turn = TurnContext {
                mark,
                name: &name,
                move_number: self.history.len() + 1,
                board: self.engine.board(),
                rules: self.engine.rules(),
            };

            debug!(player = %name, ?mark, open = available.len(), "Requesting move");
            let index = source.next_move(&available, &turn).await?;
            self.engine.apply_move(index, mark)?;
            self.history.push(Move::new(mark, index));

            renderer.move_applied(&name, mark, index, symbols);
            renderer.render(self.engine.board(), symbols);

            if self.engine.check_victory(mark) {
                self.state = RoundState::Won(mark);
                break RoundOutcome::Won(mark);
            }
            if self.engine.available_indices().is_empty() {
                self.state = RoundState::Drawn;
                break RoundOutcome::Drawn;
            }
        };

        let winner = outcome.winner().map(|mark| self.player_name(mark).to_string());
        let line = outcome.winner().and_then(|mark| self.engine.winning_line(mark));
        info!(
            %outcome,
            moves = self.history.len(),
            winner = ?winner,
            line = ?line,
            "Round finished"
        );
        renderer.round_over(outcome, winner.as_deref(), line);
        Ok(outcome)
    }
}

impl std::fmt::Debug for Round<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Round")
            .field("engine", &self.engine)
            .field("first", &self.first)
            .field("player_a", &self.player_a.name())
            .field("player_b", &self.player_b.name())
            .field("state", &self.state)
            .field("history", &self.history)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NullRenderer, ScriptedMoveSource};

    async fn play(
        first: Mark,
        a: Vec<usize>,
        b: Vec<usize>,
    ) -> (GameResult<RoundOutcome>, Vec<Move>) {
        let mut a = ScriptedMoveSource::new("a", a);
        let mut b = ScriptedMoveSource::new("b", b);
        let engine = GameEngine::new(3).unwrap();
        let mut round = Round::new(engine, first, &mut a, &mut b);
        let result = round.run(&mut NullRenderer, &SymbolMap::default()).await;
        let history = round.history().to_vec();
        (result, history)
    }

    #[tokio::test]
    async fn test_first_mover_alternates() {
        let (result, history) = play(Mark::B, vec![2, 4, 8], vec![1, 3, 5, 9]).await;
        assert_eq!(result.unwrap(), RoundOutcome::Won(Mark::B));
        let marks: Vec<Mark> = history.iter().map(|m| m.mark).collect();
        assert_eq!(
            marks,
            vec![Mark::B, Mark::A, Mark::B, Mark::A, Mark::B, Mark::A, Mark::B]
        );
    }

    #[tokio::test]
    async fn test_win_stops_round() {
        let (result, history) = play(Mark::A, vec![1, 2, 3, 7], vec![4, 5, 9]).await;
        assert_eq!(result.unwrap(), RoundOutcome::Won(Mark::A));
        assert_eq!(history.len(), 5);
    }

    #[tokio::test]
    async fn test_invalid_move_rejected() {
        let (result, history) = play(Mark::A, vec![5, 5], vec![1]).await;
        let err = result.unwrap_err();
        assert_eq!(
            err.kind(),
            &GameErrorKind::InvalidMove {
                index: 5,
                mark: Mark::A
            }
        );
        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn test_finished_round_cannot_rerun() {
        let mut a = ScriptedMoveSource::new("a", [1, 2, 3]);
        let mut b = ScriptedMoveSource::new("b", [4, 5]);
        let engine = GameEngine::new(3).unwrap();
        let mut round = Round::new(engine, Mark::A, &mut a, &mut b);
        assert_eq!(round.state(), RoundState::NotStarted);
        round.run(&mut NullRenderer, &SymbolMap::default()).await.unwrap();
        assert_eq!(round.state(), RoundState::Won(Mark::A));
        let err = round
            .run(&mut NullRenderer, &SymbolMap::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), &GameErrorKind::RoundFinished);
    }
}
