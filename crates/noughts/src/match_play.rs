//! Match controller: rounds, scores, and who opens each round.

use crate::{
    GameEngine, GameError, GameErrorKind, GameResult, Mark, MoveSource, NullRenderer, Renderer,
    Round, RoundOutcome, SymbolMap, WinRuleSet,
};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// Win counts per player name.
///
/// Both players are listed from the start with zero wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    wins: BTreeMap<String, u32>,
    draws: u32,
}

impl Scoreboard {
    /// Creates a scoreboard with a zero entry for each name.
    pub fn new<'n>(names: impl IntoIterator<Item = &'n str>) -> Self {
        Self {
            wins: names.into_iter().map(|name| (name.to_string(), 0)).collect(),
            draws: 0,
        }
    }

    /// Returns the wins recorded for `name`.
    pub fn wins(&self, name: &str) -> u32 {
        self.wins.get(name).copied().unwrap_or(0)
    }

    /// Returns the number of drawn rounds.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Returns the name-to-wins mapping.
    pub fn as_map(&self) -> &BTreeMap<String, u32> {
        &self.wins
    }

    fn record_win(&mut self, name: &str) {
        *self.wins.entry(name.to_string()).or_insert(0) += 1;
    }

    fn record_draw(&mut self) {
        self.draws += 1;
    }
}

impl std::fmt::Display for Scoreboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, wins) in &self.wins {
            write!(f, "{}: {}  ", name, wins)?;
        }
        write!(f, "draws: {}", self.draws)
    }
}

/// Summary of one completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRecord {
    /// 1-based round number within the match.
    pub number: usize,
    /// Mark that opened the round.
    pub first_mover: Mark,
    /// How the round ended.
    pub outcome: RoundOutcome,
    /// Moves played.
    pub moves: usize,
}

/// Decides whether another round follows.
#[async_trait::async_trait]
pub trait StopPrompt: Send {
    /// Returns true to play another round.
    ///
    /// Asked once after every completed round.
    async fn play_again(&mut self, scoreboard: &Scoreboard) -> GameResult<bool>;
}

/// Stops after a fixed number of rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundLimit {
    limit: usize,
    played: usize,
}

impl RoundLimit {
    /// Allows `limit` rounds in total. A limit of zero still plays the
    /// first round, since the prompt is only asked after a round.
    pub fn new(limit: usize) -> Self {
        Self { limit, played: 0 }
    }
}

#[async_trait::async_trait]
impl StopPrompt for RoundLimit {
    async fn play_again(&mut self, _scoreboard: &Scoreboard) -> GameResult<bool> {
        self.played += 1;
        Ok(self.played < self.limit)
    }
}

/// Sequence of rounds between two players sharing one scoreboard.
///
/// Seat one always plays [`Mark::A`] and seat two [`Mark::B`]. The opening
/// move swaps seats after every round regardless of outcome.
pub struct Match {
    rules: WinRuleSet,
    player_a: Box<dyn MoveSource>,
    player_b: Box<dyn MoveSource>,
    renderer: Box<dyn Renderer>,
    symbols: SymbolMap,
    scoreboard: Scoreboard,
    next_first: Mark,
    rounds: Vec<RoundRecord>,
}

impl Match {
    /// Creates a match on a `size`×`size` board where `first` opens round one.
    ///
    /// # Errors
    ///
    /// Returns [`GameErrorKind::InvalidBoardSize`] for a zero size and
    /// [`GameErrorKind::DuplicatePlayerName`] if both players share a name.
    #[instrument(skip(player_a, player_b), fields(a = player_a.name(), b = player_b.name()))]
    pub fn new(
        size: usize,
        player_a: Box<dyn MoveSource>,
        player_b: Box<dyn MoveSource>,
        first: Mark,
    ) -> GameResult<Self> {
        if size == 0 {
            return Err(GameError::new(GameErrorKind::InvalidBoardSize(size)));
        }
        if player_a.name() == player_b.name() {
            return Err(GameError::new(GameErrorKind::DuplicatePlayerName(
                player_a.name().to_string(),
            )));
        }
        let scoreboard = Scoreboard::new([player_a.name(), player_b.name()]);
        info!("Match created");
        Ok(Self {
            rules: WinRuleSet::for_size(size),
            player_a,
            player_b,
            renderer: Box::new(NullRenderer),
            symbols: SymbolMap::default(),
            scoreboard,
            next_first: first,
            rounds: Vec::new(),
        })
    }

    /// Sets the renderer and symbols used for every round.
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>, symbols: SymbolMap) -> Self {
        self.renderer = renderer;
        self.symbols = symbols;
        self
    }

    /// Returns the scoreboard.
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// Returns every completed round in order.
    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    /// Returns the mark that opens the next round.
    pub fn next_first_mover(&self) -> Mark {
        self.next_first
    }

    /// Returns the display name bound to `mark`.
    pub fn player_name(&self, mark: Mark) -> &str {
        match mark {
            Mark::A => self.player_a.name(),
            Mark::B => self.player_b.name(),
        }
    }

    /// Plays one round on a fresh board and records the result.
    ///
    /// # Errors
    ///
    /// Propagates any round error. The scoreboard and the opening seat are
    /// left as they were.
    #[instrument(skip(self), fields(round = self.rounds.len() + 1, first = ?self.next_first))]
    pub async fn play_round(&mut self) -> GameResult<RoundOutcome> {
        let engine = GameEngine::with_rules(self.rules.clone())?;
        let first = self.next_first;

        let (outcome, moves) = {
            let mut round = Round::new(engine, first, &mut *self.player_a, &mut *self.player_b);
            let outcome = round.run(&mut *self.renderer, &self.symbols).await?;
            (outcome, round.history().len())
        };

        match outcome {
            RoundOutcome::Won(mark) => {
                let name = self.player_name(mark).to_string();
                self.scoreboard.record_win(&name);
                debug!(winner = %name, wins = self.scoreboard.wins(&name), "Score updated");
            }
            RoundOutcome::Drawn => self.scoreboard.record_draw(),
        }

        self.rounds.push(RoundRecord {
            number: self.rounds.len() + 1,
            first_mover: first,
            outcome,
            moves,
        });
        self.next_first = first.opponent();
        Ok(outcome)
    }

    /// Plays rounds until `prompt` declines another. Returns the number of
    /// rounds played by this call.
    ///
    /// # Errors
    ///
    /// Stops at the first round or prompt error and returns it.
    #[instrument(skip_all)]
    pub async fn run(&mut self, prompt: &mut dyn StopPrompt) -> GameResult<usize> {
        let mut played = 0;
        loop {
            self.play_round().await?;
            played += 1;
            if !prompt.play_again(&self.scoreboard).await? {
                break;
            }
        }
        info!(played, scores = %self.scoreboard, "Match finished");
        Ok(played)
    }
}

impl std::fmt::Debug for Match {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("size", &self.rules.size())
            .field("player_a", &self.player_a.name())
            .field("player_b", &self.player_b.name())
            .field("scoreboard", &self.scoreboard)
            .field("next_first", &self.next_first)
            .field("rounds", &self.rounds)
            .finish()
    }
}
