//! Builds a ready-to-run match from configuration.

use crate::config::{GameConfig, PlayerConfig, PlayerKind};
use crate::render::TextRenderer;
use crate::terminal::{SharedInput, TerminalMoveSource, TerminalPrompt};
use noughts::{
    GameResult, Mark, Match, MoveSource, OpportunistMoveSource, RandomMoveSource, RoundLimit,
    ShuffledMoveSource, StopPrompt, SymbolMap,
};
use tracing::{info, instrument};

/// Seed stream reserved for the opening-seat draw.
const FIRST_MOVER_STREAM: u64 = 0;

/// Creates the move source for one seat.
///
/// Automatic players get a seed derived from the config seed and the seat,
/// so two bots in one match never share a random stream.
#[instrument(skip(input, symbols), fields(name = %player.name(), kind = ?player.kind()))]
pub fn build_source(
    player: &PlayerConfig,
    seat: u64,
    seed: Option<u64>,
    input: &SharedInput,
    symbols: &SymbolMap,
) -> Box<dyn MoveSource> {
    let name = player.name().clone();
    let seat_seed = seed.map(|seed| seed.wrapping_add(seat));
    match (player.kind(), seat_seed) {
        (PlayerKind::Human, _) => Box::new(TerminalMoveSource::new(
            name,
            input.clone(),
            std::io::stdout(),
            symbols.clone(),
        )),
        (PlayerKind::Random, Some(seed)) => Box::new(RandomMoveSource::seeded(name, seed)),
        (PlayerKind::Random, None) => Box::new(RandomMoveSource::new(name)),
        (PlayerKind::Opportunist, Some(seed)) => {
            Box::new(OpportunistMoveSource::seeded(name, seed))
        }
        (PlayerKind::Opportunist, None) => Box::new(OpportunistMoveSource::new(name)),
        (PlayerKind::Shuffled, Some(seed)) => Box::new(ShuffledMoveSource::seeded(name, seed)),
        (PlayerKind::Shuffled, None) => Box::new(ShuffledMoveSource::new(name)),
    }
}

/// Creates the stop prompt: a fixed round count when configured, otherwise
/// a y/n question on the terminal.
pub fn build_prompt(config: &GameConfig, input: &SharedInput) -> Box<dyn StopPrompt> {
    match config.rounds() {
        Some(rounds) => Box::new(RoundLimit::new(*rounds)),
        None => Box::new(TerminalPrompt::new(input.clone(), std::io::stdout())),
    }
}

/// Builds the match described by `config`, rendering to stdout.
///
/// # Errors
///
/// Fails if the engine rejects the board size or the player names.
#[instrument(skip_all)]
pub fn build_match(config: &GameConfig, input: &SharedInput) -> GameResult<Match> {
    let symbols = config.symbols();
    let player_a = build_source(config.player_one(), 1, *config.seed(), input, symbols);
    let player_b = build_source(config.player_two(), 2, *config.seed(), input, symbols);

    let first = config.first().resolve(&mut config.rng(FIRST_MOVER_STREAM));
    info!(
        first = ?first,
        opener = %opener_name(config, first),
        "Opening seat chosen"
    );

    let game = Match::new(*config.board_size(), player_a, player_b, first)?
        .with_renderer(Box::new(TextRenderer::stdout()), symbols.clone());
    Ok(game)
}

fn opener_name(config: &GameConfig, first: Mark) -> &str {
    match first {
        Mark::A => config.player_one().name(),
        Mark::B => config.player_two().name(),
    }
}

