//! Game configuration loaded from TOML and command-line overrides.

use crate::cli::PlayArgs;
use derive_getters::Getters;
use derive_more::{Display, Error};
use noughts::{Mark, SymbolMap};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "noughts.toml";

/// How a seat chooses its moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    /// Person at the keyboard.
    Human,
    /// Uniform random cell.
    Random,
    /// Takes an immediate win, otherwise random.
    Opportunist,
    /// Walks a shuffled order of cells.
    Shuffled,
}

/// Which seat opens the first round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FirstMover {
    /// Seat one opens.
    First,
    /// Seat two opens.
    Second,
    /// Drawn once per match.
    #[default]
    Random,
}

impl FirstMover {
    /// Resolves to the mark that opens round one.
    #[instrument(skip(rng))]
    pub fn resolve(self, rng: &mut impl Rng) -> Mark {
        match self {
            FirstMover::First => Mark::A,
            FirstMover::Second => Mark::B,
            FirstMover::Random => {
                if rng.random_bool(0.5) {
                    Mark::A
                } else {
                    Mark::B
                }
            }
        }
    }
}

/// One seat at the table.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Display name, also the scoreboard key.
    name: String,
    /// Move source for this seat.
    kind: PlayerKind,
}

impl PlayerConfig {
    /// Creates a seat.
    pub fn new(name: impl Into<String>, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rows and columns on the board.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Opening seat for round one.
    #[serde(default)]
    first: FirstMover,

    /// Seed for automatic players and the opening draw.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,

    /// Stop after this many rounds instead of asking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rounds: Option<usize>,

    /// Display symbols for the two marks.
    #[serde(default)]
    symbols: SymbolMap,

    /// Seat one, plays the first symbol.
    #[serde(default = "default_player_one")]
    player_one: PlayerConfig,

    /// Seat two, plays the second symbol.
    #[serde(default = "default_player_two")]
    player_two: PlayerConfig,
}

fn default_board_size() -> usize {
    3
}

fn default_player_one() -> PlayerConfig {
    PlayerConfig::new("Player 1", PlayerKind::Human)
}

fn default_player_two() -> PlayerConfig {
    PlayerConfig::new("Player 2", PlayerKind::Random)
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            symbols: SymbolMap::default(),
            player_one: default_player_one(),
            player_two: default_player_two(),
            first: FirstMover::default(),
            seed: None,
            rounds: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(board_size = config.board_size, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the given file, or [`DEFAULT_CONFIG_FILE`] if it exists, or
    /// falls back to defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line overrides and re-validates.
    #[instrument(skip(self))]
    pub fn with_overrides(mut self, args: &PlayArgs) -> Result<Self, ConfigError> {
        if let Some(size) = args.size {
            self.board_size = size;
        }
        if let Some(first) = args.first {
            self.first = first;
        }
        if let Some(seed) = args.seed {
            self.seed = Some(seed);
        }
        if let Some(rounds) = args.rounds {
            self.rounds = Some(rounds);
        }
        if let Some(symbols) = &args.symbols {
            let mut chars = symbols.chars();
            match (chars.next(), chars.next(), chars.next()) {
                (Some(a), Some(b), None) => self.symbols = SymbolMap::new(a, b),
                _ => {
                    return Err(ConfigError::new(format!(
                        "Symbols must be exactly two characters, got '{}'",
                        symbols
                    )));
                }
            }
        }
        if let Some(name) = &args.p1_name {
            self.player_one.name = name.clone();
        }
        if let Some(kind) = args.p1 {
            self.player_one.kind = kind;
        }
        if let Some(name) = &args.p2_name {
            self.player_two.name = name.clone();
        }
        if let Some(kind) = args.p2 {
            self.player_two.kind = kind;
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks values the engine would otherwise reject mid-game.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_size == 0 {
            return Err(ConfigError::new("board_size must be at least 1".to_string()));
        }
        if self.symbols.a == self.symbols.b {
            return Err(ConfigError::new(format!(
                "Symbols must differ, both are '{}'",
                self.symbols.a
            )));
        }
        if self.symbols.a.is_whitespace() || self.symbols.b.is_whitespace() {
            return Err(ConfigError::new("Symbols must not be blank".to_string()));
        }
        for player in [&self.player_one, &self.player_two] {
            if player.name.trim().is_empty() {
                return Err(ConfigError::new("Player names must not be empty".to_string()));
            }
        }
        if self.player_one.name == self.player_two.name {
            return Err(ConfigError::new(format!(
                "Player names must differ, both are '{}'",
                self.player_one.name
            )));
        }
        if self.rounds == Some(0) {
            return Err(ConfigError::new("rounds must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Renders the configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))
    }

    /// Returns a random generator for this config, seeded when a seed is set.
    pub fn rng(&self, stream: u64) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
            None => StdRng::from_os_rng(),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(*config.board_size(), 3);
        assert_eq!(config.symbols(), &SymbolMap::new('O', 'X'));
        assert_eq!(config.player_one().kind(), &PlayerKind::Human);
    }

    #[test]
    fn test_fixed_first_mover() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(FirstMover::First.resolve(&mut rng), Mark::A);
        assert_eq!(FirstMover::Second.resolve(&mut rng), Mark::B);
    }

    #[test]
    fn test_random_first_mover_hits_both_seats() {
        let mut rng = StdRng::seed_from_u64(99);
        let picks: Vec<Mark> = (0..64).map(|_| FirstMover::Random.resolve(&mut rng)).collect();
        assert!(picks.contains(&Mark::A));
        assert!(picks.contains(&Mark::B));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: GameConfig = toml::from_str("board_size = 4\n").unwrap();
        assert_eq!(*config.board_size(), 4);
        assert_eq!(config.player_two().name(), "Player 2");
        assert_eq!(config.first(), &FirstMover::Random);
    }

    #[test]
    fn test_same_symbols_rejected() {
        let config: GameConfig = toml::from_str("[symbols]\na = \"X\"\nb = \"X\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip_of_defaults() {
        let config = GameConfig::default();
        let text = config.to_toml().unwrap();
        let parsed: GameConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
