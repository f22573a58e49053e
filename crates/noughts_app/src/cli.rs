//! Command-line interface for noughts.

use crate::config::{FirstMover, PlayerKind};
use clap::{Args, Parser, Subcommand};

/// Noughts - tic-tac-toe for people and bots
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe on an N×N board, in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./noughts.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a match
    Play(PlayArgs),

    /// Print the effective configuration as TOML
    Config(PlayArgs),
}

/// Overrides for config file values.
#[derive(Args, Debug, Clone, Default)]
pub struct PlayArgs {
    /// Board size (rows and columns)
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Which seat opens the first round
    #[arg(long, value_enum)]
    pub first: Option<FirstMover>,

    /// Seed for automatic players
    #[arg(long)]
    pub seed: Option<u64>,

    /// Stop after this many rounds instead of asking
    #[arg(short, long)]
    pub rounds: Option<usize>,

    /// Two symbols for seat one and seat two, e.g. "OX"
    #[arg(long)]
    pub symbols: Option<String>,

    /// Seat one's name
    #[arg(long)]
    pub p1_name: Option<String>,

    /// Seat one's player kind
    #[arg(long, value_enum)]
    pub p1: Option<PlayerKind>,

    /// Seat two's name
    #[arg(long)]
    pub p2_name: Option<String>,

    /// Seat two's player kind
    #[arg(long, value_enum)]
    pub p2: Option<PlayerKind>,
}
