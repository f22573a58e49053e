//! Noughts - terminal tic-tac-toe
//!
//! Plays matches between humans and bots on an N×N board.

use anyhow::{Context, Result};
use clap::Parser;
use noughts_app::{Cli, Command, GameConfig, PlayArgs, SharedInput, build_match, build_prompt};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = GameConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Play(args) => run_play(config, &args).await,
        Command::Config(args) => print_config(config, &args),
    }
}

/// Installs the stderr subscriber so stdout carries only the game.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,noughts=debug,noughts_app=debug"
    } else {
        "warn,noughts=info,noughts_app=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Play a match until the prompt says stop
#[instrument(skip_all)]
async fn run_play(config: GameConfig, args: &PlayArgs) -> Result<()> {
    let config = config.with_overrides(args).context("Invalid options")?;
    info!(
        board_size = config.board_size(),
        one = %config.player_one().name(),
        two = %config.player_two().name(),
        "Starting match"
    );

    let input = SharedInput::stdin();
    let mut game = build_match(&config, &input).context("Failed to set up match")?;
    let mut prompt = build_prompt(&config, &input);

    let played = game.run(prompt.as_mut()).await.context("Match aborted")?;

    println!("Final score after {} round(s): {}", played, game.scoreboard());
    Ok(())
}

/// Print the merged configuration
fn print_config(config: GameConfig, args: &PlayArgs) -> Result<()> {
    let config = config.with_overrides(args).context("Invalid options")?;
    print!("{}", config.to_toml()?);
    Ok(())
}
