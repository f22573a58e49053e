//! Noughts terminal front end.
//!
//! Wires the pure game logic in [`noughts`] to a keyboard, a text board
//! on stdout, a TOML config file and the command line.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod render;
pub mod setup;
pub mod terminal;

pub use cli::{Cli, Command, PlayArgs};
pub use config::{ConfigError, FirstMover, GameConfig, PlayerConfig, PlayerKind};
pub use render::{TextRenderer, board_text};
pub use setup::{build_match, build_prompt, build_source};
pub use terminal::{ChoiceError, SharedInput, TerminalMoveSource, TerminalPrompt, parse_choice};
