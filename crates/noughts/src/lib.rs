//! Noughts - tic-tac-toe game logic
//!
//! Pure game-state engine for two-player noughts and crosses on an N×N
//! board. No terminal or keyboard code lives here; front ends plug in
//! through the capability traits.
//!
//! # Architecture
//!
//! - **Board**: cell storage addressed by 1-based, row-major indices
//! - **WinRuleSet**: every row, column and both diagonals for a board size
//! - **GameEngine**: owns a board and its rules; applies and judges moves
//! - **Round**: alternates two [`MoveSource`]s until a win or a draw
//! - **Match**: plays rounds, keeps the [`Scoreboard`], swaps the opener
//!
//! # Example
//!
//! ```no_run
//! use noughts::{Mark, Match, RandomMoveSource, RoundLimit};
//!
//! # async fn example() -> noughts::GameResult<()> {
//! let mut game = Match::new(
//!     3,
//!     Box::new(RandomMoveSource::new("Ann")),
//!     Box::new(RandomMoveSource::new("Bob")),
//!     Mark::A,
//! )?;
//! game.run(&mut RoundLimit::new(5)).await?;
//! println!("{}", game.scoreboard());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod engine;
mod error;
mod match_play;
mod players;
mod render;
mod round;
mod rules;
mod types;

// Crate-level exports - Domain types
pub use types::{Cell, Mark, Move};

// Crate-level exports - Errors
pub use error::{GameError, GameErrorKind, GameResult};

// Crate-level exports - Board and rules
pub use board::Board;
pub use engine::GameEngine;
pub use rules::WinRuleSet;

// Crate-level exports - Controllers
pub use match_play::{Match, RoundLimit, RoundRecord, Scoreboard, StopPrompt};
pub use round::{Round, RoundOutcome, RoundState};

// Crate-level exports - Capabilities
pub use players::{
    MoveSource, OpportunistMoveSource, RandomMoveSource, ScriptedMoveSource, ShuffledMoveSource,
    TurnContext,
};
pub use render::{NullRenderer, Renderer, SymbolMap};
