//! Presentation hooks the round controller calls into.

use crate::{Board, Mark, RoundOutcome};
use serde::{Deserialize, Serialize};

/// Display symbol for each mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMap {
    /// Symbol for [`Mark::A`].
    pub a: char,
    /// Symbol for [`Mark::B`].
    pub b: char,
}

impl SymbolMap {
    /// Creates a symbol map.
    pub fn new(a: char, b: char) -> Self {
        Self { a, b }
    }

    /// Returns the symbol for `mark`.
    pub fn symbol(&self, mark: Mark) -> char {
        match mark {
            Mark::A => self.a,
            Mark::B => self.b,
        }
    }
}

impl Default for SymbolMap {
    fn default() -> Self {
        Self { a: 'O', b: 'X' }
    }
}

/// Fire-and-forget view of a round.
///
/// Nothing a renderer does feeds back into game state.
pub trait Renderer: Send {
    /// Draws the board.
    fn render(&mut self, board: &Board, symbols: &SymbolMap);

    /// Called after a move is applied, before the board is redrawn.
    fn move_applied(&mut self, _player: &str, _mark: Mark, _index: usize, _symbols: &SymbolMap) {}

    /// Called once when the round reaches a terminal state, with the winner's
    /// name and the line they completed.
    fn round_over(
        &mut self,
        _outcome: RoundOutcome,
        _winner: Option<&str>,
        _line: Option<&[usize]>,
    ) {
    }
}

/// Renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _board: &Board, _symbols: &SymbolMap) {}
}
