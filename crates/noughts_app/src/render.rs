//! Plain-text board rendering.

use noughts::{Board, Cell, Mark, Renderer, RoundOutcome, SymbolMap};
use std::io::Write;
use tracing::warn;

/// Formats the board as rows of symbols, with open cells shown by number.
///
/// Every cell is left-aligned to the width of the largest index and
/// followed by two spaces, so a 3×3 board reads:
///
/// ```text
/// O  2  X
/// 4  O  6
/// 7  8  9
/// ```
pub fn board_text(board: &Board, symbols: &SymbolMap) -> String {
    let width = board.cell_count().to_string().len();
    let mut out = String::new();
    for (row, cells) in board.rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let label = match cell {
                Cell::Empty => (row * board.size() + col + 1).to_string(),
                Cell::Marked(mark) => symbols.symbol(*mark).to_string(),
            };
            out.push_str(&format!("{:<width$}  ", label, width = width));
        }
        out.push('\n');
    }
    out
}

/// Renderer writing to any byte sink, normally stdout.
pub struct TextRenderer<W> {
    output: W,
}

impl<W: Write + Send> TextRenderer<W> {
    /// Creates a renderer.
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Returns the sink.
    pub fn output(&self) -> &W {
        &self.output
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.output.write_all(text.as_bytes()).and_then(|_| self.output.flush()) {
            warn!(error = %e, "Failed to write board output");
        }
    }
}

impl TextRenderer<std::io::Stdout> {
    /// Creates a renderer on standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> Renderer for TextRenderer<W> {
    fn render(&mut self, board: &Board, symbols: &SymbolMap) {
        let text = format!("\n{}\n", board_text(board, symbols));
        self.emit(&text);
    }

    fn move_applied(&mut self, player: &str, mark: Mark, index: usize, symbols: &SymbolMap) {
        let text = format!("{}({}) plays {}\n", player, symbols.symbol(mark), index);
        self.emit(&text);
    }

    fn round_over(&mut self, outcome: RoundOutcome, winner: Option<&str>, line: Option<&[usize]>) {
        let who = match (outcome, winner) {
            (RoundOutcome::Won(_), Some(name)) => name.to_string(),
            (RoundOutcome::Won(mark), None) => format!("{:?}", mark),
            (RoundOutcome::Drawn, _) => {
                self.emit("It's a draw.\n");
                return;
            }
        };
        let text = match line {
            Some(cells) => {
                let cells: Vec<String> = cells.iter().map(usize::to_string).collect();
                format!("{} wins with {}!\n", who, cells.join("-"))
            }
            None => format!("{} wins!\n", who),
        };
        self.emit(&text);
    }
}
