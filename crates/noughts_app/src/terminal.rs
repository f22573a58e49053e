//! Keyboard-driven move source and restart prompt.
//!
//! Both read lines from one shared input so that two humans and the prompt
//! never compete for buffered stdin.

use derive_more::Display;
use noughts::{
    GameError, GameErrorKind, GameResult, MoveSource, Scoreboard, StopPrompt, SymbolMap,
    TurnContext,
};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// Line input shared by every terminal collaborator.
#[derive(Clone)]
pub struct SharedInput {
    reader: Arc<Mutex<Box<dyn AsyncBufRead + Unpin + Send>>>,
}

impl SharedInput {
    /// Wraps a buffered reader.
    pub fn new(reader: impl AsyncBufRead + Unpin + Send + 'static) -> Self {
        Self {
            reader: Arc::new(Mutex::new(Box::new(reader))),
        }
    }

    /// Wraps the process's standard input.
    pub fn stdin() -> Self {
        Self::new(tokio::io::BufReader::new(tokio::io::stdin()))
    }

    /// Reads one line without its terminator, or `None` at end of input.
    ///
    /// Bytes that are not UTF-8 become U+FFFD, so the line is refused by
    /// the caller like any other bad entry.
    pub async fn read_line(&self) -> std::io::Result<Option<String>> {
        let mut bytes = Vec::new();
        let read = self.reader.lock().await.read_until(b'\n', &mut bytes).await?;
        if read == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&bytes);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl std::fmt::Debug for SharedInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedInput").finish_non_exhaustive()
    }
}

/// Why a typed cell was refused.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ChoiceError {
    /// Input was not an integer.
    #[display("'{}' is not a number.", _0)]
    NotANumber(String),
    /// Integer outside the board.
    #[display("Choose a number between 1 and {}.", cells)]
    OutOfRange {
        /// The number typed.
        index: usize,
        /// Cells on the board.
        cells: usize,
    },
    /// Cell already played.
    #[display("Cell {} is already taken.", _0)]
    Taken(usize),
}

/// Parses a typed cell index against the open cells.
#[instrument]
pub fn parse_choice(input: &str, cells: usize, available: &[usize]) -> Result<usize, ChoiceError> {
    let trimmed = input.trim();
    let index: usize = trimmed
        .parse()
        .map_err(|_| ChoiceError::NotANumber(trimmed.to_string()))?;
    if index == 0 || index > cells {
        return Err(ChoiceError::OutOfRange { index, cells });
    }
    if !available.contains(&index) {
        return Err(ChoiceError::Taken(index));
    }
    Ok(index)
}

/// Human player typing cell numbers.
///
/// Re-prompts until it reads a legal cell; only end of input is an error.
pub struct TerminalMoveSource<W> {
    name: String,
    input: SharedInput,
    output: W,
    symbols: SymbolMap,
}

impl<W: Write + Send> TerminalMoveSource<W> {
    /// Creates a terminal player.
    pub fn new(name: impl Into<String>, input: SharedInput, output: W, symbols: SymbolMap) -> Self {
        Self {
            name: name.into(),
            input,
            output,
            symbols,
        }
    }

    /// Returns the writer prompts go to.
    pub fn output(&self) -> &W {
        &self.output
    }
}

#[async_trait::async_trait]
impl<W: Write + Send> MoveSource for TerminalMoveSource<W> {
    #[instrument(
        skip(self, available, turn),
        fields(player = %self.name, move_number = turn.move_number)
    )]
    async fn next_move(
        &mut self,
        available: &[usize],
        turn: &TurnContext<'_>,
    ) -> GameResult<usize> {
        let cells = turn.board.cell_count();
        let symbol = self.symbols.symbol(turn.mark);
        loop {
            write!(self.output, "{}({}), choose a cell: ", self.name, symbol)?;
            self.output.flush()?;

            let line = self
                .input
                .read_line()
                .await?
                .ok_or_else(|| GameError::new(GameErrorKind::InputClosed))?;

            match parse_choice(&line, cells, available) {
                Ok(index) => {
                    debug!(index, "Human chose cell");
                    return Ok(index);
                }
                Err(reason) => {
                    debug!(%reason, "Rejected input");
                    writeln!(self.output, "{} Try again.", reason)?;
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Asks "play again?" after each round.
///
/// End of input counts as "no".
pub struct TerminalPrompt<W> {
    input: SharedInput,
    output: W,
}

impl<W: Write + Send> TerminalPrompt<W> {
    /// Creates a prompt.
    pub fn new(input: SharedInput, output: W) -> Self {
        Self { input, output }
    }

    /// Returns the writer prompts go to.
    pub fn output(&self) -> &W {
        &self.output
    }
}

#[async_trait::async_trait]
impl<W: Write + Send> StopPrompt for TerminalPrompt<W> {
    #[instrument(skip_all)]
    async fn play_again(&mut self, scoreboard: &Scoreboard) -> GameResult<bool> {
        writeln!(self.output, "Score: {}", scoreboard)?;
        loop {
            write!(self.output, "Play again? Enter 'y' to restart or 'n' to quit: ")?;
            self.output.flush()?;

            let Some(line) = self.input.read_line().await? else {
                warn!("Input closed at restart prompt, stopping");
                writeln!(self.output)?;
                return Ok(false);
            };
            match line.trim().to_lowercase().as_str() {
                "y" => {
                    writeln!(self.output, "Restarting the game.")?;
                    return Ok(true);
                }
                "n" => {
                    writeln!(self.output, "Exiting the game.")?;
                    return Ok(false);
                }
                _ => writeln!(self.output, "Invalid input. Please enter 'y' or 'n'.")?,
            }
        }
    }
}
