//! Interactive mover that reads moves from a human.
//!
//! The mover shows the board, prompts for a column numbered `1..=WIDTH` and
//! keeps asking until it gets one the position accepts. Input comes from any
//! [`LineSource`]: stdin in the binary, in-memory buffers in tests. Stdin is
//! only locked while a line is being read, so two human movers can share it.
//!
//! ## Example
//!
//! ```no_run
//! use connect_four::console::ConsoleMover;
//! use connect_four::game;
//! use connect_four::state::{GameState, Player};
//!
//! let mut alice = ConsoleMover::stdio("Alice");
//! let mut bob = ConsoleMover::stdio("Bob");
//! let end = game::run(&mut alice, &mut bob, GameState::new(Player::Red))?;
//! println!("{end}");
//! # Ok::<(), connect_four::game::GameError>(())
//! ```

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use log::warn;

use crate::constants::WIDTH;
use crate::game::GameError;
use crate::mover::Mover;
use crate::state::GameState;

/// Something a line of input can be read from.
pub trait LineSource {
    /// Append the next line to `buf`; returns 0 at end of input.
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize>;
}

impl LineSource for io::Stdin {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        // Locks stdin for this call only
        io::Stdin::read_line(self, buf)
    }
}

/// Adapts any `BufRead` into a [`LineSource`].
pub struct LineReader<R>(pub R);

impl<R: BufRead> LineSource for LineReader<R> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        self.0.read_line(buf)
    }
}

/// One input shared between several movers on the same thread.
impl<S: LineSource> LineSource for Rc<RefCell<S>> {
    fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
        self.borrow_mut().read_line(buf)
    }
}

/// A mover backed by a text input and output.
pub struct ConsoleMover<R, W> {
    name: String,
    input: R,
    output: W,
}

impl ConsoleMover<io::Stdin, io::Stdout> {
    /// Create a mover reading from stdin and writing to stdout.
    pub fn stdio(name: &str) -> Self {
        Self::new(name, io::stdin(), io::stdout())
    }
}

impl<R: LineSource, W: Write> ConsoleMover<R, W> {
    pub fn new(name: &str, input: R, output: W) -> Self {
        Self {
            name: name.to_string(),
            input,
            output,
        }
    }

    /// Give back the output, e.g. to inspect what was written in tests.
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Parse a 1-based column number into a 0-based index.
///
/// Returns `None` for anything that is not a number in `1..=WIDTH`.
fn parse_column(line: &str) -> Option<usize> {
    match line.trim().parse::<usize>() {
        Ok(n) if (1..=WIDTH).contains(&n) => Some(n - 1),
        _ => None,
    }
}

impl<R: LineSource, W: Write> Mover for ConsoleMover<R, W> {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, state: &GameState) -> Result<usize, GameError> {
        let Some(player) = state.next_player() else {
            return Err(GameError::NoLegalMoves);
        };

        writeln!(self.output, "{state}")?;
        loop {
            write!(self.output, "{} ({player}), your move [1-{WIDTH}]: ", self.name)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(GameError::InputClosed);
            }

            match parse_column(&line) {
                Some(col) if state.can_play(col) => return Ok(col),
                Some(col) => {
                    warn!("{}: column {} is full", self.name, col + 1);
                    writeln!(self.output, "Column {} is full.", col + 1)?;
                }
                None => {
                    warn!("{}: rejected input {:?}", self.name, line.trim());
                    writeln!(self.output, "Please enter a column number from 1 to {WIDTH}.")?;
                }
            }
        }
    }
}
