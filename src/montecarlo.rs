//! Monte Carlo move selection.
//!
//! Every legal move is scored by running `level` random playouts from the
//! position it leads to. Both sides of a playout are driven by
//! [`RandomMover`], so a playout never misses an immediate win and only walks
//! into a forced loss when it has to.
//!
//! Scoring is from the point of view of the side to move at the root:
//! - +1 for each playout it wins
//! - -1 for each playout the opponent wins
//! - 0 for a draw
//!
//! The move with the strictly highest total is chosen. Ties go to the lowest
//! column, since candidates are visited in column order.

use fastrand::Rng;
use log::debug;

use crate::constants::DEFAULT_LEVEL;
use crate::game::{self, GameError};
use crate::mover::{Mover, RandomMover};
use crate::state::{GameState, Player};

/// Chooses moves by random playouts.
pub struct MonteCarloMover {
    /// Playouts per candidate move (at least 1)
    level: usize,
    rng: Rng,
    name: String,
}

impl Default for MonteCarloMover {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL)
    }
}

impl MonteCarloMover {
    /// Create a mover running `level` playouts per candidate, seeded from the
    /// process-wide generator.
    pub fn new(level: usize) -> Self {
        Self::with_rng(level, Rng::new())
    }

    /// Create a mover with a fixed seed, for reproducible evaluations.
    pub fn with_seed(level: usize, seed: u64) -> Self {
        Self::with_rng(level, Rng::with_seed(seed))
    }

    fn with_rng(level: usize, rng: Rng) -> Self {
        let level = level.max(1);
        Self {
            level,
            rng,
            name: format!("monte-carlo({level})"),
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Total playout score of every legal move, in column order.
    ///
    /// Returns an empty list if the game is over.
    pub fn scores(&mut self, state: &GameState) -> Result<Vec<(usize, i64)>, GameError> {
        let Some(me) = state.next_player() else {
            return Ok(Vec::new());
        };

        let mut red = RandomMover::with_rng(self.rng.fork());
        let mut yellow = RandomMover::with_rng(self.rng.fork());

        let moves = state.valid_moves();
        let mut scores = Vec::with_capacity(moves.len());
        for col in moves {
            let start = state.play_unchecked(col);
            let mut total = 0;
            for _ in 0..self.level {
                total += playout(&mut red, &mut yellow, start, me)?;
            }
            debug!("{}: column {col} scored {total}", self.name);
            scores.push((col, total));
        }
        Ok(scores)
    }
}

/// Play `start` out to the end and score it for `me`.
fn playout(
    red: &mut RandomMover,
    yellow: &mut RandomMover,
    start: GameState,
    me: Player,
) -> Result<i64, GameError> {
    let end = game::run(red, yellow, start)?;
    Ok(match end.winner() {
        Some(winner) if winner == me => 1,
        Some(_) => -1,
        None => 0,
    })
}

/// Column with the strictly highest score; the earliest entry wins ties.
fn best_move(scores: &[(usize, i64)]) -> Option<usize> {
    let mut best: Option<(usize, i64)> = None;
    for &(col, score) in scores {
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((col, score));
        }
    }
    best.map(|(col, _)| col)
}

impl Mover for MonteCarloMover {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_move(&mut self, state: &GameState) -> Result<usize, GameError> {
        let scores = self.scores(state)?;
        best_move(&scores).ok_or(GameError::NoLegalMoves)
    }
}
