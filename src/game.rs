//! Game loop: drives two movers against each other until the game ends.
//!
//! Every ply is applied through the validating `GameState::make_move`, so a
//! mover that proposes an illegal column stops the game with an error instead
//! of corrupting the position. A game can never last more than `MAX_MOVES`
//! plies because every move either wins or fills a cell.

use log::{debug, trace};
use thiserror::Error;

use crate::mover::Mover;
use crate::state::{GameState, MoveError, Player};

/// Errors raised while running a game.
#[derive(Debug, Error)]
pub enum GameError {
    /// A mover returned a column the position does not accept
    #[error("{mover} proposed an illegal move: {source}")]
    IllegalMove { mover: String, source: MoveError },
    /// A mover was asked to play in a finished game
    #[error("no legal moves: the game is over")]
    NoLegalMoves,
    /// Interactive input ended before a move was entered
    #[error("input closed before a move was entered")]
    InputClosed,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Play from `state` until the game is over and return the final position.
///
/// `red` moves whenever Red is to play and `yellow` whenever Yellow is.
pub fn run<R, Y>(red: &mut R, yellow: &mut Y, mut state: GameState) -> Result<GameState, GameError>
where
    R: Mover + ?Sized,
    Y: Mover + ?Sized,
{
    while let Some(player) = state.next_player() {
        state = match player {
            Player::Red => turn(red, &state)?,
            Player::Yellow => turn(yellow, &state)?,
        };
    }
    Ok(state)
}

/// Ask `mover` for a column and apply it.
fn turn<M: Mover + ?Sized>(mover: &mut M, state: &GameState) -> Result<GameState, GameError> {
    let col = mover.next_move(state)?;
    let next = state.make_move(col).map_err(|source| GameError::IllegalMove {
        mover: mover.name().to_string(),
        source,
    })?;
    trace!("{} played column {col} (ply {})", mover.name(), next.moves_played());
    Ok(next)
}

/// Results of a series of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub red: usize,
    pub yellow: usize,
    pub draws: usize,
}

impl Tally {
    /// Count the outcome of a finished game.
    pub fn record(&mut self, state: &GameState) {
        match state.winner() {
            Some(Player::Red) => self.red += 1,
            Some(Player::Yellow) => self.yellow += 1,
            None => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.red + self.yellow + self.draws
    }
}

/// Play `games` games between the same two movers.
///
/// With `first == None` the starting side alternates, Red opening the first game.
pub fn play_series<R, Y>(
    red: &mut R,
    yellow: &mut Y,
    games: usize,
    first: Option<Player>,
) -> Result<Tally, GameError>
where
    R: Mover + ?Sized,
    Y: Mover + ?Sized,
{
    let mut tally = Tally::default();
    for i in 0..games {
        let starter = first.unwrap_or(if i % 2 == 0 { Player::Red } else { Player::Yellow });
        let end = run(red, yellow, GameState::new(starter))?;
        tally.record(&end);
        debug!(
            "game {}/{games}: {} after {} plies",
            i + 1,
            end.winner().map_or("draw".to_string(), |p| format!("{p} wins")),
            end.moves_played()
        );
    }
    Ok(tally)
}
