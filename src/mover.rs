//! Move selection strategies.
//!
//! A `Mover` picks a column for the side to move. Implementations are
//! plugged into `game::run` for each side:
//! - [`RandomMover`] - random choice with one ply of lookahead
//! - [`MonteCarloMover`](crate::montecarlo::MonteCarloMover) - random playouts per candidate
//! - [`ConsoleMover`](crate::console::ConsoleMover) - moves typed by a human

use fastrand::Rng;

use crate::game::GameError;
use crate::state::GameState;

/// Something that can choose the next move in a game.
pub trait Mover {
    /// Name shown in logs and error messages.
    fn name(&self) -> &str;

    /// Choose a column for the side to move.
    ///
    /// Given a position that is not over, the result must be one of
    /// `state.valid_moves()`.
    fn next_move(&mut self, state: &GameState) -> Result<usize, GameError>;
}

/// Legal moves sorted by what happens one ply later.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveBuckets {
    /// Moves that win immediately
    pub winning: Vec<usize>,
    /// Moves that are neither winning nor losing
    pub neutral: Vec<usize>,
    /// Moves after which every reply wins for the opponent
    pub losing: Vec<usize>,
}

impl MoveBuckets {
    /// The bucket a random choice should be drawn from: winning moves if
    /// there are any, otherwise neutral moves, otherwise losing moves.
    pub fn preferred(&self) -> &[usize] {
        if !self.winning.is_empty() {
            &self.winning
        } else if !self.neutral.is_empty() {
            &self.neutral
        } else {
            &self.losing
        }
    }
}

/// Classify every legal move of the side to move.
///
/// Returns empty buckets if the game is over. A move that fills the last cell
/// without winning leaves the opponent no reply and counts as neutral.
pub fn classify_moves(state: &GameState) -> MoveBuckets {
    let mut buckets = MoveBuckets::default();
    let Some(me) = state.next_player() else {
        return buckets;
    };

    for col in state.valid_moves() {
        let after = state.play_unchecked(col);
        if after.winner() == Some(me) {
            buckets.winning.push(col);
        } else if loses_to_every_reply(&after) {
            buckets.losing.push(col);
        } else {
            buckets.neutral.push(col);
        }
    }
    buckets
}

/// True if the game goes on and every reply by the side to move wins for it.
fn loses_to_every_reply(after: &GameState) -> bool {
    let Some(opponent) = after.next_player() else {
        return false;
    };
    after
        .valid_moves()
        .into_iter()
        .all(|reply| after.play_unchecked(reply).winner() == Some(opponent))
}

/// Picks uniformly at random from the preferred bucket of [`classify_moves`].
///
/// It never misses an immediate win and only walks into a forced loss when
/// nothing else is available.
pub struct RandomMover {
    rng: Rng,
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomMover {
    /// Create a mover seeded from the process-wide generator.
    pub fn new() -> Self {
        Self::with_rng(Rng::new())
    }

    /// Create a mover with a fixed seed, for reproducible games.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(Rng::with_seed(seed))
    }

    pub(crate) fn with_rng(rng: Rng) -> Self {
        Self { rng }
    }
}

impl Mover for RandomMover {
    fn name(&self) -> &str {
        "random"
    }

    fn next_move(&mut self, state: &GameState) -> Result<usize, GameError> {
        let buckets = classify_moves(state);
        let pool = buckets.preferred();
        if pool.is_empty() {
            return Err(GameError::NoLegalMoves);
        }
        Ok(pool[self.rng.usize(..pool.len())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Player;

    /// Red to move with three in column 0; only column 0 wins.
    const ONE_WIN: [usize; 6] = [0, 1, 0, 1, 0, 2];

    /// Red to move on a nearly full board: column 5 is safe, column 6 hands
    /// Yellow the win in column 5.
    const ONE_LOSING: [usize; 40] = [
        4, 4, 2, 5, 2, 4, 1, 4, 5, 5, 0, 1, 0, 3, 3, 1, 4, 2, 0, 6, 3, 6, 2, 2, 6, 3, 3, 0, 0, 0,
        3, 2, 1, 4, 1, 5, 1, 5, 6, 6,
    ];

    /// Red to move with column 1 as the only open column; Yellow wins on top.
    const FORCED_LOSS: [usize; 40] = [
        1, 5, 3, 2, 5, 5, 3, 5, 4, 1, 2, 4, 2, 5, 2, 1, 3, 2, 0, 4, 6, 0, 0, 4, 2, 6, 5, 1, 6, 3,
        0, 0, 4, 0, 6, 4, 6, 6, 3, 3,
    ];

    fn position(moves: &[usize]) -> GameState {
        GameState::from_moves(Player::Red, moves).unwrap()
    }

    #[test]
    fn test_classify_winning_move() {
        let buckets = classify_moves(&position(&ONE_WIN));
        assert_eq!(buckets.winning, vec![0]);
        assert_eq!(buckets.neutral, vec![1, 2, 3, 4, 5, 6]);
        assert!(buckets.losing.is_empty());
        assert_eq!(buckets.preferred(), &[0]);
    }

    #[test]
    fn test_classify_losing_move() {
        let buckets = classify_moves(&position(&ONE_LOSING));
        assert!(buckets.winning.is_empty());
        assert_eq!(buckets.neutral, vec![5]);
        assert_eq!(buckets.losing, vec![6]);
        assert_eq!(buckets.preferred(), &[5]);
    }

    #[test]
    fn test_classify_forced_loss() {
        let buckets = classify_moves(&position(&FORCED_LOSS));
        assert_eq!(buckets.losing, vec![1]);
        assert_eq!(buckets.preferred(), &[1]);
    }

    #[test]
    fn test_classify_finished_game_is_empty() {
        let done = position(&[0, 1, 0, 1, 0, 1, 0]);
        assert_eq!(classify_moves(&done), MoveBuckets::default());
    }

    #[test]
    fn test_random_mover_always_takes_the_win() {
        let state = position(&ONE_WIN);
        for seed in 0..200 {
            let mut mover = RandomMover::with_seed(seed);
            assert_eq!(mover.next_move(&state).unwrap(), 0, "seed {seed}");
        }
    }

    #[test]
    fn test_random_mover_avoids_losing_move() {
        let state = position(&ONE_LOSING);
        for seed in 0..200 {
            let mut mover = RandomMover::with_seed(seed);
            assert_eq!(mover.next_move(&state).unwrap(), 5, "seed {seed}");
        }
    }

    #[test]
    fn test_random_mover_plays_forced_loss() {
        let mut mover = RandomMover::with_seed(7);
        assert_eq!(mover.next_move(&position(&FORCED_LOSS)).unwrap(), 1);
    }

    #[test]
    fn test_random_mover_returns_valid_moves() {
        let state = position(&[3, 3, 3, 3, 3, 3]);
        let mut mover = RandomMover::with_seed(42);
        for _ in 0..100 {
            let col = mover.next_move(&state).unwrap();
            assert!(state.can_play(col), "column {col} is not playable");
        }
    }

    #[test]
    fn test_random_mover_uses_whole_neutral_bucket() {
        let state = GameState::new(Player::Red);
        let mut mover = RandomMover::with_seed(5);
        let mut seen = [false; 7];
        for _ in 0..500 {
            seen[mover.next_move(&state).unwrap()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_random_mover_on_finished_game() {
        let done = position(&[0, 1, 0, 1, 0, 1, 0]);
        let mut mover = RandomMover::with_seed(1);
        assert!(matches!(
            mover.next_move(&done),
            Err(GameError::NoLegalMoves)
        ));
    }
}
