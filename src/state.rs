//! Game state representation and move rules.
//!
//! This module provides the core game logic for Connect Four:
//! - An immutable `GameState` value (every move returns a new state)
//! - Legality checks and the list of playable columns
//! - Win detection around the cell that was just filled
//!
//! Columns are stacks that fill from the bottom. Row 0 is the bottom row, so
//! `player_at(0, c)` is the first token dropped into column `c`.

use std::fmt;

use thiserror::Error;

use crate::constants::{CONNECT, DIRECTIONS, HEIGHT, WIDTH};

/// One of the two sides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    /// The other side.
    pub fn opponent(self) -> Player {
        match self {
            Player::Red => Player::Yellow,
            Player::Yellow => Player::Red,
        }
    }

    /// Character used when rendering the board.
    pub fn symbol(self) -> char {
        match self {
            Player::Red => 'o',
            Player::Yellow => 'x',
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Red => write!(f, "Red"),
            Player::Yellow => write!(f, "Yellow"),
        }
    }
}

/// Reason a move was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Column index is not in `0..WIDTH`
    #[error("illegal move: column {0} is out of range")]
    OutOfRange(usize),
    /// Column already holds `HEIGHT` tokens
    #[error("illegal move: column {0} is full")]
    ColumnFull(usize),
    /// The game has already been won or drawn
    #[error("illegal move: the game is over")]
    GameOver,
}

/// A Connect Four position.
///
/// `GameState` is a plain `Copy` value, so positions can be shared freely
/// between playouts. Applying a move never touches the receiver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GameState {
    /// Side to move, `None` once the game is over
    next_player: Option<Player>,
    /// Winner, `None` while playing or after a draw
    winner: Option<Player>,
    /// Column stacks, bottom to top. Cells at or above `heights[c]` are `None`.
    cells: [[Option<Player>; HEIGHT]; WIDTH],
    /// Number of tokens in each column
    heights: [u8; WIDTH],
}

impl GameState {
    /// Create an empty board with `first` to move.
    pub fn new(first: Player) -> Self {
        GameState {
            next_player: Some(first),
            winner: None,
            cells: [[None; HEIGHT]; WIDTH],
            heights: [0; WIDTH],
        }
    }

    /// Replay a sequence of columns from an empty board.
    ///
    /// # Errors
    /// Returns the first `MoveError` hit while replaying.
    pub fn from_moves(first: Player, moves: &[usize]) -> Result<Self, MoveError> {
        moves
            .iter()
            .try_fold(GameState::new(first), |state, &col| state.make_move(col))
    }

    /// Side to move, or `None` if the game is over.
    pub fn next_player(&self) -> Option<Player> {
        self.next_player
    }

    /// Winner of the game, if any.
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.next_player.is_none()
    }

    /// Number of tokens in column `col` (0 for columns off the board).
    pub fn height(&self, col: usize) -> usize {
        self.heights.get(col).map_or(0, |&h| h as usize)
    }

    /// Total number of tokens on the board.
    pub fn moves_played(&self) -> usize {
        self.heights.iter().map(|&h| h as usize).sum()
    }

    /// Tokens in column `col`, bottom to top.
    pub fn column(&self, col: usize) -> impl Iterator<Item = Player> + '_ {
        self.cells
            .get(col)
            .into_iter()
            .flat_map(|stack| stack.iter().flatten().copied())
    }

    /// Check whether a token can be dropped into `col`.
    #[inline]
    pub fn can_play(&self, col: usize) -> bool {
        col < WIDTH && (self.heights[col] as usize) < HEIGHT
    }

    /// All playable columns in ascending order. Empty only when the board is full.
    pub fn valid_moves(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&col| self.can_play(col)).collect()
    }

    /// Token at (`row`, `col`), or `None` for an empty or off-board cell.
    ///
    /// Never panics, so win detection can probe past the edges freely.
    pub fn player_at(&self, row: isize, col: isize) -> Option<Player> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if col >= WIDTH || row >= self.heights[col] as usize {
            return None;
        }
        self.cells[col][row]
    }

    /// Drop the side-to-move's token into `col` and return the resulting state.
    ///
    /// # Errors
    /// - `MoveError::GameOver` if the game has already ended
    /// - `MoveError::OutOfRange` if `col >= WIDTH`
    /// - `MoveError::ColumnFull` if the column already holds `HEIGHT` tokens
    pub fn make_move(&self, col: usize) -> Result<GameState, MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if col >= WIDTH {
            return Err(MoveError::OutOfRange(col));
        }
        if !self.can_play(col) {
            return Err(MoveError::ColumnFull(col));
        }
        Ok(self.play_unchecked(col))
    }

    /// Apply a move already known to be legal.
    ///
    /// Callers must have checked `can_play(col)` on a state that is not over.
    pub(crate) fn play_unchecked(&self, col: usize) -> GameState {
        debug_assert!(self.can_play(col) && !self.is_over());
        let Some(player) = self.next_player else {
            return *self;
        };

        let mut next = *self;
        let row = next.heights[col] as usize;
        next.cells[col][row] = Some(player);
        next.heights[col] += 1;

        if next.completes_line(col, row, player) {
            next.winner = Some(player);
            next.next_player = None;
        } else if next.is_full() {
            next.next_player = None;
        } else {
            next.next_player = Some(player.opponent());
        }
        next
    }

    fn is_full(&self) -> bool {
        self.heights.iter().all(|&h| h as usize == HEIGHT)
    }

    /// Check whether the token at (`row`, `col`) is part of a line of `CONNECT`.
    ///
    /// Only lines through that cell are examined, so this is constant time.
    fn completes_line(&self, col: usize, row: usize, player: Player) -> bool {
        let (col, row) = (col as isize, row as isize);
        DIRECTIONS
            .iter()
            .any(|&(dc, dr)| self.line_in_direction(col, row, dc, dr, player))
    }

    /// Slide a window of `CONNECT` cells along (`dc`, `dr`) so that the played
    /// cell takes every position in it.
    fn line_in_direction(&self, col: isize, row: isize, dc: isize, dr: isize, player: Player) -> bool {
        let span = CONNECT as isize;
        (1 - span..=0).any(|n| {
            // (c0, r0) is the first cell of this window
            let c0 = col + n * dc;
            let r0 = row + n * dr;
            (0..span).all(|i| self.player_at(r0 + i * dr, c0 + i * dc) == Some(player))
        })
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..HEIGHT as isize).rev() {
            for col in 0..WIDTH as isize {
                if col > 0 {
                    write!(f, " ")?;
                }
                let ch = self.player_at(row, col).map_or('.', Player::symbol);
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        for col in 1..=WIDTH {
            if col > 1 {
                write!(f, " ")?;
            }
            write!(f, "{col}")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let s = GameState::new(Player::Yellow);
        assert_eq!(s.next_player(), Some(Player::Yellow));
        assert_eq!(s.winner(), None);
        assert!(!s.is_over());
        assert_eq!(s.moves_played(), 0);
        assert_eq!(s.valid_moves(), (0..WIDTH).collect::<Vec<_>>());
    }

    #[test]
    fn test_player_at_out_of_range() {
        let s = GameState::from_moves(Player::Red, &[3]).unwrap();
        assert_eq!(s.player_at(0, 3), Some(Player::Red));
        assert_eq!(s.player_at(1, 3), None);
        assert_eq!(s.player_at(-1, 3), None);
        assert_eq!(s.player_at(0, -1), None);
        assert_eq!(s.player_at(0, WIDTH as isize), None);
        assert_eq!(s.player_at(HEIGHT as isize, 3), None);
    }

    #[test]
    fn test_can_play_bounds() {
        let s = GameState::new(Player::Red);
        assert!(s.can_play(0));
        assert!(s.can_play(WIDTH - 1));
        assert!(!s.can_play(WIDTH));
        assert!(!s.can_play(usize::MAX));
    }

    #[test]
    fn test_make_move_out_of_range() {
        let s = GameState::new(Player::Red);
        assert_eq!(s.make_move(WIDTH), Err(MoveError::OutOfRange(WIDTH)));
    }

    #[test]
    fn test_make_move_full_column() {
        let s = GameState::from_moves(Player::Red, &[2; HEIGHT]).unwrap();
        assert!(!s.can_play(2));
        let before = s;
        assert_eq!(s.make_move(2), Err(MoveError::ColumnFull(2)));
        assert_eq!(s, before);
        assert!(!s.valid_moves().contains(&2));
    }

    #[test]
    fn test_make_move_after_game_over() {
        let s = GameState::from_moves(Player::Red, &[0, 1, 0, 1, 0, 1, 0]).unwrap();
        assert!(s.is_over());
        assert_eq!(s.make_move(5), Err(MoveError::GameOver));
    }

    #[test]
    fn test_make_move_leaves_receiver_untouched() {
        let s = GameState::from_moves(Player::Red, &[3, 3]).unwrap();
        let t = s.make_move(3).unwrap();
        assert_eq!(s.height(3), 2);
        assert_eq!(t.height(3), 3);
        assert_eq!(s.next_player(), Some(Player::Red));
        assert_eq!(t.next_player(), Some(Player::Yellow));
    }

    #[test]
    fn test_column_iterates_bottom_to_top() {
        let s = GameState::from_moves(Player::Red, &[4, 4, 4]).unwrap();
        let col: Vec<_> = s.column(4).collect();
        assert_eq!(col, vec![Player::Red, Player::Yellow, Player::Red]);
        assert_eq!(s.column(0).count(), 0);
        assert_eq!(s.column(WIDTH).count(), 0);
    }

    #[test]
    fn test_horizontal_three_is_not_a_win() {
        let s = GameState::from_moves(Player::Red, &[0, 0, 1, 1, 2]).unwrap();
        assert!(!s.is_over());
        assert_eq!(s.winner(), None);
    }

    #[test]
    fn test_win_detected_when_middle_cell_is_played_last() {
        // Red holds 0, 1 and 3 on the bottom row, then fills 2
        let s = GameState::from_moves(Player::Red, &[0, 0, 1, 1, 3, 3, 2]).unwrap();
        assert_eq!(s.winner(), Some(Player::Red));
    }

    #[test]
    fn test_display() {
        let s = GameState::from_moves(Player::Red, &[0, 0, 6]).unwrap();
        let expected = "\
. . . . . . .
. . . . . . .
. . . . . . .
. . . . . . .
x . . . . . .
o . . . . . o
1 2 3 4 5 6 7
";
        assert_eq!(s.to_string(), expected);
    }

    #[test]
    fn test_move_error_display() {
        assert_eq!(
            MoveError::ColumnFull(3).to_string(),
            "illegal move: column 3 is full"
        );
        assert_eq!(
            MoveError::OutOfRange(9).to_string(),
            "illegal move: column 9 is out of range"
        );
    }
}
