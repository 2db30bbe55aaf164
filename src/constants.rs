//! Board geometry and engine parameters.
//!
//! The board is fixed at 7 columns by 6 rows. Columns are indexed `0..WIDTH`
//! from left to right and rows `0..HEIGHT` from the bottom up.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of columns.
pub const WIDTH: usize = 7;

/// Number of rows (maximum stack height of a column).
pub const HEIGHT: usize = 6;

/// Number of tokens in a row needed to win.
pub const CONNECT: usize = 4;

/// Total number of cells, which bounds the length of any game.
pub const MAX_MOVES: usize = WIDTH * HEIGHT;

/// The four line directions as (dcol, drow): horizontal, vertical and both diagonals.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

// =============================================================================
// Monte Carlo Parameters
// =============================================================================

/// Default number of playouts run for each candidate move.
pub const DEFAULT_LEVEL: usize = 1000;

/// Default number of games played by `connect-four match`.
pub const DEFAULT_GAMES: usize = 10;
