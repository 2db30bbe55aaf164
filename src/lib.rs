//! Connect Four: a rules engine with random and Monte Carlo players.
//!
//! This crate models the 7x6 Connect Four board as an immutable value and
//! provides pluggable move selection strategies.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and engine parameters
//! - [`state`] - Game state, move rules and win detection
//! - [`mover`] - The `Mover` trait and the random mover
//! - [`montecarlo`] - Move selection by random playouts
//! - [`game`] - Game loop driving two movers
//! - [`console`] - Mover reading moves from a human
//!
//! ## Example
//!
//! ```
//! use connect_four::game;
//! use connect_four::montecarlo::MonteCarloMover;
//! use connect_four::mover::RandomMover;
//! use connect_four::state::{GameState, Player};
//!
//! let mut red = MonteCarloMover::with_seed(20, 1);
//! let mut yellow = RandomMover::with_seed(2);
//! let end = game::run(&mut red, &mut yellow, GameState::new(Player::Red)).unwrap();
//! assert!(end.is_over());
//! println!("{end}");
//! ```

pub mod console;
pub mod constants;
pub mod game;
pub mod montecarlo;
pub mod mover;
pub mod state;
