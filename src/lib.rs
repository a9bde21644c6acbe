//! Go-Tutor: the rules engine behind an interactive Go tutorial.
//!
//! The engine keeps board state, validates moves (occupancy, suicide, ko),
//! executes captures and answers the derived queries lessons need:
//! liberties, groups, atari detection and move explanations. A shallow bot,
//! quiz scenario checkers and a GTP front-end are built on top of it.
//!
//! ## Modules
//!
//! - [`constants`] - Board limits, classifier band and bot weights
//! - [`board`] - Grid, coordinates and group/liberty flood fill
//! - [`rules`] - Board size and game mode (standard or capture go)
//! - [`position`] - Game state, legality and move application
//! - [`analysis`] - Atari detection, eyes and move explanation
//! - [`bot`] - Heuristic opponent and hints
//! - [`scenario`] - Lesson and quiz answer checking
//! - [`gtp`] - Go Text Protocol front-end
//!
//! ## Example
//!
//! ```
//! use go_tutor::board::{Color, Point};
//! use go_tutor::position::GameState;
//!
//! let state = GameState::default();
//! let outcome = state.apply_move("E5".parse().unwrap(), Color::Black).unwrap();
//! assert_eq!(outcome.state.board().liberties(Point::new(4, 4)).len(), 4);
//! assert_eq!(outcome.state.to_play(), Color::White);
//! ```

pub mod analysis;
pub mod board;
pub mod bot;
pub mod constants;
pub mod gtp;
pub mod position;
pub mod rules;
pub mod scenario;
