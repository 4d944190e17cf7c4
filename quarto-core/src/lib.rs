//! Quarto game logic.
//!
//! Two players share 16 pieces. On each turn the current player first picks
//! the piece the opponent must place, then the piece goes onto an empty cell
//! of the 4x4 board. Whoever completes a row, column or diagonal of four
//! pieces sharing an attribute wins; a full board without such a line is a
//! draw.
//!
//! # Piece Encoding (4-bit)
//!
//! ```text
//! Bit 3: tall    Bit 2: dark    Bit 1: square    Bit 0: hole
//!
//! id = tall*8 + dark*4 + square*2 + hole   (0-15)
//! ```
//!
//! # Board Layout
//!
//! ```text
//! Cell indices (row-major order, index = row*4 + col):
//!    0  1  2  3
//!    4  5  6  7
//!    8  9 10 11
//!   12 13 14 15
//! ```
//!
//! # Example
//!
//! ```
//! use quarto_core::{Game, Outcome, Phase};
//!
//! let mut game = Game::new();
//! game.select_piece_for_opponent(5).unwrap();
//! assert_eq!(game.phase(), Phase::Placing);
//! assert_eq!(game.place_piece(0).unwrap(), Outcome::Ongoing);
//! ```

#[cfg(feature = "wasm")]
pub mod wasm;

pub mod board;
pub mod error;
pub mod game;
pub mod piece;

pub use board::{shared_attributes, Board, Line, Pos, WIN_LINES};
pub use error::{GameError, GameResult, PlacementFault, SelectionFault};
pub use game::{Game, GameSnapshot, Outcome, Phase, Player};
pub use piece::{generate, Attribute, Piece, PIECE_COUNT};
