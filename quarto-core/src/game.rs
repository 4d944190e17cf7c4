//! The game engine: turn/phase state machine over a board and piece pool.
//!
//! ```text
//!            select_piece_for_opponent            place_piece (no win, pool left)
//! Selecting ─────────────────────────> Placing ──────────────────────────────> Selecting
//!                                         │                                 (other player)
//!                                         ├── line completed ──> Win (frozen)
//!                                         └── pool emptied ────> Draw (frozen)
//! ```
//!
//! The player who selects is also the one who places: `current_player` only
//! changes once a placement completes the turn.

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Line, Pos};
use crate::error::{GameError, GameResult, PlacementFault, SelectionFault};
use crate::piece::{self, Piece};

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Player {
    One = 1,
    Two = 2,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Convert from u8 (1 or 2) to Player.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Player> {
        match bits {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        player as u8
    }
}

impl TryFrom<u8> for Player {
    type Error = String;

    fn try_from(bits: u8) -> Result<Player, String> {
        Player::from_bits(bits).ok_or_else(|| format!("invalid player: {}", bits))
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", *self as u8)
    }
}

/// What the current player must do next.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Choose the piece the opponent will place.
    Selecting,
    /// Place the pending piece on an empty cell.
    Placing,
}

/// Result of the game so far.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Outcome {
    Ongoing,
    Win { player: Player, line: Line },
    Draw,
}

impl Outcome {
    /// Once terminal, nothing but a reset changes the game.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::Win { player, .. } => Some(*player),
            _ => None,
        }
    }
}

/// Read-only view of a game handed to the presentation layer.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub available: Vec<Piece>,
    pub current_player: Player,
    pub phase: Phase,
    pub selected: Option<Piece>,
    pub outcome: Outcome,
}

/// A single game of Quarto.
///
/// Every command either applies fully or returns an error and leaves the
/// game untouched.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct Game {
    board: Board,
    /// Pieces not yet placed, in catalog order.
    available: Vec<Piece>,
    current_player: Player,
    phase: Phase,
    /// Piece waiting to be placed; set exactly while in `Placing`.
    selected: Option<Piece>,
    outcome: Outcome,
}

impl Game {
    /// Create a game in its initial state: empty board, all 16 pieces
    /// available, player one to select.
    pub fn new() -> Game {
        Game {
            board: Board::new(),
            available: piece::generate(),
            current_player: Player::One,
            phase: Phase::Selecting,
            selected: None,
            outcome: Outcome::Ongoing,
        }
    }

    // ========== Queries ==========

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pieces not yet placed, in catalog order.
    pub fn available(&self) -> &[Piece] {
        &self.available
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The piece chosen for placement, if any.
    pub fn selected(&self) -> Option<Piece> {
        self.selected
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The line to highlight after a win.
    pub fn winning_line(&self) -> Option<Line> {
        match self.outcome {
            Outcome::Win { line, .. } => Some(line),
            _ => None,
        }
    }

    pub fn winner(&self) -> Option<Player> {
        self.outcome.winner()
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Look up a catalog piece by id.
    pub fn piece(&self, id: u8) -> Option<Piece> {
        Piece::from_id(id)
    }

    /// Whether a piece can still be selected at some point.
    pub fn is_available(&self, id: u8) -> bool {
        self.available.iter().any(|p| p.id() == id)
    }

    /// Cells a pending piece could go to.
    pub fn empty_cells(&self) -> Vec<Pos> {
        Pos::all().filter(|&pos| self.board.is_empty(pos)).collect()
    }

    /// Copy the current state out for rendering.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board,
            available: self.available.clone(),
            current_player: self.current_player,
            phase: self.phase,
            selected: self.selected,
            outcome: self.outcome,
        }
    }

    // ========== Commands ==========

    /// Choose the piece the opponent has to place.
    ///
    /// The piece stays in the pool until it is placed.
    pub fn select_piece_for_opponent(&mut self, piece_id: u8) -> GameResult<Piece> {
        if self.outcome.is_terminal() {
            return reject(SelectionFault::GameOver);
        }
        if self.phase != Phase::Selecting {
            return reject(SelectionFault::WrongPhase);
        }
        let Some(piece) = self.available.iter().copied().find(|p| p.id() == piece_id) else {
            return reject(SelectionFault::NotAvailable(piece_id));
        };

        self.selected = Some(piece);
        self.phase = Phase::Placing;
        debug!("{} selected {} (id {})", self.current_player, piece, piece.id());
        Ok(piece)
    }

    /// Place the pending piece on an empty cell.
    ///
    /// The win check runs on the full board before any other bookkeeping, so
    /// a placement that both completes a line and empties the pool is a win.
    /// On a win or draw the turn does not advance and the pending piece is
    /// kept for display.
    ///
    /// The placed piece always leaves the pool, winning move included, so
    /// pool size plus filled cells stays at 16 in every state. Only the
    /// turn, phase and pending selection are frozen on a win.
    pub fn place_piece(&mut self, cell: u8) -> GameResult<Outcome> {
        if self.outcome.is_terminal() {
            return reject(PlacementFault::GameOver);
        }
        if self.phase != Phase::Placing {
            return reject(PlacementFault::WrongPhase);
        }
        let Some(piece) = self.selected else {
            return reject(PlacementFault::NoPendingPiece);
        };
        let pos = Pos(cell);
        if !pos.is_valid() {
            return reject(PlacementFault::OutOfRange(cell));
        }
        if !self.board.is_empty(pos) {
            return reject(PlacementFault::Occupied(cell));
        }

        self.board.put(pos, piece);
        let won = self.board.winning_line();
        self.available.retain(|p| p.id() != piece.id());
        debug!("{} placed {} at {}", self.current_player, piece, cell);

        if let Some(line) = won {
            self.outcome = Outcome::Win {
                player: self.current_player,
                line,
            };
            info!(
                "{} wins on {:?} ({} pieces left)",
                self.current_player,
                line.map(|p| p.0),
                self.available.len()
            );
            return Ok(self.outcome);
        }

        if self.available.is_empty() {
            self.outcome = Outcome::Draw;
            info!("board full with no winning line, game drawn");
            return Ok(self.outcome);
        }

        self.selected = None;
        self.current_player = self.current_player.opponent();
        self.phase = Phase::Selecting;
        Ok(self.outcome)
    }

    /// Discard everything and start over from the initial state.
    pub fn reset(&mut self) {
        *self = Game::new();
        info!("game reset");
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn reject<T>(fault: impl Into<GameError>) -> GameResult<T> {
    let err = fault.into();
    debug!("rejected: {}", err);
    Err(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PIECE_COUNT;
    use pretty_assertions::assert_eq;

    /// Select `id` and place it at `cell`.
    fn play(game: &mut Game, id: u8, cell: u8) -> Outcome {
        game.select_piece_for_opponent(id).unwrap();
        game.place_piece(cell).unwrap()
    }

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
        assert_eq!(Player::from_bits(3), None);
    }

    #[test]
    fn test_initial_state() {
        let game = Game::new();
        assert!(game.board().cells().iter().all(Option::is_none));
        assert_eq!(game.available().len(), PIECE_COUNT);
        assert_eq!(game.current_player(), Player::One);
        assert_eq!(game.phase(), Phase::Selecting);
        assert_eq!(game.selected(), None);
        assert_eq!(game.outcome(), Outcome::Ongoing);
        assert_eq!(game.empty_cells().len(), 16);
    }

    #[test]
    fn test_select_moves_to_placing() {
        let mut game = Game::new();
        let piece = game.select_piece_for_opponent(9).unwrap();
        assert_eq!(piece.id(), 9);
        assert_eq!(game.phase(), Phase::Placing);
        assert_eq!(game.selected(), Some(piece));
        // Still in the pool and still the same player
        assert!(game.is_available(9));
        assert_eq!(game.available().len(), 16);
        assert_eq!(game.current_player(), Player::One);
    }

    #[test]
    fn test_select_twice_rejected() {
        let mut game = Game::new();
        game.select_piece_for_opponent(3).unwrap();
        let before = game.clone();

        let err = game.select_piece_for_opponent(4).unwrap_err();
        assert_eq!(err, GameError::InvalidSelection(SelectionFault::WrongPhase));
        assert_eq!(game, before);
        assert_eq!(game.selected().map(Piece::id), Some(3));
    }

    #[test]
    fn test_select_unknown_id() {
        let mut game = Game::new();
        let err = game.select_piece_for_opponent(16).unwrap_err();
        assert_eq!(err, GameError::InvalidSelection(SelectionFault::NotAvailable(16)));
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_select_placed_piece() {
        let mut game = Game::new();
        play(&mut game, 5, 0);
        let before = game.clone();
        let err = game.select_piece_for_opponent(5).unwrap_err();
        assert_eq!(err, GameError::InvalidSelection(SelectionFault::NotAvailable(5)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_place_completes_turn() {
        let mut game = Game::new();
        let outcome = play(&mut game, 5, 6);
        assert_eq!(outcome, Outcome::Ongoing);
        assert_eq!(game.board().get(Pos(6)).map(Piece::id), Some(5));
        assert!(!game.is_available(5));
        assert_eq!(game.available().len(), 15);
        assert_eq!(game.selected(), None);
        assert_eq!(game.phase(), Phase::Selecting);
        assert_eq!(game.current_player(), Player::Two);
    }

    #[test]
    fn test_place_without_selection() {
        let mut game = Game::new();
        let err = game.place_piece(0).unwrap_err();
        assert_eq!(err, GameError::InvalidPlacement(PlacementFault::WrongPhase));
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_place_out_of_range() {
        let mut game = Game::new();
        game.select_piece_for_opponent(1).unwrap();
        let before = game.clone();
        let err = game.place_piece(16).unwrap_err();
        assert_eq!(err, GameError::InvalidPlacement(PlacementFault::OutOfRange(16)));
        assert_eq!(game, before);
    }

    #[test]
    fn test_place_on_occupied_cell() {
        let mut game = Game::new();
        play(&mut game, 1, 10);
        game.select_piece_for_opponent(2).unwrap();
        let before = game.clone();

        let err = game.place_piece(10).unwrap_err();
        assert_eq!(err, GameError::InvalidPlacement(PlacementFault::Occupied(10)));
        assert_eq!(game, before);

        // The pending piece can still go elsewhere
        assert_eq!(game.place_piece(11), Ok(Outcome::Ongoing));
    }

    #[test]
    fn test_win_freezes_game() {
        let mut game = Game::new();
        // Dark pieces along row 0
        play(&mut game, 4, 0);
        play(&mut game, 5, 1);
        play(&mut game, 6, 2);
        let outcome = play(&mut game, 7, 3);

        let line = [Pos(0), Pos(1), Pos(2), Pos(3)];
        assert_eq!(outcome, Outcome::Win { player: Player::Two, line });
        assert_eq!(game.winning_line(), Some(line));
        assert_eq!(game.winner(), Some(Player::Two));
        assert!(game.is_over());
        // Turn did not advance, pending piece kept for display
        assert_eq!(game.current_player(), Player::Two);
        assert_eq!(game.phase(), Phase::Placing);
        assert_eq!(game.selected().map(Piece::id), Some(7));
        // The winning piece still left the pool
        assert!(!game.is_available(7));
        assert_eq!(game.available().len(), 12);
        assert_eq!(game.available().len() + game.board().filled_count(), 16);

        let frozen = game.clone();
        assert_eq!(
            game.place_piece(4),
            Err(GameError::InvalidPlacement(PlacementFault::GameOver))
        );
        assert_eq!(
            game.select_piece_for_opponent(0),
            Err(GameError::InvalidSelection(SelectionFault::GameOver))
        );
        assert_eq!(game, frozen);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = Game::new();
        play(&mut game, 0, 0);
        play(&mut game, 1, 5);
        game.select_piece_for_opponent(2).unwrap();
        game.reset();
        assert_eq!(game, Game::new());
    }

    #[test]
    fn test_snapshot_matches_queries() {
        let mut game = Game::new();
        play(&mut game, 12, 3);
        game.select_piece_for_opponent(8).unwrap();

        let snap = game.snapshot();
        assert_eq!(&snap.board, game.board());
        assert_eq!(snap.available.as_slice(), game.available());
        assert_eq!(snap.current_player, Player::Two);
        assert_eq!(snap.phase, Phase::Placing);
        assert_eq!(snap.selected.map(Piece::id), Some(8));
        assert_eq!(snap.outcome, Outcome::Ongoing);
    }
}
