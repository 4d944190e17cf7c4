//! WASM bindings for quarto-core
//!
//! Provides a JavaScript-friendly API for the game logic.

use wasm_bindgen::prelude::*;

use crate::{Game, Outcome, Phase, Player, Pos};

/// WASM-friendly wrapper around Game
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a new game
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { inner: Game::new() }
    }

    /// Full snapshot (board, available pieces, turn, selection, outcome)
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.snapshot()).map_err(JsValue::from)
    }

    /// Current player (1 or 2)
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> u8 {
        self.inner.current_player() as u8
    }

    /// "selecting" or "placing"
    pub fn phase(&self) -> String {
        match self.inner.phase() {
            Phase::Selecting => "selecting".to_string(),
            Phase::Placing => "placing".to_string(),
        }
    }

    /// Id of the piece waiting to be placed
    #[wasm_bindgen(js_name = selectedPiece)]
    pub fn selected_piece(&self) -> Option<u8> {
        self.inner.selected().map(|p| p.id())
    }

    /// Ids of pieces not yet placed
    #[wasm_bindgen(js_name = availablePieces)]
    pub fn available_pieces(&self) -> Vec<u8> {
        self.inner.available().iter().map(|p| p.id()).collect()
    }

    /// Id of the piece at a cell, if any
    #[wasm_bindgen(js_name = cellPiece)]
    pub fn cell_piece(&self, cell: u8) -> Option<u8> {
        self.inner.board().get(Pos(cell)).map(|p| p.id())
    }

    /// Get winning line as array of positions [row, col, row, col, ...]
    /// Returns empty array if no winner
    #[wasm_bindgen(js_name = winningLine)]
    pub fn winning_line(&self) -> Vec<u8> {
        self.inner
            .winning_line()
            .map(|line| line.iter().flat_map(|pos| [pos.row(), pos.col()]).collect())
            .unwrap_or_default()
    }

    /// Get game result: "ongoing", "player_one_wins", "player_two_wins", or "draw"
    pub fn result(&self) -> String {
        match self.inner.outcome() {
            Outcome::Ongoing => "ongoing".to_string(),
            Outcome::Win { player: Player::One, .. } => "player_one_wins".to_string(),
            Outcome::Win { player: Player::Two, .. } => "player_two_wins".to_string(),
            Outcome::Draw => "draw".to_string(),
        }
    }

    /// Check if game is over (win or draw)
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.inner.is_over()
    }

    /// Choose the piece the opponent must place
    #[wasm_bindgen(js_name = selectPiece)]
    pub fn select_piece(&mut self, piece_id: u8) -> Result<(), JsError> {
        self.inner.select_piece_for_opponent(piece_id)?;
        Ok(())
    }

    /// Place the selected piece. Returns the result string afterwards.
    #[wasm_bindgen(js_name = placePiece)]
    pub fn place_piece(&mut self, cell: u8) -> Result<String, JsError> {
        self.inner.place_piece(cell)?;
        Ok(self.result())
    }

    /// Start a new game
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}
