//! JSON models for the API.

use serde::{Deserialize, Serialize};

use quarto_core::{board::SIDE, Game, GameError, Outcome, Phase, Piece, Player, Pos};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PieceModel {
    pub id: u8,
    pub tall: bool,
    pub dark: bool,
    pub square: bool,
    pub hole: bool,
    /// Compact notation, e.g. "TdSh"
    pub code: String,
}

impl From<Piece> for PieceModel {
    fn from(piece: Piece) -> Self {
        PieceModel {
            id: piece.id(),
            tall: piece.tall(),
            dark: piece.dark(),
            square: piece.square(),
            hole: piece.hole(),
            code: piece.to_string(),
        }
    }
}

/// One attribute held in common along the winning line, with its value.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SharedTraitModel {
    pub attribute: String,
    pub value: bool,
    /// "tall" / "short", "dark" / "light", ...
    pub label: String,
}

#[derive(Serialize, Debug)]
pub struct CellModel {
    pub index: u8,
    pub piece: Option<PieceModel>,
}

#[derive(Serialize, Debug)]
pub struct GameStateModel {
    /// 4 rows of 4 cells
    pub board: Vec<Vec<CellModel>>,
    pub available: Vec<PieceModel>,
    pub current_player: u8,
    pub phase: String,
    pub selected: Option<PieceModel>,
    pub result: String,
    /// What the current player should do next
    pub prompt: String,
    pub filled: usize,
    /// The winning line positions, if there's a winner
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_line: Option<Vec<(u8, u8)>>,
    /// Attributes shared along the winning line
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shared: Vec<SharedTraitModel>,
}

#[derive(Deserialize, Debug)]
pub struct SelectRequest {
    pub piece_id: u8,
}

/// Target cell, either as an index or as row/col.
#[derive(Deserialize, Debug, Default)]
pub struct PlaceRequest {
    pub cell: Option<u8>,
    pub row: Option<u8>,
    pub col: Option<u8>,
}

impl PlaceRequest {
    pub fn cell(&self) -> Result<u8, String> {
        match (self.cell, self.row, self.col) {
            (Some(cell), None, None) => Ok(cell),
            (None, Some(row), Some(col)) => {
                if row >= SIDE || col >= SIDE {
                    return Err("Position out of range".to_string());
                }
                Ok(Pos::from_row_col(row, col).0)
            }
            _ => Err("Must specify either cell or row/col".to_string()),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorModel {
    pub kind: String,
    pub detail: String,
}

impl From<GameError> for ErrorModel {
    fn from(err: GameError) -> Self {
        ErrorModel {
            kind: err.kind().to_string(),
            detail: err.to_string(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct HealthModel {
    pub status: String,
}

#[derive(Serialize, Debug)]
pub struct RulesModel {
    pub attributes: Vec<String>,
    pub rules: Vec<String>,
}

pub const RULES: [&str; 5] = [
    "Each of the 16 pieces is tall or short, dark or light, square or round, and hollow or solid.",
    "On your turn, first choose the piece your opponent must place.",
    "The player handed a piece places it on any empty cell; turns then pass to the other player.",
    "Completing a row, column or diagonal of four pieces that share at least one attribute wins.",
    "If the board fills up without such a line, the game is a draw.",
];

fn result_str(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Ongoing => "ongoing",
        Outcome::Win { player: Player::One, .. } => "player_one_wins",
        Outcome::Win { player: Player::Two, .. } => "player_two_wins",
        Outcome::Draw => "draw",
    }
}

fn prompt(game: &Game) -> String {
    let player = game.current_player() as u8;
    match (game.outcome(), game.phase()) {
        (Outcome::Win { player, .. }, _) => format!("Player {} wins!", player as u8),
        (Outcome::Draw, _) => "Draw: the board is full.".to_string(),
        (Outcome::Ongoing, Phase::Selecting) => {
            format!("Player {}: choose the piece your opponent will place", player)
        }
        (Outcome::Ongoing, Phase::Placing) => {
            format!("Player {}: place the selected piece on the board", player)
        }
    }
}

/// Convert Game to JSON-serializable GameStateModel
pub fn game_to_model(game: &Game) -> GameStateModel {
    let board = game.board();
    let rows = (0..SIDE)
        .map(|row| {
            (0..SIDE)
                .map(|col| {
                    let pos = Pos::from_row_col(row, col);
                    CellModel {
                        index: pos.0,
                        piece: board.get(pos).map(PieceModel::from),
                    }
                })
                .collect()
        })
        .collect();

    let winning_line = game.winning_line();
    let shared = winning_line
        .map(|line| board.line_traits(&line))
        .unwrap_or_default()
        .into_iter()
        .map(|(attr, value)| SharedTraitModel {
            attribute: attr.to_string(),
            value,
            label: attr.label(value).to_string(),
        })
        .collect();

    GameStateModel {
        board: rows,
        available: game.available().iter().copied().map(PieceModel::from).collect(),
        current_player: game.current_player() as u8,
        phase: match game.phase() {
            Phase::Selecting => "selecting".to_string(),
            Phase::Placing => "placing".to_string(),
        },
        selected: game.selected().map(PieceModel::from),
        result: result_str(game.outcome()).to_string(),
        prompt: prompt(game),
        filled: board.filled_count(),
        winning_line: winning_line
            .map(|line| line.iter().map(|pos| (pos.row(), pos.col())).collect()),
        shared,
    }
}
