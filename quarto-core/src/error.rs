//! Errors returned by rejected game commands.
//!
//! Both kinds are caller-usage errors. A rejected command leaves the game
//! exactly as it was.

/// Why a piece selection was rejected.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum SelectionFault {
    #[error("the game is over")]
    GameOver,

    #[error("a piece has already been selected and must be placed first")]
    WrongPhase,

    /// Already placed, or not a catalog id at all.
    #[error("piece {0} is not available")]
    NotAvailable(u8),
}

/// Why a placement was rejected.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum PlacementFault {
    #[error("the game is over")]
    GameOver,

    #[error("a piece must be selected before placing")]
    WrongPhase,

    #[error("no piece is pending placement")]
    NoPendingPiece,

    #[error("cell {0} is off the board")]
    OutOfRange(u8),

    #[error("cell {0} is already occupied")]
    Occupied(u8),
}

/// Errors that can occur when driving a game.
#[derive(Clone, Copy, PartialEq, Eq, Debug, thiserror::Error)]
pub enum GameError {
    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] SelectionFault),

    #[error("invalid placement: {0}")]
    InvalidPlacement(#[from] PlacementFault),
}

impl GameError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            GameError::InvalidSelection(_) => "invalid_selection",
            GameError::InvalidPlacement(_) => "invalid_placement",
        }
    }
}

/// Result type alias for game commands.
pub type GameResult<T> = Result<T, GameError>;
