//! The 4x4 board and win detection.
//!
//! Cell indices (row-major order):
//!
//! ```text
//!    0  1  2  3
//!    4  5  6  7
//!    8  9 10 11
//!   12 13 14 15
//! ```

use serde::{Deserialize, Serialize};

use crate::piece::{Attribute, Piece, PIECE_COUNT};

/// Cells per side.
pub const SIDE: u8 = 4;

/// Position on the 4x4 board (0-15).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pos(pub u8);

impl Pos {
    /// Create a position from row and column (0-3 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < SIDE && col < SIDE);
        Pos(row * SIDE + col)
    }

    /// Get the row (0-3).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / SIDE
    }

    /// Get the column (0-3).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % SIDE
    }

    /// Check if this is a valid position (0-15).
    #[inline]
    pub fn is_valid(self) -> bool {
        (self.0 as usize) < PIECE_COUNT
    }

    /// Iterate over all 16 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..PIECE_COUNT as u8).map(Pos)
    }

    #[inline]
    const fn bit(self) -> u16 {
        1 << self.0
    }
}

/// Four cells that win when their pieces share an attribute.
pub type Line = [Pos; 4];

/// The 10 winning lines: 4 rows, 4 columns, 2 diagonals.
///
/// Iteration order is significant: when one placement completes several
/// lines at once, the first in this list is reported.
pub const WIN_LINES: [Line; 10] = [
    [Pos(0), Pos(1), Pos(2), Pos(3)],     // Row 0
    [Pos(4), Pos(5), Pos(6), Pos(7)],     // Row 1
    [Pos(8), Pos(9), Pos(10), Pos(11)],   // Row 2
    [Pos(12), Pos(13), Pos(14), Pos(15)], // Row 3
    [Pos(0), Pos(4), Pos(8), Pos(12)],    // Col 0
    [Pos(1), Pos(5), Pos(9), Pos(13)],    // Col 1
    [Pos(2), Pos(6), Pos(10), Pos(14)],   // Col 2
    [Pos(3), Pos(7), Pos(11), Pos(15)],   // Col 3
    [Pos(0), Pos(5), Pos(10), Pos(15)],   // Main diagonal
    [Pos(3), Pos(6), Pos(9), Pos(12)],    // Anti-diagonal
];

/// Occupancy bitmasks for [`WIN_LINES`], same order.
const WIN_MASKS: [u16; 10] = [
    0x000F, // Row 0
    0x00F0, // Row 1
    0x0F00, // Row 2
    0xF000, // Row 3
    0x1111, // Col 0
    0x2222, // Col 1
    0x4444, // Col 2
    0x8888, // Col 3
    0x8421, // Main diagonal
    0x1248, // Anti-diagonal
];

/// Attributes on which all four pieces agree (all set or all clear).
pub fn shared_attributes(pieces: &[Piece; 4]) -> Vec<Attribute> {
    let mask = shared_mask(pieces);
    Attribute::ALL
        .into_iter()
        .filter(|attr| mask & attr.bit() != 0)
        .collect()
}

/// Bits of the attributes shared by all four pieces.
#[inline]
fn shared_mask(pieces: &[Piece; 4]) -> u8 {
    let all_set = pieces.iter().fold(Attribute::MASK, |acc, p| acc & p.traits());
    let all_clear = pieces.iter().fold(Attribute::MASK, |acc, p| acc & !p.traits());
    (all_set | all_clear) & Attribute::MASK
}

/// Board state: 16 cells, each empty or holding one piece.
///
/// A filled cell is never cleared or overwritten; the only mutation is
/// [`Board::put`] on an empty cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Piece>; PIECE_COUNT],
}

impl Board {
    /// Create an empty board.
    pub fn new() -> Board {
        Board::default()
    }

    /// Piece at a position, or `None` when the cell is empty or off the board.
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        self.cells.get(pos.0 as usize).copied().flatten()
    }

    /// Check if a cell is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos).is_none()
    }

    /// All cells in index order.
    pub fn cells(&self) -> &[Option<Piece>; PIECE_COUNT] {
        &self.cells
    }

    /// Bit `i` is set when cell `i` holds a piece.
    #[inline]
    pub fn occupancy(&self) -> u16 {
        Pos::all()
            .filter(|&pos| !self.is_empty(pos))
            .fold(0, |mask, pos| mask | pos.bit())
    }

    /// Number of filled cells.
    #[inline]
    pub fn filled_count(&self) -> usize {
        self.occupancy().count_ones() as usize
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.filled_count() == PIECE_COUNT
    }

    /// Whether a piece with this id is anywhere on the board.
    pub fn contains(&self, id: u8) -> bool {
        self.cells.iter().flatten().any(|p| p.id() == id)
    }

    /// Write a piece into an empty, in-range cell.
    ///
    /// Does NOT validate: the engine checks range and occupancy first.
    #[inline]
    pub(crate) fn put(&mut self, pos: Pos, piece: Piece) {
        debug_assert!(pos.is_valid() && self.is_empty(pos));
        self.cells[pos.0 as usize] = Some(piece);
    }

    /// The four pieces of a line, if every cell is filled.
    fn line_pieces(&self, line: &Line) -> Option<[Piece; 4]> {
        Some([
            self.get(line[0])?,
            self.get(line[1])?,
            self.get(line[2])?,
            self.get(line[3])?,
        ])
    }

    /// Whether a line is full and its pieces share at least one attribute.
    pub fn line_wins(&self, line: &Line) -> bool {
        self.line_pieces(line)
            .is_some_and(|pieces| shared_mask(&pieces) != 0)
    }

    /// Attributes shared along a line; empty if the line is incomplete.
    pub fn line_attributes(&self, line: &Line) -> Vec<Attribute> {
        self.line_pieces(line)
            .map(|pieces| shared_attributes(&pieces))
            .unwrap_or_default()
    }

    /// Shared attributes along a line paired with the value all four pieces
    /// hold (`false` means all lack it); empty if the line is incomplete.
    pub fn line_traits(&self, line: &Line) -> Vec<(Attribute, bool)> {
        let Some(pieces) = self.line_pieces(line) else {
            return Vec::new();
        };
        shared_attributes(&pieces)
            .into_iter()
            .map(|attr| (attr, pieces[0].has(attr)))
            .collect()
    }

    /// Get the first winning line in [`WIN_LINES`] order, if any.
    pub fn winning_line(&self) -> Option<Line> {
        let occupied = self.occupancy();
        WIN_LINES
            .iter()
            .zip(WIN_MASKS)
            .filter(|&(_, mask)| occupied & mask == mask)
            .map(|(line, _)| line)
            .find(|line| self.line_wins(line))
            .copied()
    }

    /// Every winning line on the board, in [`WIN_LINES`] order.
    pub fn winning_lines(&self) -> Vec<Line> {
        WIN_LINES
            .iter()
            .filter(|line| self.line_wins(line))
            .copied()
            .collect()
    }
}
