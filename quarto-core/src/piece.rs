//! The piece catalog.
//!
//! Every piece is one combination of four binary attributes, so the full set
//! is exactly 16 pieces. Ids follow the bit layout of [`Piece::traits`]:
//!
//! ```text
//! Bit 3: tall
//! Bit 2: dark
//! Bit 1: square
//! Bit 0: hole
//!
//! id = tall*8 + dark*4 + square*2 + hole
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of pieces in a game (and cells on the board).
pub const PIECE_COUNT: usize = 16;

/// One of the four binary properties of a piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Tall,
    Dark,
    Square,
    Hole,
}

impl Attribute {
    /// All attributes, most significant bit first.
    pub const ALL: [Attribute; 4] = [
        Attribute::Tall,
        Attribute::Dark,
        Attribute::Square,
        Attribute::Hole,
    ];

    /// Mask covering every attribute bit.
    pub const MASK: u8 = 0b1111;

    /// Bit of this attribute within a trait mask.
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Attribute::Tall => 0b1000,
            Attribute::Dark => 0b0100,
            Attribute::Square => 0b0010,
            Attribute::Hole => 0b0001,
        }
    }

    /// Word for a piece that has (`true`) or lacks (`false`) this attribute.
    pub const fn label(self, value: bool) -> &'static str {
        match (self, value) {
            (Attribute::Tall, true) => "tall",
            (Attribute::Tall, false) => "short",
            (Attribute::Dark, true) => "dark",
            (Attribute::Dark, false) => "light",
            (Attribute::Square, true) => "square",
            (Attribute::Square, false) => "round",
            (Attribute::Hole, true) => "hollow",
            (Attribute::Hole, false) => "solid",
        }
    }

    /// Letter used in the compact piece notation (uppercase when set).
    const fn letter(self) -> char {
        match self {
            Attribute::Tall => 'T',
            Attribute::Dark => 'D',
            Attribute::Square => 'S',
            Attribute::Hole => 'H',
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Attribute::Tall => "tall",
            Attribute::Dark => "dark",
            Attribute::Square => "square",
            Attribute::Hole => "hole",
        };
        f.write_str(name)
    }
}

/// A Quarto piece. Immutable once generated.
///
/// Deserializing goes through [`Piece::from_id`], so the attribute flags
/// must agree with the id.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "PieceRepr")]
pub struct Piece {
    id: u8,
    tall: bool,
    dark: bool,
    square: bool,
    hole: bool,
}

impl Piece {
    /// Build the piece with the given id (0-15).
    #[inline]
    pub const fn from_id(id: u8) -> Option<Piece> {
        if id as usize >= PIECE_COUNT {
            return None;
        }
        Some(Piece {
            id,
            tall: id & Attribute::Tall.bit() != 0,
            dark: id & Attribute::Dark.bit() != 0,
            square: id & Attribute::Square.bit() != 0,
            hole: id & Attribute::Hole.bit() != 0,
        })
    }

    #[inline]
    pub const fn id(self) -> u8 {
        self.id
    }

    #[inline]
    pub const fn tall(self) -> bool {
        self.tall
    }

    #[inline]
    pub const fn dark(self) -> bool {
        self.dark
    }

    #[inline]
    pub const fn square(self) -> bool {
        self.square
    }

    #[inline]
    pub const fn hole(self) -> bool {
        self.hole
    }

    /// Project a single attribute.
    #[inline]
    pub const fn has(self, attr: Attribute) -> bool {
        match attr {
            Attribute::Tall => self.tall,
            Attribute::Dark => self.dark,
            Attribute::Square => self.square,
            Attribute::Hole => self.hole,
        }
    }

    /// All four attributes packed into a 4-bit mask.
    #[inline]
    pub fn traits(self) -> u8 {
        Attribute::ALL
            .iter()
            .filter(|&&attr| self.has(attr))
            .fold(0, |mask, attr| mask | attr.bit())
    }
}

/// Wire shape of a piece, checked against the catalog on the way in.
#[derive(Deserialize)]
struct PieceRepr {
    id: u8,
    tall: bool,
    dark: bool,
    square: bool,
    hole: bool,
}

impl TryFrom<PieceRepr> for Piece {
    type Error = String;

    fn try_from(repr: PieceRepr) -> Result<Piece, String> {
        let piece = Piece::from_id(repr.id).ok_or_else(|| format!("invalid piece id: {}", repr.id))?;
        let flags = (repr.tall, repr.dark, repr.square, repr.hole);
        if flags != (piece.tall, piece.dark, piece.square, piece.hole) {
            return Err(format!("attributes do not match piece id {}", repr.id));
        }
        Ok(piece)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attr in Attribute::ALL {
            let letter = attr.letter();
            let c = if self.has(attr) {
                letter
            } else {
                letter.to_ascii_lowercase()
            };
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

/// Generate the full catalog of 16 pieces, ordered by id.
pub fn generate() -> Vec<Piece> {
    (0..PIECE_COUNT as u8).filter_map(Piece::from_id).collect()
}
