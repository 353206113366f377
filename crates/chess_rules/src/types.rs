use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}
impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Row delta of a forward pawn step. White starts on row 6 and moves toward row 0.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start of the game.
    pub fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row on which a pawn of this colour promotes.
    pub fn promotion_row(self) -> u8 {
        self.other().back_row()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

/// Replacement kinds a pawn may promote to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];

    pub fn kind(self) -> PieceKind {
        match self {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Knight => PieceKind::Knight,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastleSide {
    /// Toward the a-file rook.
    QueenSide,
    /// Toward the h-file rook.
    KingSide,
}

impl CastleSide {
    /// Side implied by a two-column king move, judged from the destination column.
    pub fn from_king_target(to_col: u8) -> Option<CastleSide> {
        match to_col {
            KING_START_COL_QUEENSIDE_TARGET => Some(CastleSide::QueenSide),
            KING_START_COL_KINGSIDE_TARGET => Some(CastleSide::KingSide),
            _ => None,
        }
    }
    pub fn rook_from_col(self) -> u8 {
        match self {
            CastleSide::QueenSide => 0,
            CastleSide::KingSide => 7,
        }
    }
    pub fn rook_to_col(self) -> u8 {
        match self {
            CastleSide::QueenSide => 3,
            CastleSide::KingSide => 5,
        }
    }
    pub fn king_to_col(self) -> u8 {
        match self {
            CastleSide::QueenSide => KING_START_COL_QUEENSIDE_TARGET,
            CastleSide::KingSide => KING_START_COL_KINGSIDE_TARGET,
        }
    }
}

/// Column both kings start on.
pub const KING_START_COL: u8 = 4;
const KING_START_COL_QUEENSIDE_TARGET: u8 = KING_START_COL - 2;
const KING_START_COL_KINGSIDE_TARGET: u8 = KING_START_COL + 2;

/// A board coordinate. Row 0 is Black's back rank, column 0 the a-file.
///
/// Only constructible inside the 8x8 board, so the rest of the engine never
/// indexes outside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Square> {
        if row < 8 && col < 8 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Signed variant of [`Square::new`], handy for stepping with deltas.
    pub fn at(row: i8, col: i8) -> Option<Square> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn row(self) -> u8 {
        self.row
    }
    pub fn col(self) -> u8 {
        self.col
    }

    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        Square::at(self.row as i8 + d_row, self.col as i8 + d_col)
    }

    /// All 64 squares, row by row.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl TryFrom<(u8, u8)> for Square {
    type Error = String;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        Square::new(row, col).ok_or_else(|| format!("square ({row}, {col}) is off the board"))
    }
}

impl From<Square> for (u8, u8) {
    fn from(sq: Square) -> Self {
        (sq.row, sq.col)
    }
}

/// Signed row distance from `from` to `to`.
pub fn row_delta(from: Square, to: Square) -> i8 {
    to.row as i8 - from.row as i8
}
/// Signed column distance from `from` to `to`.
pub fn col_delta(from: Square, to: Square) -> i8 {
    to.col as i8 - from.col as i8
}
