use serde::{Deserialize, Serialize};

use crate::types::*;

/// Has-moved flags for the pieces that take part in castling.
///
/// Flags only ever go from `false` to `true`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_king_moved: bool,
    pub black_king_moved: bool,
    pub white_rook_a_moved: bool,
    pub white_rook_h_moved: bool,
    pub black_rook_a_moved: bool,
    pub black_rook_h_moved: bool,
}

impl CastlingRights {
    /// Everything marked as moved; no castling is possible.
    pub fn all_moved() -> Self {
        Self {
            white_king_moved: true,
            black_king_moved: true,
            white_rook_a_moved: true,
            white_rook_h_moved: true,
            black_rook_a_moved: true,
            black_rook_h_moved: true,
        }
    }

    pub fn king_moved(&self, c: Color) -> bool {
        match c {
            Color::White => self.white_king_moved,
            Color::Black => self.black_king_moved,
        }
    }

    pub fn rook_moved(&self, c: Color, side: CastleSide) -> bool {
        match (c, side) {
            (Color::White, CastleSide::QueenSide) => self.white_rook_a_moved,
            (Color::White, CastleSide::KingSide) => self.white_rook_h_moved,
            (Color::Black, CastleSide::QueenSide) => self.black_rook_a_moved,
            (Color::Black, CastleSide::KingSide) => self.black_rook_h_moved,
        }
    }

    /// Record that `piece` started a move from `from`. Only a king or rook
    /// leaving its original square changes anything.
    pub fn record_departure(&mut self, piece: Piece, from: Square) {
        if from.row() != piece.color.back_row() {
            return;
        }
        match piece.kind {
            PieceKind::King if from.col() == KING_START_COL => match piece.color {
                Color::White => self.white_king_moved = true,
                Color::Black => self.black_king_moved = true,
            },
            PieceKind::Rook => {
                let side = match from.col() {
                    0 => CastleSide::QueenSide,
                    7 => CastleSide::KingSide,
                    _ => return,
                };
                match (piece.color, side) {
                    (Color::White, CastleSide::QueenSide) => self.white_rook_a_moved = true,
                    (Color::White, CastleSide::KingSide) => self.white_rook_h_moved = true,
                    (Color::Black, CastleSide::QueenSide) => self.black_rook_a_moved = true,
                    (Color::Black, CastleSide::KingSide) => self.black_rook_h_moved = true,
                }
            }
            _ => {}
        }
    }
}

/// 8x8 grid of optional pieces, indexed `[row][col]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Standard starting position: Black on rows 0-1, White on rows 6-7.
    pub fn standard() -> Self {
        let mut b = Board::empty();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for color in [Color::White, Color::Black] {
            for (col, &kind) in back.iter().enumerate() {
                b.squares[color.back_row() as usize][col] = Some(Piece::new(color, kind));
                b.squares[color.pawn_row() as usize][col] =
                    Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        b
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row() as usize][sq.col() as usize]
    }
    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        self.squares[sq.row() as usize][sq.col() as usize] = pc;
    }
    /// Remove and return whatever stands on `sq`.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.row() as usize][sq.col() as usize].take()
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|pc| pc.color)
    }

    /// Move whatever is on `from` to `to`, overwriting the destination.
    pub fn relocate(&mut self, from: Square, to: Square) {
        let pc = self.take(from);
        self.set_piece(to, pc);
    }

    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, pc)| pc.color == c && pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }
}

impl FromIterator<(Square, Piece)> for Board {
    /// Build a board from placements, starting from an empty grid.
    fn from_iter<I: IntoIterator<Item = (Square, Piece)>>(iter: I) -> Self {
        let mut b = Board::empty();
        for (sq, pc) in iter {
            b.set_piece(sq, Some(pc));
        }
        b
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
