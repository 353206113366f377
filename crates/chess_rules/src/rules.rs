//! Movement rules for each piece kind.
//!
//! Every predicate answers "can this piece go from `from` to `to` on this
//! board", looking only at the board snapshot. Whose turn it is and whether
//! the mover's own king ends up in check are the legality filter's job; the
//! one exception is the king step, which refuses squares that are attacked
//! or next to the opposing king.

use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    check::king_safe_on,
    types::*,
};

/// The rook half of a castling move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RookRelocation {
    pub from: Square,
    pub to: Square,
}

impl RookRelocation {
    pub fn for_castle(row: u8, side: CastleSide) -> Option<Self> {
        Some(RookRelocation {
            from: Square::new(row, side.rook_from_col())?,
            to: Square::new(row, side.rook_to_col())?,
        })
    }
}

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Dispatch to the predicate for `piece.kind`.
///
/// For a king this covers single steps only; two-column castling moves are
/// recognised by [`castle_side`] and validated by the legality filter.
pub fn can_move(
    board: &Board,
    piece: Piece,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> bool {
    match piece.kind {
        PieceKind::Pawn => pawn_can_move(board, piece.color, from, to, en_passant),
        PieceKind::Knight => knight_can_move(board, piece.color, from, to),
        PieceKind::Bishop => bishop_can_move(board, piece.color, from, to),
        PieceKind::Rook => rook_can_move(board, piece.color, from, to),
        PieceKind::Queen => queen_can_move(board, piece.color, from, to),
        PieceKind::King => king_can_step(board, piece.color, from, to),
    }
}

fn lands_on_own_piece(board: &Board, c: Color, to: Square) -> bool {
    board.color_at(to) == Some(c)
}

pub fn pawn_can_move(
    board: &Board,
    c: Color,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> bool {
    let dir = c.forward();
    let dr = row_delta(from, to);
    let dc = col_delta(from, to);

    if dc == 0 {
        if !board.is_empty(to) {
            return false;
        }
        if dr == dir {
            return true;
        }
        // Double step from the home row, both squares empty
        return dr == 2 * dir
            && from.row() == c.pawn_row()
            && from.offset(dir, 0).is_some_and(|mid| board.is_empty(mid));
    }

    if dc.abs() != 1 || dr != dir {
        return false;
    }
    match board.color_at(to) {
        Some(target) => target != c,
        None => en_passant == Some(to),
    }
}

pub fn knight_can_move(board: &Board, c: Color, from: Square, to: Square) -> bool {
    let dr = row_delta(from, to).abs();
    let dc = col_delta(from, to).abs();
    ((dr == 1 && dc == 2) || (dr == 2 && dc == 1)) && !lands_on_own_piece(board, c, to)
}

pub fn bishop_can_move(board: &Board, c: Color, from: Square, to: Square) -> bool {
    slides(board, c, from, to, &DIAGONALS)
}

pub fn rook_can_move(board: &Board, c: Color, from: Square, to: Square) -> bool {
    slides(board, c, from, to, &ORTHOGONALS)
}

pub fn queen_can_move(board: &Board, c: Color, from: Square, to: Square) -> bool {
    bishop_can_move(board, c, from, to) || rook_can_move(board, c, from, to)
}

/// One-square king move. Rejects a destination that would stand next to the
/// opposing king or be in check once the king is there.
pub fn king_can_step(board: &Board, c: Color, from: Square, to: Square) -> bool {
    let dr = row_delta(from, to).abs();
    let dc = col_delta(from, to).abs();
    if dr > 1 || dc > 1 || (dr == 0 && dc == 0) || lands_on_own_piece(board, c, to) {
        return false;
    }

    king_safe_on(board, from, to, c)
}

/// Castling geometry: a king on its start square moving two columns along
/// its own back row. Says nothing about whether castling is allowed.
pub fn castle_side(c: Color, from: Square, to: Square) -> Option<CastleSide> {
    if from.row() != c.back_row()
        || from.col() != KING_START_COL
        || to.row() != from.row()
        || col_delta(from, to).abs() != 2
    {
        return None;
    }
    CastleSide::from_king_target(to.col())
}

// Walk the ray from `from` toward `to`; every square strictly between must be empty.
fn slides(board: &Board, c: Color, from: Square, to: Square, dirs: &[(i8, i8)]) -> bool {
    let dr = row_delta(from, to);
    let dc = col_delta(from, to);
    let step = (dr.signum(), dc.signum());
    let aligned = (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && (dr, dc) != (0, 0);
    if !aligned || !dirs.contains(&step) {
        return false;
    }

    let mut cur = from.offset(step.0, step.1);
    while let Some(s) = cur {
        if s == to {
            return !lands_on_own_piece(board, c, to);
        }
        if !board.is_empty(s) {
            return false;
        }
        cur = s.offset(step.0, step.1);
    }
    false
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod rules_tests;
