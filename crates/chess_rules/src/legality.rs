//! Legal move filter.
//!
//! Composes the piece movement rules with check detection: a move the piece
//! could make is still illegal if it leaves the mover's own king in check.
//! Castling preconditions live here as well.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, CastlingRights},
    check::{king_safe_on, side_in_check},
    rules::{RookRelocation, can_move, castle_side},
    types::*,
};

/// Verdict of the legality filter for one candidate move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCheck {
    pub valid: bool,
    /// Present only for a legal castling move.
    pub rook_relocation: Option<RookRelocation>,
}

impl MoveCheck {
    pub fn illegal() -> Self {
        Self::default()
    }
    pub fn legal(rook_relocation: Option<RookRelocation>) -> Self {
        Self {
            valid: true,
            rook_relocation,
        }
    }
}

pub fn is_legal_move(
    board: &Board,
    piece: Piece,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
    castling: &CastlingRights,
) -> MoveCheck {
    if from == to {
        return MoveCheck::illegal();
    }

    let rook_relocation = match castle_side(piece.color, from, to) {
        Some(side) if piece.kind == PieceKind::King => {
            match castling_relocation(board, piece.color, from, side, castling) {
                Some(reloc) => Some(reloc),
                None => return MoveCheck::illegal(),
            }
        }
        _ => {
            if !can_move(board, piece, from, to, en_passant) {
                return MoveCheck::illegal();
            }
            None
        }
    };

    let scratch = play_on_copy(board, piece, from, to, en_passant, rook_relocation);
    if side_in_check(&scratch, piece.color) {
        return MoveCheck::illegal();
    }
    MoveCheck::legal(rook_relocation)
}

/// Extra preconditions for castling toward `side`. Returns the rook
/// relocation when every one of them holds:
/// - neither the king nor that rook has moved, and the rook is still there
/// - every square strictly between king and rook is empty
/// - the king's start, transit and end squares are not attacked
pub fn castling_relocation(
    board: &Board,
    c: Color,
    king_from: Square,
    side: CastleSide,
    castling: &CastlingRights,
) -> Option<RookRelocation> {
    if castling.king_moved(c) || castling.rook_moved(c, side) {
        return None;
    }
    let reloc = RookRelocation::for_castle(king_from.row(), side)?;
    if board.piece_at(reloc.from) != Some(Piece::new(c, PieceKind::Rook)) {
        return None;
    }

    let row = king_from.row();
    let king_col = king_from.col();
    let rook_col = reloc.from.col();
    let between = (king_col.min(rook_col) + 1)..king_col.max(rook_col);
    for col in between {
        if !board.is_empty(Square::new(row, col)?) {
            return None;
        }
    }

    let king_to = side.king_to_col();
    let path = king_col.min(king_to)..=king_col.max(king_to);
    for col in path {
        if !king_safe_on(board, king_from, Square::new(row, col)?, c) {
            return None;
        }
    }
    Some(reloc)
}

/// Square of the pawn removed by an en passant capture, if this move is one.
pub fn en_passant_victim(
    piece: Piece,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
) -> Option<Square> {
    if piece.kind != PieceKind::Pawn || en_passant != Some(to) || from.col() == to.col() {
        return None;
    }
    to.offset(-piece.color.forward(), 0)
}

/// Play a candidate move on an independent copy of `board`.
pub fn play_on_copy(
    board: &Board,
    piece: Piece,
    from: Square,
    to: Square,
    en_passant: Option<Square>,
    rook_relocation: Option<RookRelocation>,
) -> Board {
    let mut scratch = board.clone();
    if let Some(victim) = en_passant_victim(piece, from, to, en_passant) {
        scratch.set_piece(victim, None);
    }
    scratch.set_piece(from, None);
    scratch.set_piece(to, Some(piece));
    if let Some(reloc) = rook_relocation {
        scratch.relocate(reloc.from, reloc.to);
    }
    scratch
}

/// Every square the piece on `from` may legally move to.
pub fn legal_destinations_from(
    board: &Board,
    from: Square,
    en_passant: Option<Square>,
    castling: &CastlingRights,
) -> BTreeSet<Square> {
    let Some(piece) = board.piece_at(from) else {
        return BTreeSet::new();
    };
    Square::all()
        .filter(|&to| is_legal_move(board, piece, from, to, en_passant, castling).valid)
        .collect()
}

/// Does side `c` have at least one legal move?
pub fn has_legal_move(
    board: &Board,
    c: Color,
    en_passant: Option<Square>,
    castling: &CastlingRights,
) -> bool {
    board.pieces().filter(|(_, pc)| pc.color == c).any(|(from, pc)| {
        Square::all().any(|to| is_legal_move(board, pc, from, to, en_passant, castling).valid)
    })
}

#[cfg(test)]
#[path = "legality_tests.rs"]
mod legality_tests;
