//! Check detection.
//!
//! A king is in check when some opposing piece could move onto its square
//! under the piece movement rules. The opposing king is never counted here;
//! kings are kept apart by the king-step rule instead, see
//! [`touches_enemy_king`].

use crate::{board::Board, rules::can_move, types::*};

const NEIGHBOURS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Is the `king_color` king standing on `king_sq` attacked?
///
/// Callers validating a candidate move pass a scratch copy of the board with
/// the move already played, never the live board.
pub fn is_in_check(board: &Board, king_sq: Square, king_color: Color) -> bool {
    board
        .pieces()
        .any(|(from, pc)| pc.color != king_color && attacks(board, pc, from, king_sq))
}

/// Could `attacker` standing on `from` reach `target`?
pub fn attacks(board: &Board, attacker: Piece, from: Square, target: Square) -> bool {
    match attacker.kind {
        PieceKind::King => false,
        _ => can_move(board, attacker, from, target, None),
    }
}

/// Whether the side `c` is currently in check. A side without a king is not.
pub fn side_in_check(board: &Board, c: Color) -> bool {
    match board.king_square(c) {
        Some(ksq) => is_in_check(board, ksq, c),
        None => false,
    }
}

/// Is the king of the side opposing `c` on a square adjacent to `sq`?
pub fn touches_enemy_king(board: &Board, sq: Square, c: Color) -> bool {
    NEIGHBOURS.iter().any(|&(dr, dc)| {
        sq.offset(dr, dc)
            .and_then(|n| board.piece_at(n))
            .is_some_and(|pc| pc.kind == PieceKind::King && pc.color != c)
    })
}

/// Would the `c` king be safe after walking from `from` to `sq`? Safe means
/// not in check and not next to the opposing king. Works on a scratch copy.
pub fn king_safe_on(board: &Board, from: Square, sq: Square, c: Color) -> bool {
    let mut scratch = board.clone();
    if from != sq {
        scratch.relocate(from, sq);
    }
    !touches_enemy_king(&scratch, sq, c) && !is_in_check(&scratch, sq, c)
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod check_tests;
