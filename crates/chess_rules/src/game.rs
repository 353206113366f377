//! Game state machine for two players sharing one board.
//!
//! `Game` owns the board and everything move legality depends on (side to
//! move, castling flags, en passant target, pending promotion). The front end
//! only asks for legal destinations, requests moves and reads state back.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    board::{Board, CastlingRights},
    check::side_in_check,
    history::{MoveRecord, SpecialMove},
    legality::{en_passant_victim, has_legal_move, is_legal_move, legal_destinations_from},
    types::*,
};

/// Result of the game, recomputed after every completed ply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    Checkmate { winner: Color },
    Stalemate,
}

impl GameOutcome {
    pub fn is_over(self) -> bool {
        self != GameOutcome::InProgress
    }
}

/// A pawn on the last row waiting for its replacement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPromotion {
    pub square: Square,
    pub pawn: Piece,
}

/// Where the game is in its interaction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    AwaitingSelection,
    AwaitingDestination { from: Square },
    AwaitingPromotion { square: Square },
    GameOver(GameOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub applied: bool,
    /// The move reached the last row; call [`Game::resolve_promotion`].
    pub promotion_pending: bool,
    pub outcome: GameOutcome,
}

impl MoveResult {
    fn rejected(outcome: GameOutcome) -> Self {
        Self {
            applied: false,
            promotion_pending: false,
            outcome,
        }
    }
}

/// Everything a front end needs to draw the current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub side_to_move: Color,
    pub outcome: GameOutcome,
    pub phase: Phase,
    pub in_check: bool,
    pub pending_promotion: Option<PendingPromotion>,
    pub en_passant: Option<Square>,
    pub castling: CastlingRights,
    pub last_move: Option<MoveRecord>,
}

#[derive(Debug, Clone)]
struct Selection {
    from: Square,
    destinations: BTreeSet<Square>,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    pending_promotion: Option<PendingPromotion>,
    outcome: GameOutcome,
    history: Vec<MoveRecord>,
    selection: Option<Selection>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        Self::from_position(
            Board::standard(),
            Color::White,
            CastlingRights::default(),
            None,
        )
    }

    /// Start from an arbitrary position. The outcome is evaluated right away,
    /// as if the position had just been reached by a move.
    pub fn from_position(
        board: Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> Self {
        let mut game = Self {
            board,
            side_to_move,
            castling,
            en_passant,
            pending_promotion: None,
            outcome: GameOutcome::InProgress,
            history: Vec::new(),
            selection: None,
        };
        game.outcome = game.evaluate_outcome();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn castling(&self) -> &CastlingRights {
        &self.castling
    }
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }
    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending_promotion
    }
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Is the side to move in check right now?
    pub fn in_check(&self) -> bool {
        side_in_check(&self.board, self.side_to_move)
    }

    pub fn phase(&self) -> Phase {
        if self.outcome.is_over() {
            return Phase::GameOver(self.outcome);
        }
        if let Some(p) = self.pending_promotion {
            return Phase::AwaitingPromotion { square: p.square };
        }
        match &self.selection {
            Some(sel) => Phase::AwaitingDestination { from: sel.from },
            None => Phase::AwaitingSelection,
        }
    }

    /// Currently selected square and its legal destinations.
    pub fn selected(&self) -> Option<(Square, &BTreeSet<Square>)> {
        self.selection
            .as_ref()
            .map(|sel| (sel.from, &sel.destinations))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            side_to_move: self.side_to_move,
            outcome: self.outcome,
            phase: self.phase(),
            in_check: self.in_check(),
            pending_promotion: self.pending_promotion,
            en_passant: self.en_passant,
            castling: self.castling,
            last_move: self.last_move().copied(),
        }
    }

    fn accepts_moves(&self) -> bool {
        self.pending_promotion.is_none() && !self.outcome.is_over()
    }

    /// Legal destinations for the piece on `from`. Empty when the square is
    /// empty, holds a piece of the side not to move, a promotion is pending or
    /// the game is over.
    pub fn legal_destinations(&self, from: Square) -> BTreeSet<Square> {
        if !self.accepts_moves() {
            return BTreeSet::new();
        }
        match self.board.piece_at(from) {
            Some(pc) if pc.color == self.side_to_move => {
                legal_destinations_from(&self.board, from, self.en_passant, &self.castling)
            }
            _ => BTreeSet::new(),
        }
    }

    /// Play `from` -> `to` if it is legal; otherwise leave everything as it was.
    pub fn apply_move(&mut self, from: Square, to: Square) -> MoveResult {
        let piece = match self.board.piece_at(from) {
            Some(pc) if pc.color == self.side_to_move && self.accepts_moves() => pc,
            _ => {
                debug!(%from, %to, "move rejected: nothing movable on origin");
                return MoveResult::rejected(self.outcome);
            }
        };
        let verdict = is_legal_move(
            &self.board,
            piece,
            from,
            to,
            self.en_passant,
            &self.castling,
        );
        if !verdict.valid {
            debug!(%from, %to, ?piece, "move rejected: illegal");
            return MoveResult::rejected(self.outcome);
        }
        self.selection = None;

        let mut captured = self.board.piece_at(to);
        let mut special = None;
        if let Some(victim) = en_passant_victim(piece, from, to, self.en_passant) {
            captured = self.board.take(victim);
            special = Some(SpecialMove::EnPassant);
        }
        self.board.set_piece(from, None);
        self.board.set_piece(to, Some(piece));
        if let Some(reloc) = verdict.rook_relocation {
            self.board.relocate(reloc.from, reloc.to);
            self.castling
                .record_departure(Piece::new(piece.color, PieceKind::Rook), reloc.from);
            special = CastleSide::from_king_target(to.col()).map(SpecialMove::Castle);
        }

        self.castling.record_departure(piece, from);
        // A rook captured on its corner never castles again, even if another rook arrives there.
        if let Some(victim) = captured {
            self.castling.record_departure(victim, to);
        }

        let double_step = piece.kind == PieceKind::Pawn && row_delta(from, to).abs() == 2;
        self.en_passant = if double_step {
            special = Some(SpecialMove::DoubleStep);
            from.offset(piece.color.forward(), 0)
        } else {
            None
        };

        self.history.push(MoveRecord {
            piece,
            from,
            to,
            captured,
            special,
            promotion: None,
        });
        debug!(%from, %to, ?piece, ?special, ?captured, "move applied");

        self.side_to_move = self.side_to_move.other();

        if piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row() {
            self.pending_promotion = Some(PendingPromotion {
                square: to,
                pawn: piece,
            });
            return MoveResult {
                applied: true,
                promotion_pending: true,
                outcome: self.outcome,
            };
        }

        self.finish_ply();
        MoveResult {
            applied: true,
            promotion_pending: false,
            outcome: self.outcome,
        }
    }

    /// Replace the pending pawn with `choice`. Does nothing (and returns
    /// false) when no promotion is pending.
    pub fn resolve_promotion(&mut self, choice: Promotion) -> bool {
        let Some(pending) = self.pending_promotion.take() else {
            return false;
        };
        self.board.set_piece(
            pending.square,
            Some(Piece::new(pending.pawn.color, choice.kind())),
        );
        if let Some(last) = self.history.last_mut() {
            last.promotion = Some(choice.kind());
        }
        info!(square = %pending.square, ?choice, "pawn promoted");
        self.finish_ply();
        true
    }

    /// [`Game::apply_move`] followed by [`Game::resolve_promotion`] when the
    /// move reaches the last row.
    pub fn apply_move_with_promotion(
        &mut self,
        from: Square,
        to: Square,
        choice: Promotion,
    ) -> MoveResult {
        let mut result = self.apply_move(from, to);
        if result.promotion_pending {
            self.resolve_promotion(choice);
            result.promotion_pending = false;
            result.outcome = self.outcome;
        }
        result
    }

    /// Click-style input. Selecting one of the mover's pieces selects it;
    /// selecting a legal destination of the current selection plays the move
    /// and returns its result; anything else clears the selection.
    pub fn select(&mut self, sq: Square) -> Option<MoveResult> {
        if let Some(pc) = self.board.piece_at(sq)
            && pc.color == self.side_to_move
            && self.accepts_moves()
        {
            self.selection = Some(Selection {
                from: sq,
                destinations: self.legal_destinations(sq),
            });
            return None;
        }

        if let Some(sel) = self.selection.take()
            && sel.destinations.contains(&sq)
        {
            return Some(self.apply_move(sel.from, sq));
        }
        None
    }

    pub fn deselect(&mut self) {
        self.selection = None;
    }

    fn finish_ply(&mut self) {
        self.outcome = self.evaluate_outcome();
        if self.outcome.is_over() {
            info!(outcome = ?self.outcome, plies = self.history.len(), "game over");
        }
    }

    fn evaluate_outcome(&self) -> GameOutcome {
        let side = self.side_to_move;
        if has_legal_move(&self.board, side, self.en_passant, &self.castling) {
            return GameOutcome::InProgress;
        }
        if side_in_check(&self.board, side) {
            GameOutcome::Checkmate {
                winner: side.other(),
            }
        } else {
            GameOutcome::Stalemate
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
