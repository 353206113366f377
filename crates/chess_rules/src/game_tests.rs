use super::*;
use crate::{notation::MoveText, perft::legal_moves};

const WK: Piece = Piece::new(Color::White, PieceKind::King);
const BK: Piece = Piece::new(Color::Black, PieceKind::King);
const WP: Piece = Piece::new(Color::White, PieceKind::Pawn);
const WR: Piece = Piece::new(Color::White, PieceKind::Rook);
const BQ: Piece = Piece::new(Color::Black, PieceKind::Queen);

fn s(name: &str) -> Square {
    name.parse().unwrap()
}

fn board(pieces: &[(&str, Piece)]) -> Board {
    pieces.iter().map(|&(name, pc)| (s(name), pc)).collect()
}

fn play(game: &mut Game, text: &str) -> MoveResult {
    let m: MoveText = text.parse().unwrap();
    game.apply_move(m.from, m.to)
}

/// White pawn one step from promoting with the black king in the corner.
fn promotion_position() -> Game {
    Game::from_position(
        board(&[("a7", WP), ("g6", WK), ("h8", BK)]),
        Color::White,
        CastlingRights::all_moved(),
        None,
    )
}

#[test]
fn test_new_game() {
    let game = Game::new();
    assert_eq!(game.side_to_move(), Color::White);
    assert_eq!(game.outcome(), GameOutcome::InProgress);
    assert_eq!(game.phase(), Phase::AwaitingSelection);
    assert!(!game.in_check());
    assert!(game.history().is_empty());
    assert_eq!(legal_moves(&game).len(), 20);
}

#[test]
fn test_rejected_move_changes_nothing() {
    let mut game = Game::new();
    let before = game.snapshot();

    for text in ["e2e5", "e7e5", "e3e4", "a1a3", "e1g1"] {
        let result = play(&mut game, text);
        assert!(!result.applied, "{text} should be rejected");
        assert_eq!(game.snapshot(), before);
    }
    assert!(game.history().is_empty());
}

#[test]
fn test_double_step_sets_and_clears_en_passant() {
    let mut game = Game::new();
    assert!(play(&mut game, "e2e4").applied);
    assert_eq!(game.en_passant(), Some(s("e3")));
    assert_eq!(game.last_move().and_then(|m| m.special), Some(SpecialMove::DoubleStep));

    assert!(play(&mut game, "g8f6").applied);
    assert_eq!(game.en_passant(), None);
    assert_eq!(game.side_to_move(), Color::White);
}

#[test]
fn test_legal_destinations_only_for_side_to_move() {
    let game = Game::new();
    let e2: BTreeSet<Square> = [s("e3"), s("e4")].into_iter().collect();
    assert_eq!(game.legal_destinations(s("e2")), e2);
    assert!(game.legal_destinations(s("e7")).is_empty());
    assert!(game.legal_destinations(s("e4")).is_empty());
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_select_then_move() {
    let mut game = Game::new();
    assert_eq!(game.select(s("g1")), None);
    assert_eq!(game.phase(), Phase::AwaitingDestination { from: s("g1") });
    let (from, dests) = game.selected().unwrap();
    assert_eq!(from, s("g1"));
    assert!(dests.contains(&s("f3")) && dests.contains(&s("h3")));

    let result = game.select(s("f3")).unwrap();
    assert!(result.applied);
    assert_eq!(game.board().piece_at(s("f3")).map(|p| p.kind), Some(PieceKind::Knight));
    assert_eq!(game.phase(), Phase::AwaitingSelection);
}

#[test]
fn test_select_switches_and_clears() {
    let mut game = Game::new();
    game.select(s("e2"));
    game.select(s("d2"));
    assert_eq!(game.phase(), Phase::AwaitingDestination { from: s("d2") });

    // Not a destination of d2: selection goes away, nothing moves.
    assert_eq!(game.select(s("e4")), None);
    assert_eq!(game.phase(), Phase::AwaitingSelection);
    assert_eq!(game.side_to_move(), Color::White);

    assert_eq!(game.select(s("e7")), None, "Opponent pieces cannot be selected");
    assert!(game.selected().is_none());

    game.select(s("b1"));
    game.deselect();
    assert_eq!(game.phase(), Phase::AwaitingSelection);
}

// ============================================================================
// Promotion
// ============================================================================

#[test]
fn test_promotion_blocks_play_until_resolved() {
    let mut game = promotion_position();
    let result = play(&mut game, "a7a8");
    assert!(result.applied && result.promotion_pending);
    assert_eq!(game.phase(), Phase::AwaitingPromotion { square: s("a8") });
    assert_eq!(game.side_to_move(), Color::Black);

    assert!(game.legal_destinations(s("h8")).is_empty());
    assert!(!play(&mut game, "h8g8").applied);

    assert!(game.resolve_promotion(Promotion::Knight));
    assert_eq!(game.board().piece_at(s("a8")).map(|p| p.kind), Some(PieceKind::Knight));
    assert_eq!(game.last_move().and_then(|m| m.promotion), Some(PieceKind::Knight));
    assert_eq!(game.outcome(), GameOutcome::InProgress);
    assert!(play(&mut game, "h8g8").applied);
}

#[test]
fn test_outcome_waits_for_promotion_choice() {
    let mut game = promotion_position();
    play(&mut game, "a7a8");
    assert_eq!(game.outcome(), GameOutcome::InProgress);

    game.resolve_promotion(Promotion::Queen);
    assert_eq!(
        game.outcome(),
        GameOutcome::Checkmate {
            winner: Color::White
        }
    );
    assert_eq!(game.phase(), Phase::GameOver(game.outcome()));
}

#[test]
fn test_resolve_without_pending_promotion() {
    let mut game = Game::new();
    let before = game.snapshot();
    assert!(!game.resolve_promotion(Promotion::Queen));
    assert_eq!(game.snapshot(), before);
}

#[test]
fn test_apply_move_with_promotion() {
    let mut game = promotion_position();
    let result = game.apply_move_with_promotion(s("a7"), s("a8"), Promotion::Rook);
    assert!(result.applied);
    assert!(!result.promotion_pending);
    assert_eq!(game.board().piece_at(s("a8")), Some(WR));
    assert_eq!(game.phase(), Phase::GameOver(result.outcome));
    assert_eq!(
        result.outcome,
        GameOutcome::Checkmate {
            winner: Color::White
        }
    );

    let mut plain = Game::new();
    let result = plain.apply_move_with_promotion(s("e2"), s("e4"), Promotion::Queen);
    assert!(result.applied && !result.promotion_pending);
    assert_eq!(plain.board().piece_at(s("e4")), Some(WP));
}

// ============================================================================
// Outcome and snapshots
// ============================================================================

#[test]
fn test_from_position_detects_stalemate() {
    let mut game = Game::from_position(
        board(&[("a1", WK), ("b3", BQ), ("h8", BK)]),
        Color::White,
        CastlingRights::all_moved(),
        None,
    );
    assert_eq!(game.outcome(), GameOutcome::Stalemate);
    assert_eq!(game.phase(), Phase::GameOver(GameOutcome::Stalemate));
    assert!(!play(&mut game, "a1a2").applied);
    assert_eq!(game.select(s("a1")), None);
    assert!(game.selected().is_none());
}

#[test]
fn test_castling_updates_flags_and_history() {
    let mut game = Game::from_position(
        board(&[("e1", WK), ("h1", WR), ("e8", BK)]),
        Color::White,
        CastlingRights::default(),
        None,
    );
    assert!(play(&mut game, "e1g1").applied);
    assert_eq!(game.board().piece_at(s("f1")), Some(WR));
    assert!(game.board().is_empty(s("h1")));
    assert!(game.castling().white_king_moved);
    assert!(game.castling().white_rook_h_moved);
    assert!(!game.castling().white_rook_a_moved);

    let record = game.last_move().copied().unwrap();
    assert_eq!(record.special, Some(SpecialMove::Castle(CastleSide::KingSide)));
    assert_eq!(record.to_string(), "e1g1");
}

#[test]
fn test_snapshot_serde_round_trip() {
    let mut game = Game::new();
    play(&mut game, "e2e4");
    game.select(s("e7"));
    let snap = game.snapshot();
    assert_eq!(snap.phase, Phase::AwaitingDestination { from: s("e7") });
    assert_eq!(snap.last_move.map(|m| m.to), Some(s("e4")));

    let json = serde_json::to_string(&snap).unwrap();
    let back: GameSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snap);
}

#[test]
fn test_captured_corner_rook_loses_castling() {
    let mut game = Game::from_position(
        board(&[("e1", WK), ("h1", WR), ("e8", BK), ("h8", Piece::new(Color::Black, PieceKind::Rook))]),
        Color::White,
        CastlingRights::default(),
        None,
    );
    assert!(play(&mut game, "h1h8").applied);
    assert!(game.castling().black_rook_h_moved);
    assert!(game.castling().white_rook_h_moved);
    assert!(!game.castling().black_king_moved);
}

#[test]
fn test_rejected_move_keeps_selection() {
    let mut game = Game::new();
    game.select(s("g1"));
    let before = game.snapshot();

    assert!(!play(&mut game, "g1g3").applied);
    assert_eq!(game.phase(), Phase::AwaitingDestination { from: s("g1") });
    assert_eq!(game.snapshot(), before);

    assert!(play(&mut game, "g1f3").applied);
    assert_eq!(game.phase(), Phase::AwaitingSelection, "Applied move clears the selection");
}

#[test]
fn test_queen_side_castling_marks_a_rook() {
    let mut game = Game::from_position(
        board(&[("e1", WK), ("a1", WR), ("h1", WR), ("e8", BK)]),
        Color::White,
        CastlingRights::default(),
        None,
    );
    assert!(play(&mut game, "e1c1").applied);
    assert!(game.castling().white_rook_a_moved);
    assert!(!game.castling().white_rook_h_moved);
    assert_eq!(game.snapshot().castling, *game.castling());
}
