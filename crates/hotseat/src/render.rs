//! Text rendering of the board and game status.

use std::collections::BTreeSet;

use chess_rules::{Color, Game, GameOutcome, Phase, Piece, PieceKind, Square};

use crate::config::HotseatConfig;

const EMPTY: char = '.';
const DESTINATION: char = '*';

pub fn piece_glyph(pc: Piece, unicode: bool) -> char {
    if !unicode {
        return pc.symbol();
    }
    match (pc.color, pc.kind) {
        (Color::White, PieceKind::King) => '♔',
        (Color::White, PieceKind::Queen) => '♕',
        (Color::White, PieceKind::Rook) => '♖',
        (Color::White, PieceKind::Bishop) => '♗',
        (Color::White, PieceKind::Knight) => '♘',
        (Color::White, PieceKind::Pawn) => '♙',
        (Color::Black, PieceKind::King) => '♚',
        (Color::Black, PieceKind::Queen) => '♛',
        (Color::Black, PieceKind::Rook) => '♜',
        (Color::Black, PieceKind::Bishop) => '♝',
        (Color::Black, PieceKind::Knight) => '♞',
        (Color::Black, PieceKind::Pawn) => '♟',
    }
}

/// Draw the board with rank and file labels. White is at the bottom unless
/// `flip_board` is set and Black is to move.
pub fn render_board(game: &Game, cfg: &HotseatConfig) -> String {
    let flipped = cfg.flip_board && game.side_to_move() == Color::Black;
    let marks: BTreeSet<Square> = match game.selected() {
        Some((_, dests)) if cfg.show_destinations => dests.clone(),
        _ => BTreeSet::new(),
    };

    let order: Vec<u8> = if flipped {
        (0..8).rev().collect()
    } else {
        (0..8).collect()
    };

    let mut out = String::new();
    for &row in &order {
        out.push(char::from(b'8' - row));
        for &col in &order {
            let Some(sq) = Square::new(row, col) else {
                continue;
            };
            let cell = match game.board().piece_at(sq) {
                Some(pc) => piece_glyph(pc, cfg.unicode_pieces),
                None if marks.contains(&sq) => DESTINATION,
                None => EMPTY,
            };
            out.push(' ');
            out.push(cell);
        }
        out.push('\n');
    }

    out.push(' ');
    for &col in &order {
        out.push(' ');
        out.push(char::from(b'a' + col));
    }
    out.push('\n');
    out
}

/// One line describing whose turn it is or how the game ended.
pub fn status_line(game: &Game) -> String {
    let side = game.side_to_move();
    match game.phase() {
        Phase::GameOver(GameOutcome::Checkmate { winner }) => {
            format!("Checkmate. {winner} wins.")
        }
        Phase::GameOver(_) => "Stalemate. The game is drawn.".to_string(),
        Phase::AwaitingPromotion { square } => {
            format!("{} pawn on {square} promotes: choose q, r, b or n", side.other())
        }
        Phase::AwaitingDestination { from } => format!("{side} to move, {from} selected"),
        Phase::AwaitingSelection if game.in_check() => format!("{side} to move, in check"),
        Phase::AwaitingSelection => format!("{side} to move"),
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
