use crate::{game::Game, types::*};

/// All legal `(from, to)` pairs for the side to move, in board order.
pub fn legal_moves(game: &Game) -> Vec<(Square, Square)> {
    game.board()
        .pieces()
        .filter(|(_, pc)| pc.color == game.side_to_move())
        .flat_map(|(from, _)| {
            game.legal_destinations(from)
                .into_iter()
                .map(move |to| (from, to))
        })
        .collect()
}

/// Pure perft node count.
/// Counts all positions reachable in exactly `depth` plies. A pawn reaching
/// the last row branches once per promotion choice.
pub fn perft(game: &Game, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    legal_moves(game)
        .into_iter()
        .map(|(from, to)| perft_move(game, from, to, depth))
        .sum()
}

/// Node count below one root move, `depth` counting that move itself.
pub fn perft_move(game: &Game, from: Square, to: Square, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut next = game.clone();
    let result = next.apply_move(from, to);
    if !result.applied {
        return 0;
    }
    if !result.promotion_pending {
        return perft(&next, depth - 1);
    }
    Promotion::ALL
        .iter()
        .map(|&choice| {
            let mut promoted = next.clone();
            promoted.resolve_promotion(choice);
            perft(&promoted, depth - 1)
        })
        .sum()
}
