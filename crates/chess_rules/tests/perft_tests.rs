use std::time::Instant;

use rayon::prelude::*;

use chess_rules::{
    Board, CastlingRights, Color, Game, Piece, PieceKind, Square, legal_moves, perft, perft_move,
};

const FULL_PERFT_ENV: &str = "FULL_PERFT";
const NODE_LIMIT: u64 = 50_000;

/// Build a game from the piece-placement field of a FEN record. Castling is
/// allowed wherever king and rook still stand on their start squares.
fn position(placement: &str, side: Color) -> Game {
    let mut board = Board::empty();
    for (row, rank) in placement.split('/').enumerate() {
        let mut col = 0u8;
        for ch in rank.chars() {
            if let Some(skip) = ch.to_digit(10) {
                col += skip as u8;
                continue;
            }
            let color = if ch.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let kind = match ch.to_ascii_lowercase() {
                'p' => PieceKind::Pawn,
                'n' => PieceKind::Knight,
                'b' => PieceKind::Bishop,
                'r' => PieceKind::Rook,
                'q' => PieceKind::Queen,
                'k' => PieceKind::King,
                other => panic!("Invalid piece letter '{}' in '{}'", other, placement),
            };
            let sq = Square::new(row as u8, col)
                .unwrap_or_else(|| panic!("Placement '{}' runs off the board", placement));
            board.set_piece(sq, Some(Piece::new(color, kind)));
            col += 1;
        }
    }
    Game::from_position(board, side, CastlingRights::default(), None)
}

struct Case {
    name: &'static str,
    placement: &'static str,
    side: Color,
    depths: &'static [(u8, u64)],
}

const CASES: &[Case] = &[
    Case {
        name: "start",
        placement: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
        side: Color::White,
        depths: &[(1, 20), (2, 400), (3, 8_902), (4, 197_281)],
    },
    Case {
        name: "kiwipete",
        placement: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
        side: Color::White,
        depths: &[(1, 48), (2, 2_039), (3, 97_862)],
    },
    Case {
        name: "rook endgame",
        placement: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
        side: Color::White,
        depths: &[(1, 14), (2, 191), (3, 2_812), (4, 43_238)],
    },
    Case {
        name: "promotions",
        placement: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1",
        side: Color::White,
        depths: &[(1, 6), (2, 264), (3, 9_467)],
    },
    Case {
        name: "discovered checks",
        placement: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R",
        side: Color::White,
        depths: &[(1, 44), (2, 1_486), (3, 62_379)],
    },
];

#[test]
fn perft_reference_positions() {
    let full = std::env::var(FULL_PERFT_ENV).is_ok();

    CASES.par_iter().for_each(|case| {
        let game = position(case.placement, case.side);
        let start = Instant::now();
        let mut ran_depths = Vec::new();

        for &(depth, expected) in case.depths {
            if !full && expected > NODE_LIMIT {
                eprintln!(
                    "Skipping depth {} for '{}' (expected {} nodes), set {}=1 to run all.",
                    depth, case.name, expected, FULL_PERFT_ENV
                );
                continue;
            }
            let got = perft(&game, depth);
            assert!(
                got == expected,
                "Perft mismatch for '{}' at depth {}: expected {}, got {}",
                case.name,
                depth,
                expected,
                got
            );
            ran_depths.push(depth);
        }

        println!(
            "Case '{}' done: depths {:?}, elapsed {:.3?}",
            case.name,
            ran_depths,
            start.elapsed()
        );
    });
}

#[test]
fn perft_divide_matches_total() {
    let game = position(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
        Color::White,
    );
    let roots = legal_moves(&game);
    assert_eq!(roots.len(), 48);

    let divided: u64 = roots
        .par_iter()
        .map(|&(from, to)| perft_move(&game, from, to, 2))
        .sum();
    assert_eq!(divided, 2_039);
    assert_eq!(divided, perft(&game, 2));
}

#[test]
fn perft_counts_each_promotion_choice() {
    // Lone pawn about to promote: four choices plus three king moves.
    let game = position("7k/P7/8/8/8/8/8/K7", Color::White);
    assert_eq!(perft(&game, 1), 4 + 3);
    let a7 = Square::new(1, 0).unwrap();
    let a8 = Square::new(0, 0).unwrap();
    assert_eq!(perft_move(&game, a7, a8, 1), 4);
}
