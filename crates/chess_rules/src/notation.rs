//! Coordinate notation: "e2" for squares, "e2e4" / "e7e8q" for moves.
//!
//! File a is column 0 and rank 8 is row 0, so White's back rank "1" is row 7.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::{NotationError, NotationResult},
    types::*,
};

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.col()) as char;
        let rank = (b'8' - self.row()) as char;
        write!(f, "{file}{rank}")
    }
}

impl FromStr for Square {
    type Err = NotationError;

    fn from_str(s: &str) -> NotationResult<Self> {
        let b = s.as_bytes();
        if b.len() != 2 || !(b'a'..=b'h').contains(&b[0]) || !(b'1'..=b'8').contains(&b[1]) {
            return Err(NotationError::InvalidSquare(s.to_string()));
        }
        Square::new(b'8' - b[1], b[0] - b'a')
            .ok_or_else(|| NotationError::InvalidSquare(s.to_string()))
    }
}

impl Promotion {
    pub fn from_letter(ch: char) -> NotationResult<Promotion> {
        match ch.to_ascii_lowercase() {
            'q' => Ok(Promotion::Queen),
            'r' => Ok(Promotion::Rook),
            'b' => Ok(Promotion::Bishop),
            'n' => Ok(Promotion::Knight),
            _ => Err(NotationError::InvalidPromotion(ch)),
        }
    }

    pub fn letter(self) -> char {
        self.kind().letter()
    }
}

impl PieceKind {
    /// Lowercase letter used in coordinate notation.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

impl Piece {
    /// Letter for this piece, uppercase for White.
    pub fn symbol(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// A move request as typed by a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveText {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Promotion>,
}

impl FromStr for MoveText {
    type Err = NotationError;

    fn from_str(s: &str) -> NotationResult<Self> {
        let s = s.trim();
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(NotationError::InvalidMove(s.to_string()));
        }
        let bad_move = |_: NotationError| NotationError::InvalidMove(s.to_string());
        let from = s[0..2].parse::<Square>().map_err(bad_move)?;
        let to = s[2..4].parse::<Square>().map_err(bad_move)?;
        let promotion = match s[4..].chars().next() {
            Some(ch) => Some(Promotion::from_letter(ch)?),
            None => None,
        };
        Ok(MoveText {
            from,
            to,
            promotion,
        })
    }
}

impl fmt::Display for MoveText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(p) = self.promotion {
            write!(f, "{}", p.letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
