//! Record of the plies played so far.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::*;

/// Side effects a move had beyond moving one piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialMove {
    /// Pawn advanced two rows and left an en passant target behind.
    DoubleStep,
    /// Pawn captured the pawn beside it, landing behind it.
    EnPassant,
    Castle(CastleSide),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub special: Option<SpecialMove>,
    /// Filled in once the promotion choice has been made.
    pub promotion: Option<PieceKind>,
}

impl MoveRecord {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}
