//! Error types for the text boundary of the engine.
//!
//! Rule violations are never errors: the game silently rejects illegal
//! requests. Only turning user text into coordinates can fail.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    /// Not a file a-h followed by a rank 1-8
    #[error("Invalid square: {0:?} (expected a file a-h followed by a rank 1-8)")]
    InvalidSquare(String),

    /// Not two squares with an optional promotion letter
    #[error("Invalid move: {0:?} (expected coordinates like e2e4 or e7e8q)")]
    InvalidMove(String),

    #[error("Invalid promotion piece: {0:?} (expected one of q, r, b, n)")]
    InvalidPromotion(char),
}

/// Result type alias for notation parsing
pub type NotationResult<T> = Result<T, NotationError>;
