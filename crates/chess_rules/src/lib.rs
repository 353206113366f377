pub mod board;
pub mod check;
pub mod error;
pub mod game;
pub mod history;
pub mod legality;
pub mod notation;
pub mod perft;
pub mod rules;
pub mod types;

// Re-export the rules engine surface
pub use board::*;
pub use check::{is_in_check, side_in_check};
pub use error::*;
pub use game::*;
pub use history::*;
pub use legality::{MoveCheck, is_legal_move};
pub use notation::MoveText;
pub use perft::{legal_moves, perft, perft_move};
pub use rules::{RookRelocation, can_move};
pub use types::*;
