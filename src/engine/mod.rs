pub mod attacks;
pub mod board;
pub mod game;
pub mod movegen;
pub mod types;

pub use board::Board;
pub use game::GameState;
pub use movegen::{all_legal_moves, legal_moves};
pub use types::*;
