pub mod engine;
pub mod evaluation;

pub use engine::{AiEngine, TieredAi, select_move};
