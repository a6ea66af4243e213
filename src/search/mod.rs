pub mod alphabeta;
pub mod eval;
pub mod mcts;

pub use eval::evaluate;
pub use mcts::{search, Mcts, MctsParams, MctsResult};
