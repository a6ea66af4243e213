// Bitboard draughts engine: move generation, evaluation and parallel MCTS
pub mod board;
pub mod error;
pub mod game;
pub mod perft;
pub mod search;
pub mod selfplay;

pub use board::{apply_move, check_to_mask, generate_moves, mask_to_check, Position, Side};
pub use search::{evaluate, search};
