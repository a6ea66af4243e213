pub mod bitboard;
pub mod delta;
pub mod movegen;
pub mod square;

pub use bitboard::{Mask, Pending, Position, Side};
pub use delta::MoveDelta;
pub use movegen::{apply_hops, apply_move, generate_moves, Hops, Moves};
pub use square::{check_to_mask, mask_to_check};
