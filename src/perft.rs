use crate::board::Position;
use rayon::prelude::*;

/// Leaf count of the turn-complete move tree.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    if depth == 1 { return pos.moves().count() as u64; }
    pos.moves().map(|next| perft(&next, depth - 1)).sum()
}

/// Root-split perft; each root move is counted on a rayon worker.
pub fn perft_parallel(pos: &Position, depth: u32) -> u64 {
    if depth <= 1 { return perft(pos, depth); }
    let roots: Vec<Position> = pos.moves().collect();
    roots.par_iter().map(|next| perft(next, depth - 1)).sum()
}

/// Leaf count under each root move, in generation order.
pub fn divide(pos: &Position, depth: u32) -> Vec<(Position, u64)> {
    pos.moves().map(|next| (next, perft(&next, depth.saturating_sub(1)))).collect()
}
