use crate::board::square::{bit, indices};
use crate::board::{Position, Side};

pub const MAN: i32 = 5;
pub const QUEEN: i32 = 15;

// Man placement bonus, mask index order from White's side; Black reads it mirrored.
const MAN_TABLE: [i32; 32] = [
    8, 8, 8, 8,
    6, 6, 6, 7,
    6, 4, 4, 5,
    4, 2, 3, 5,
    4, 2, 1, 3,
    3, 2, 2, 4,
    4, 3, 3, 3,
    4, 4, 4, 4,
];

// Queen placement bonus; symmetric under rotation so both sides share it.
const QUEEN_TABLE: [i32; 32] = [
    3, 3, 2, 1,
    4, 3, 2, 1,
    3, 4, 3, 2,
    3, 4, 3, 2,
    2, 3, 4, 3,
    2, 3, 4, 3,
    1, 2, 3, 4,
    1, 2, 3, 3,
];

// Scores for decided games, beyond any material total.
pub const WIN_SCORE: i32 = 10_000;

fn material(pos: &Position, side: Side) -> i32 {
    indices(pos.pieces(side))
        .map(|idx| {
            if pos.queen() & bit(idx) != 0 {
                QUEEN + QUEEN_TABLE[idx]
            } else {
                let rel = if side == Side::White { idx } else { 31 - idx };
                MAN + MAN_TABLE[rel]
            }
        })
        .sum()
}

/// Static score of `pos` for `side`: own pieces minus the opponent's.
pub fn evaluate(pos: &Position, side: Side) -> i32 {
    material(pos, side) - material(pos, !side)
}

// Side-to-move perspective (negamax-friendly)
pub fn eval_stm(pos: &Position) -> i32 {
    evaluate(pos, pos.side_to_move())
}
