use crate::error::MoveError;

use super::bitboard::{Mask, Pending, Position, Side};
use super::square::{bit, check_to_mask};

// Directions: bit 0 set = west, bit 1 set = south.
const SOUTH: usize = 2;

// Squares a piece cannot step away from in each direction.
const MOVE_GUARD: [Mask; 4] = [0xF080_8080, 0xF101_0101, 0x8080_808F, 0x0101_010F];
// Squares a piece cannot jump away from in each direction.
const CAPTURE_GUARD: [Mask; 4] = [0xFF88_8888, 0xFF11_1111, 0x8888_88FF, 0x1111_11FF];

// Candidate i addresses square (i >> 2) & 31 and direction i & 3;
// captures come first so quiet moves can be cut once one is found.
const QUIET_START: usize = 128;
const ALL_CANDIDATES: usize = 256;

#[inline]
fn one_step(idx: usize, dir: usize) -> usize {
    let odd = (idx >> 2) & 1;
    let west = dir & 1;
    let south = (dir & SOUTH) << 2;
    idx + 4 + odd - west - south
}

#[inline]
fn two_steps(idx: usize, dir: usize) -> usize {
    let west = dir & 1;
    let south = (dir & SOUTH) << 2;
    idx + 9 - (west << 1) - (south << 1)
}

/// Single-hop enumerator. A capture that leaves the piece uncrowned yields a
/// continuation; a continuation with nothing left to take yields the board
/// back with the turn passed.
#[derive(Clone, Debug)]
pub struct Hops {
    pos: Position,
    cursor: usize,
    end: usize,
    captured: bool,
}

impl Hops {
    pub(crate) fn new(pos: Position) -> Self {
        let (cursor, end) = match pos.pending() {
            Pending::Full => (0, ALL_CANDIDATES),
            Pending::Continuation(sq) => {
                let start = (sq as usize) << 2;
                (start, start + 4)
            }
        };
        Self { pos, cursor, end, captured: false }
    }
}

impl Iterator for Hops {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let pos = self.pos;
        let side = pos.side_to_move();
        let mine = pos.pieces(side);
        let theirs = pos.pieces(!side);
        let empty = pos.empty();

        while self.cursor < self.end {
            let i = self.cursor;
            self.cursor += 1;
            let idx = (i >> 2) & 31;
            let dir = i & 3;
            let this = bit(idx);
            let capture = i < QUIET_START;

            if !capture && self.captured {
                self.cursor = self.end;
                break;
            }
            if mine & this == 0 {
                continue;
            }
            let guard = if capture { CAPTURE_GUARD[dir] } else { MOVE_GUARD[dir] };
            if guard & this != 0 {
                continue;
            }
            let crowned = pos.queen() & this != 0;
            let forward = (dir & SOUTH != 0) == (side == Side::Black);
            if !crowned && !forward {
                continue;
            }

            let near = bit(one_step(idx, dir));
            let (landing, taken) = if capture {
                if theirs & near == 0 {
                    continue;
                }
                let far = bit(two_steps(idx, dir));
                if empty & far == 0 {
                    continue;
                }
                self.captured = true;
                (far, near)
            } else {
                if empty & near == 0 {
                    continue;
                }
                (near, 0)
            };

            let mine_after = mine ^ this ^ landing;
            let theirs_after = theirs ^ taken;
            let promoted = landing & side.crown_row();
            let carried = if crowned { this | landing } else { 0 };
            let queen = (pos.queen() ^ (carried | (pos.queen() & taken))) | promoted;
            let (white, black) = match side {
                Side::White => (mine_after, theirs_after),
                Side::Black => (theirs_after, mine_after),
            };

            // crowning ends the turn even mid-chain
            if capture && (crowned || promoted == 0) {
                let sq = landing.trailing_zeros() as u8;
                return Some(Position::from_parts(white, black, queen, side, Pending::Continuation(sq)));
            }
            return Some(Position::from_parts(white, black, queen, !side, Pending::Full));
        }

        if !self.captured && pos.is_continuation() {
            self.captured = true;
            return Some(pos.pass());
        }
        None
    }
}

/// Turn-complete successors: continuations are expanded through an explicit
/// stack of hop enumerators and never surface.
#[derive(Clone, Debug)]
pub struct Moves {
    stack: Vec<Hops>,
}

impl Moves {
    pub(crate) fn new(pos: Position) -> Self {
        Self { stack: vec![Hops::new(pos)] }
    }
}

impl Iterator for Moves {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        while let Some(mut hops) = self.stack.pop() {
            let Some(next) = hops.next() else { continue };
            self.stack.push(hops);
            if !next.is_continuation() {
                return Some(next);
            }
            self.stack.push(Hops::new(next));
        }
        None
    }
}

pub fn generate_moves(pos: &Position) -> Vec<Position> {
    pos.moves().collect()
}

/// First single hop from `pos` that takes the mover's piece from `from` to `to`
/// (mask indices).
fn find_hop(pos: &Position, from: usize, to: usize) -> Option<Position> {
    let side = pos.side_to_move();
    let expected = pos.pieces(side) ^ (bit(from) | bit(to));
    pos.hops().find(|next| next.pieces(side) == expected)
}

/// Resolve one requested hop between check indices into a turn-complete
/// position. A capture that leaves another capture open for the same piece
/// is rejected rather than applied in part.
pub fn apply_move(pos: &Position, from: usize, to: usize) -> Result<Position, MoveError> {
    let hop = find_hop(pos, check_to_mask(from)?, check_to_mask(to)?)
        .ok_or(MoveError::Illegal { from, to })?;
    finish(hop, from, to)
}

/// Apply a whole hop path `[from, to, to, ...]` in check indices.
pub fn apply_hops(pos: &Position, path: &[usize]) -> Result<Position, MoveError> {
    if path.len() < 2 {
        return Err(MoveError::EmptyPath);
    }
    let mut current = *pos;
    let last = path.len() - 2;
    for (n, pair) in path.windows(2).enumerate() {
        let (from, to) = (pair[0], pair[1]);
        let hop = find_hop(&current, check_to_mask(from)?, check_to_mask(to)?)
            .ok_or(MoveError::Illegal { from, to })?;
        if n == last {
            return finish(hop, from, to);
        }
        if !hop.is_continuation() {
            // turn already over, the remaining hops cannot be played
            return Err(MoveError::Illegal { from: to, to: path[n + 2] });
        }
        current = hop;
    }
    Err(MoveError::EmptyPath)
}

fn finish(hop: Position, from: usize, to: usize) -> Result<Position, MoveError> {
    if !hop.is_continuation() {
        return Ok(hop);
    }
    match hop.hops().next() {
        Some(next) if next.occupied() != hop.occupied() => Err(MoveError::CaptureIncomplete { from, to }),
        Some(next) => Ok(next),
        None => Err(MoveError::Illegal { from, to }),
    }
}
