use std::fmt;
use std::ops::Not;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

use super::movegen::{Hops, Moves};
use super::square::{bit, check_to_mask, checks, SQUARES};

pub type Mask = u32;

pub const WHITE_START: Mask = 0x0000_0FFF;
pub const BLACK_START: Mask = 0xFFF0_0000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row a man of this side is crowned on.
    pub fn crown_row(self) -> Mask {
        match self {
            Side::White => 0xF000_0000,
            Side::Black => 0x0000_000F,
        }
    }
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Side {
        self.opposite()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Whether a position ends the turn or is still inside a capture chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pending {
    Full,
    /// Only the piece on this mask index may keep capturing.
    Continuation(u8),
}

/// Immutable board snapshot: one bit per playable square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    white: Mask,
    black: Mask,
    queen: Mask,
    side: Side,
    pending: Pending,
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl Position {
    /// Twelve men per side on their three home rows, White to move.
    pub fn startpos() -> Self {
        Self::from_parts(WHITE_START, BLACK_START, 0, Side::White, Pending::Full)
    }

    pub fn new(white: Mask, black: Mask, queen: Mask, side: Side) -> Result<Self, BoardError> {
        if white & black != 0 {
            return Err(BoardError::Overlap(white & black));
        }
        if queen & !(white | black) != 0 {
            return Err(BoardError::QueenWithoutPiece(queen & !(white | black)));
        }
        Ok(Self::from_parts(white, black, queen, side, Pending::Full))
    }

    /// Mid-chain position where the piece on `square` must keep capturing.
    pub fn continuation(white: Mask, black: Mask, queen: Mask, side: Side, square: u8) -> Result<Self, BoardError> {
        if square as usize >= SQUARES {
            return Err(BoardError::BadContinuation(square));
        }
        let full = Self::new(white, black, queen, side)?;
        let mover = match side {
            Side::White => white,
            Side::Black => black,
        };
        if mover & bit(square as usize) == 0 {
            return Err(BoardError::BadContinuation(square));
        }
        Ok(Self { pending: Pending::Continuation(square), ..full })
    }

    pub(crate) fn from_parts(white: Mask, black: Mask, queen: Mask, side: Side, pending: Pending) -> Self {
        debug_assert_eq!(white & black, 0);
        debug_assert_eq!(queen & !(white | black), 0);
        Self { white, black, queen, side, pending }
    }

    pub fn white(&self) -> Mask { self.white }
    pub fn black(&self) -> Mask { self.black }
    pub fn queen(&self) -> Mask { self.queen }
    pub fn side_to_move(&self) -> Side { self.side }
    pub fn pending(&self) -> Pending { self.pending }

    pub fn is_continuation(&self) -> bool {
        self.pending != Pending::Full
    }

    pub fn pieces(&self, side: Side) -> Mask {
        match side {
            Side::White => self.white,
            Side::Black => self.black,
        }
    }

    pub fn occupied(&self) -> Mask {
        self.white | self.black
    }

    pub fn empty(&self) -> Mask {
        !self.occupied()
    }

    pub fn piece_count(&self) -> u32 {
        self.occupied().count_ones()
    }

    /// Same board with the other side to move and no pending capture.
    pub(crate) fn pass(&self) -> Self {
        Self::from_parts(self.white, self.black, self.queen, !self.side, Pending::Full)
    }

    /// Single hops including capture-chain continuations.
    pub fn hops(&self) -> Hops {
        Hops::new(*self)
    }

    /// Turn-complete successors.
    pub fn moves(&self) -> Moves {
        Moves::new(*self)
    }

    /// True when either side has been wiped off the board.
    pub fn one_side_empty(&self) -> bool {
        self.white == 0 || self.black == 0
    }

    /// Decided result, if any: a side without pieces or without moves has lost.
    pub fn winner(&self) -> Option<Side> {
        let mover = self.side;
        if self.pieces(mover) == 0 {
            return Some(!mover);
        }
        if self.pieces(!mover) == 0 {
            return Some(mover);
        }
        if self.moves().next().is_none() {
            return Some(!mover);
        }
        None
    }

    pub fn occupied_checks(&self) -> Vec<usize> {
        checks(self.occupied()).collect()
    }

    pub fn is_queen(&self, check: usize) -> bool {
        self.has_check(self.queen, check)
    }

    pub fn is_white(&self, check: usize) -> bool {
        self.has_check(self.white, check)
    }

    pub fn is_black(&self, check: usize) -> bool {
        self.has_check(self.black, check)
    }

    fn has_check(&self, mask: Mask, check: usize) -> bool {
        check_to_mask(check).map_or(false, |idx| mask & bit(idx) != 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = |m: Mask| {
            let crowned = self.queen & m != 0;
            if self.white & m != 0 {
                if crowned { '◆' } else { '●' }
            } else if self.black & m != 0 {
                if crowned { '◇' } else { '○' }
            } else {
                ' '
            }
        };
        for col in 0..8 {
            write!(f, " {col}")?;
        }
        writeln!(f, "  {}", if self.side == Side::Black { '○' } else { '●' })?;
        writeln!(f, "┌─┬─┬─┬─┬─┬─┬─┬─┐")?;
        for row in (0..8).rev() {
            write!(f, "│")?;
            for col in 0..4 {
                let c = glyph(bit(row * 4 + col));
                let (first, second) = if row & 1 != 0 { (' ', c) } else { (c, ' ') };
                write!(f, "{first}│{second}│")?;
            }
            writeln!(f, " {row}")?;
        }
        writeln!(f, "└─┴─┴─┴─┴─┴─┴─┴─┘")
    }
}
