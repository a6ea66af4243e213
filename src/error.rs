use thiserror::Error;

use crate::board::Mask;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("white and black pieces share squares {0:#010x}")]
    Overlap(Mask),
    #[error("crowned squares {0:#010x} hold no piece")]
    QueenWithoutPiece(Mask),
    #[error("continuation square {0} is out of range")]
    BadContinuation(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SquareError {
    #[error("check index {0} is off the board")]
    OffBoard(usize),
    #[error("check index {0} is a light square")]
    LightSquare(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error(transparent)]
    Square(#[from] SquareError),
    #[error("illegal move {from} -> {to}")]
    Illegal { from: usize, to: usize },
    #[error("capture {from} -> {to} must continue")]
    CaptureIncomplete { from: usize, to: usize },
    #[error("empty hop path")]
    EmptyPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game is already over")]
    Finished,
    #[error("position is not a legal successor of the current one")]
    NotASuccessor,
    #[error(transparent)]
    Move(#[from] MoveError),
}
