use std::fmt;

use super::bitboard::Position;
use super::square::{bit, check_to_mask, checks};

/// What the view layer has to animate between two turn-complete positions,
/// in check indices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveDelta {
    /// Origin and destination of the moving piece. `None` when the mover's
    /// squares did not change, e.g. a queen capturing round a full loop.
    pub moved: Option<(usize, usize)>,
    pub captures: Vec<usize>,
    pub promotion: Option<usize>,
}

impl MoveDelta {
    pub fn between(before: &Position, after: &Position) -> Self {
        let side = before.side_to_move();
        let prev = before.pieces(side);
        let next = after.pieces(side);
        let changed = prev ^ next;

        let moved = match (checks(changed & prev).next(), checks(changed & next).next()) {
            (Some(from), Some(to)) => Some((from, to)),
            _ => None,
        };
        let captures = checks(before.pieces(!side) & !after.pieces(!side)).collect();
        let promotion = moved.and_then(|(from, to)| {
            let was_man = check_to_mask(from).map_or(false, |m| before.queen() & bit(m) == 0);
            let now_queen = check_to_mask(to).map_or(false, |m| after.queen() & bit(m) != 0);
            (was_man && now_queen).then_some(to)
        });

        Self { moved, captures, promotion }
    }

    pub fn is_capture(&self) -> bool {
        !self.captures.is_empty()
    }
}

impl fmt::Display for MoveDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        match self.moved {
            Some((from, to)) => write!(f, "{from}{sep}{to}")?,
            None => write!(f, "--")?,
        }
        if self.promotion.is_some() {
            write!(f, "=Q")?;
        }
        Ok(())
    }
}
