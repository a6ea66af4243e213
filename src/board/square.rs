use crate::error::SquareError;

use super::Mask;

/// Playable squares packed into a mask, 4 per row.
pub const SQUARES: usize = 32;
/// Squares on the full 8x8 board addressed by check indices.
pub const CHECKS: usize = 64;

/// Board-square number (`row * 8 + column`) of a mask index.
pub fn mask_to_check(idx: usize) -> usize {
    debug_assert!(idx < SQUARES, "mask index {idx} out of range");
    (idx << 1) + ((idx >> 2) & 1)
}

/// Mask index of a dark board square; light and off-board squares are rejected.
pub fn check_to_mask(check: usize) -> Result<usize, SquareError> {
    if check >= CHECKS {
        return Err(SquareError::OffBoard(check));
    }
    if !is_playable(check) {
        return Err(SquareError::LightSquare(check));
    }
    Ok(check >> 1)
}

pub fn is_playable(check: usize) -> bool {
    check < CHECKS && (check >> 3) & 1 == check & 1
}

#[inline]
pub fn bit(idx: usize) -> Mask {
    1 << idx
}

/// Set bits of `mask` as mask indices, lowest first.
pub fn indices(mask: Mask) -> impl Iterator<Item = usize> {
    let mut rest = mask;
    std::iter::from_fn(move || {
        if rest == 0 {
            return None;
        }
        let idx = rest.trailing_zeros() as usize;
        rest &= rest - 1;
        Some(idx)
    })
}

/// Set bits of `mask` as check indices, lowest first.
pub fn checks(mask: Mask) -> impl Iterator<Item = usize> {
    indices(mask).map(mask_to_check)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_and_check_indices_are_inverse() {
        let mut seen = [false; CHECKS];
        for idx in 0..SQUARES {
            let check = mask_to_check(idx);
            assert!(is_playable(check), "mask {idx} maps to light square {check}");
            assert!(!seen[check], "check {check} hit twice");
            seen[check] = true;
            assert_eq!(check_to_mask(check), Ok(idx));
        }
    }

    #[test]
    fn corners_and_rejections() {
        assert_eq!(mask_to_check(0), 0);
        assert_eq!(mask_to_check(4), 9);
        assert_eq!(mask_to_check(31), 63);
        assert_eq!(check_to_mask(1), Err(SquareError::LightSquare(1)));
        assert_eq!(check_to_mask(64), Err(SquareError::OffBoard(64)));
    }

    #[test]
    fn indices_walks_set_bits() {
        let v: Vec<usize> = indices(0x8000_0005).collect();
        assert_eq!(v, vec![0, 2, 31]);
    }
}
