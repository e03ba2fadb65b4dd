//! 48-bit linear congruential step
//!
//! Both [`SharedGenerator`](super::shared::SharedGenerator) and
//! [`LocalGenerator`](super::local::LocalGenerator) advance their state with
//! the functions in this module, so the two produce identical streams from
//! identical state and differ only in how the state word is stored.
//!
//! The constants are the classic 48-bit ones (Knuth, TAOCP vol. 2, section
//! 3.2.1): `state' = (state * 0x5DEECE66D + 0xB) mod 2^48`.

pub(crate) const MULTIPLIER: u64 = 0x5_DEEC_E66D;
pub(crate) const ADDEND: u64 = 0xB;
pub(crate) const MASK: u64 = (1 << 48) - 1;

/// Scramble a user seed into initial generator state
#[inline]
pub(crate) fn scramble(seed: u64) -> u64 {
    (seed ^ MULTIPLIER) & MASK
}

/// Advance the state by one step
#[inline(always)]
pub(crate) fn step(state: u64) -> u64 {
    state.wrapping_mul(MULTIPLIER).wrapping_add(ADDEND) & MASK
}

/// Take the top `bits` bits of a (freshly stepped) state word
///
/// The result is reinterpreted as `i32`, so a 32-bit draw may be negative.
#[inline(always)]
pub(crate) fn extract(state: u64, bits: u32) -> i32 {
    debug_assert!((1..=32).contains(&bits));
    (state >> (48 - bits)) as u32 as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_stays_within_48_bits() {
        let mut state = scramble(u64::MAX);
        for _ in 0..1000 {
            state = step(state);
            assert_eq!(state & !MASK, 0);
        }
    }

    #[test]
    fn test_extract_top_bits() {
        let state = MASK;
        assert_eq!(extract(state, 1), 1);
        assert_eq!(extract(state, 31), i32::MAX);
        assert_eq!(extract(state, 32), -1);
    }
}
