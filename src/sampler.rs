//! Unbiased integer sampling on top of the CSPRNG capability.

use rand::{CryptoRng, RngCore};

/// Uniform integer in `{0, …, excl_max − 1}`.
///
/// Rejection sampling over full-width draws: a draw is accepted only if
/// it falls below the largest multiple of `excl_max` representable in a
/// `u32`, which removes the modulo bias entirely. The loop accepts with
/// probability above one half, so the expected number of draws is below
/// two.
pub(crate) fn rand_less_than<R: RngCore + CryptoRng>(csrng: &mut R, excl_max: u32) -> u32 {
    debug_assert!(excl_max > 0);
    loop {
        let value = csrng.next_u32();
        if value <= u32::MAX - (u32::MAX % excl_max) - 1 {
            return value % excl_max;
        }
    }
}
