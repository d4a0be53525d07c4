//! Wei/gwei conversion helpers.

use alloy_primitives::U256;

/// Multiplier to convert gwei to wei.
pub const GWEI_TO_WEI: u128 = 1_000_000_000;

/// Returns `n` gwei expressed in wei.
#[inline]
pub fn gwei(n: u64) -> U256 {
    U256::from(n as u128 * GWEI_TO_WEI)
}

/// Converts a fractional gwei amount to wei, saturating at the `u128` range.
///
/// Gas oracles commonly report quantities such as `77.5` gwei; the fraction is
/// preserved up to wei resolution.
#[inline]
pub fn gwei_f64(n: f64) -> U256 {
    U256::from((n.max(0.0) * GWEI_TO_WEI as f64) as u128)
}
