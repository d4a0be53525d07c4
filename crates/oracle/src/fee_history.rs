//! Generic speed-tier estimation from `eth_feeHistory`.
//!
//! For chains without a dedicated oracle the four tiers are derived from
//! reward percentiles over the recent blocks: the tier priority fee is the
//! median of its percentile column, and the fee cap leaves room for two
//! consecutive full base fee increases on top of it.

use crate::OracleError;
use alloy_primitives::U256;
use alloy_provider::Provider;
use alloy_rpc_types_eth::BlockNumberOrTag;
use gaskit_fees::{GasEstimation, GasEstimationParams};
use tracing::trace;

/// Number of recent blocks sampled.
const FEE_HISTORY_BLOCKS: u64 = 10;

/// Reward percentiles per tier: low, medium, high, instant.
const TIER_PERCENTILES: [f64; 4] = [10.0, 25.0, 50.0, 75.0];

/// Estimates the speed-tier table from the chain's fee history.
pub async fn estimate<P: Provider>(provider: &P) -> Result<GasEstimation, OracleError> {
    let fee_history = provider
        .get_fee_history(FEE_HISTORY_BLOCKS, BlockNumberOrTag::Latest, &TIER_PERCENTILES)
        .await?;

    // the last entry of `base_fee_per_gas` is the projected next-block base fee
    let base_fee =
        fee_history.base_fee_per_gas.last().copied().ok_or(OracleError::EmptyFeeHistory)?;
    let rewards = fee_history.reward.unwrap_or_default();
    if rewards.is_empty() {
        return Err(OracleError::EmptyFeeHistory);
    }
    trace!(
        target: "gaskit::oracle",
        blocks = rewards.len(),
        base_fee,
        "estimating tiers from fee history"
    );

    let mut tiers = [GasEstimationParams::default(); 4];
    for (index, tier) in tiers.iter_mut().enumerate() {
        let priority = median(rewards.iter().filter_map(|block| block.get(index).copied()));
        *tier = tier_params(base_fee, priority);
    }
    let [low, medium, high, instant] = tiers;
    Ok(GasEstimation { low, medium, high, instant })
}

/// Builds the fee pair for one tier from the next-block base fee and the tier
/// priority fee, both in wei.
fn tier_params(base_fee: u128, priority: u128) -> GasEstimationParams {
    GasEstimationParams {
        max_fee_per_gas: U256::from(2 * base_fee + priority),
        max_priority_fee_per_gas: U256::from(priority),
    }
}

/// Returns the median of the values, 0 if there are none.
fn median(values: impl Iterator<Item = u128>) -> u128 {
    let mut values: Vec<_> = values.collect();
    if values.is_empty() {
        return 0;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn median_empty() {
        assert_eq!(median(std::iter::empty()), 0);
    }

    #[test]
    fn median_odd() {
        assert_eq!(median([29, 71, 40, 30, 59].into_iter()), 40);
    }

    #[test]
    fn median_even() {
        assert_eq!(median([80, 30, 40, 50, 60, 10, 20, 90].into_iter()), 45);
    }

    #[test]
    fn tier_fee_covers_two_base_fee_bumps() {
        let params = tier_params(1_000_000_000, 250_000_000);
        assert_eq!(params.max_priority_fee_per_gas, U256::from(250_000_000u64));
        assert_eq!(params.max_fee_per_gas, U256::from(2_250_000_000u64));
    }
}
