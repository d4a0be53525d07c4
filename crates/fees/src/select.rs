//! The fee selector.

use crate::{
    estimation::{GasEstimation, GasEstimationParams, GasSpeed},
    policy::{policy_for, FeeFloorPolicy},
};
use alloy_primitives::U256;

/// A wallet-side EIP-1559 fee estimate. Either field may be absent if the
/// upstream source failed or the chain does not report it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeeEstimate {
    /// Estimated fee cap in wei.
    pub max_fee_per_gas: Option<U256>,
    /// Estimated priority fee in wei.
    pub max_priority_fee_per_gas: Option<U256>,
}

/// The selected fee pair for a pending user operation.
///
/// Absent inputs propagate as `None` outputs; callers must not submit an
/// operation unless [`is_complete`](Self::is_complete) holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeePair {
    /// Fee cap to attach, in wei.
    pub max_fee_per_gas: Option<U256>,
    /// Priority fee to attach, in wei.
    pub max_priority_fee_per_gas: Option<U256>,
}

impl FeePair {
    fn both(value: U256) -> Self {
        Self { max_fee_per_gas: Some(value), max_priority_fee_per_gas: Some(value) }
    }

    /// Whether both fees are available.
    pub const fn is_complete(&self) -> bool {
        self.max_fee_per_gas.is_some() && self.max_priority_fee_per_gas.is_some()
    }

    /// Caps the priority fee at the fee cap.
    ///
    /// Execution clients reject transactions where the priority fee exceeds
    /// the fee cap, so the invariant is enforced on every selected pair.
    fn clamped(mut self) -> Self {
        if let (Some(fee), Some(priority)) = (self.max_fee_per_gas, self.max_priority_fee_per_gas)
        {
            self.max_priority_fee_per_gas = Some(priority.min(fee));
        }
        self
    }
}

/// Inputs to [`select_fees_per_gas`].
#[derive(Clone, Copy, Debug)]
pub struct FeeInputs<'a> {
    /// The chain the user operation targets.
    pub chain_id: u64,
    /// Wallet-side fee estimate, e.g. from `eth_feeHistory`.
    pub fees_per_gas: FeeEstimate,
    /// Network gas price, used when no fee estimate is available.
    pub gas_price: Option<U256>,
    /// Network-reported priority fee, used when the estimate lacks one.
    pub estimated_max_priority_fee_per_gas: Option<U256>,
    /// Percentage multiplier applied to the wallet-side estimate;
    /// `100` means no bump.
    pub speed_bump_percent: u64,
    /// The speed tier selected by the user.
    pub gas_speed: GasSpeed,
    /// Oracle speed-tier table, if the oracle responded.
    pub gas_estimation: Option<&'a GasEstimation>,
}

/// Selects the `(maxFeePerGas, maxPriorityFeePerGas)` pair for a user
/// operation.
///
/// The base fee cap is the wallet estimate scaled by the speed bump, falling
/// back to the plain network gas price. The base priority fee falls back first
/// to the network-reported priority fee and then to the base fee cap. The
/// chain's [`FeeFloorPolicy`] (if any) is then applied on top; chains without
/// a policy pass the base pair through unchanged.
///
/// Pure: identical inputs always produce identical outputs.
pub fn select_fees_per_gas(inputs: &FeeInputs<'_>) -> FeePair {
    let bump = U256::from(inputs.speed_bump_percent);
    let hundred = U256::from(100u64);

    let base_fee = inputs
        .fees_per_gas
        .max_fee_per_gas
        .map(|fee| fee * bump / hundred)
        .or(inputs.gas_price);

    let base_priority = inputs
        .fees_per_gas
        .max_priority_fee_per_gas
        .map(|fee| fee * bump / hundred)
        .or(inputs.estimated_max_priority_fee_per_gas)
        .or(base_fee);

    let tier = inputs.gas_estimation.map(|estimation| estimation.params_for(inputs.gas_speed));

    let pair = match policy_for(inputs.chain_id) {
        Some(policy) => apply_policy(&policy, base_fee, base_priority, tier),
        None => FeePair { max_fee_per_gas: base_fee, max_priority_fee_per_gas: base_priority },
    };
    pair.clamped()
}

/// Evaluates a single [`FeeFloorPolicy`] against the base estimates.
fn apply_policy(
    policy: &FeeFloorPolicy,
    base_fee: Option<U256>,
    base_priority: Option<U256>,
    tier: Option<GasEstimationParams>,
) -> FeePair {
    if policy.combined {
        let combined = match (base_fee, base_priority) {
            (Some(fee), Some(priority)) => Some(fee.max(priority)),
            (fee, priority) => fee.or(priority),
        };
        // With no estimate at all the policy has nothing to work with.
        let Some(combined) = combined else {
            return FeePair { max_fee_per_gas: base_fee, max_priority_fee_per_gas: base_priority };
        };
        return FeePair::both(policy.scale(combined).max(policy.floor()));
    }

    let tier = if policy.tier_estimate { tier } else { None };
    let fee = floored(policy.floor(), base_fee, tier.map(|tier| tier.max_fee_per_gas));
    let priority =
        floored(policy.floor(), base_priority, tier.map(|tier| tier.max_priority_fee_per_gas));
    FeePair { max_fee_per_gas: Some(fee), max_priority_fee_per_gas: Some(priority) }
}

/// Largest of the floor and whichever candidates are present.
fn floored(floor: U256, base: Option<U256>, tier: Option<U256>) -> U256 {
    let mut out = floor;
    if let Some(base) = base {
        out = out.max(base);
    }
    if let Some(tier) = tier {
        out = out.max(tier);
    }
    out
}
