//! Per-chain fee floor policies.
//!
//! A handful of networks need their submitted fees adjusted beyond what the
//! node-reported estimate suggests: Polygon enforces a high priority fee
//! floor, Avalanche nodes report a gas price of zero, Celo expects the
//! estimate scaled by 3/2, and Scroll wants the fee cap and priority fee to be
//! the same value. Each quirk is captured as a [`FeeFloorPolicy`] and resolved
//! through a single lookup, so evaluation order can never change the result.

use alloy_chains::NamedChain;
use alloy_primitives::U256;

/// Priority fee floor for the Polygon family, in wei (77.5 gwei).
const POLYGON_FLOOR_WEI: u128 = 77_500_000_000;

/// Minimum fee for the Avalanche family, in wei (1.5 gwei). Avalanche nodes
/// report a zero gas price, so without a floor the estimate collapses to zero.
const AVALANCHE_FLOOR_WEI: u128 = 1_500_000_000;

/// Minimum fee for the Celo family, in wei (12 gwei).
const CELO_FLOOR_WEI: u128 = 12_000_000_000;

/// How fees for a specific chain are adjusted before submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeFloorPolicy {
    /// Minimum value for both outputs, in wei.
    pub floor: u128,
    /// Scaling applied to the combined estimate, as `(numerator, denominator)`.
    ///
    /// Only meaningful for [`combined`](Self::combined) policies.
    pub multiplier: (u64, u64),
    /// Whether the fee cap and priority fee are forced to the same value,
    /// computed from the larger of the two base estimates.
    pub combined: bool,
    /// Whether the oracle's speed-tier estimate participates in the floor
    /// comparison when available.
    pub tier_estimate: bool,
}

impl FeeFloorPolicy {
    const fn floored(floor: u128) -> Self {
        Self { floor, multiplier: (1, 1), combined: false, tier_estimate: false }
    }

    /// The floor for this policy as a [`U256`].
    pub fn floor(&self) -> U256 {
        U256::from(self.floor)
    }

    /// Applies the policy multiplier to `value`.
    pub fn scale(&self, value: U256) -> U256 {
        let (num, den) = self.multiplier;
        value * U256::from(num) / U256::from(den)
    }
}

/// Celo mainnet (42220) and its Alfajores testnet (44787). Matched by raw
/// chain id: `NamedChain` dropped the Alfajores variant when the testnet
/// moved to Sepolia, but the network is still live and keeps the mainnet
/// fee behavior.
const CELO_CHAIN_IDS: [u64; 2] = [42220, 44787];

/// Returns the fee floor policy for `chain_id`, if the chain has one.
///
/// Chains without a policy use the base estimates unmodified.
pub fn policy_for(chain_id: u64) -> Option<FeeFloorPolicy> {
    if CELO_CHAIN_IDS.contains(&chain_id) {
        return Some(FeeFloorPolicy {
            floor: CELO_FLOOR_WEI,
            multiplier: (3, 2),
            combined: true,
            tier_estimate: false,
        });
    }
    let chain = NamedChain::try_from(chain_id).ok()?;
    match chain {
        NamedChain::Polygon | NamedChain::PolygonAmoy => Some(FeeFloorPolicy {
            tier_estimate: true,
            ..FeeFloorPolicy::floored(POLYGON_FLOOR_WEI)
        }),
        NamedChain::Scroll | NamedChain::ScrollSepolia => Some(FeeFloorPolicy {
            floor: 0,
            multiplier: (1, 1),
            combined: true,
            tier_estimate: false,
        }),
        NamedChain::Avalanche | NamedChain::AvalancheFuji => {
            Some(FeeFloorPolicy::floored(AVALANCHE_FLOOR_WEI))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::gwei;

    #[test]
    fn mainnet_has_no_policy() {
        assert_eq!(policy_for(1), None);
        assert_eq!(policy_for(10), None);
        // chain ids with no `NamedChain` mapping
        assert_eq!(policy_for(u64::MAX), None);
    }

    #[test]
    fn testnets_share_the_mainnet_policy() {
        assert_eq!(policy_for(137), policy_for(80002));
        assert_eq!(policy_for(534352), policy_for(534351));
        assert_eq!(policy_for(42220), policy_for(44787));
        assert_eq!(policy_for(43114), policy_for(43113));
    }

    #[test]
    fn polygon_policy() {
        let policy = policy_for(137).unwrap();
        assert_eq!(policy.floor(), gwei(77) + gwei_half());
        assert!(policy.tier_estimate);
        assert!(!policy.combined);
    }

    #[test]
    fn celo_scales_by_three_halves() {
        let policy = policy_for(42220).unwrap();
        assert!(policy.combined);
        assert_eq!(policy.scale(gwei(2)), gwei(3));
        assert_eq!(policy.floor(), gwei(12));
        // Alfajores has no `NamedChain` variant but must still resolve.
        assert_eq!(policy_for(44787), Some(policy));
    }

    #[test]
    fn scroll_combines_without_floor() {
        let policy = policy_for(534352).unwrap();
        assert!(policy.combined);
        assert_eq!(policy.floor(), U256::ZERO);
        assert_eq!(policy.scale(gwei(10)), gwei(10));
    }

    fn gwei_half() -> U256 {
        U256::from(500_000_000u64)
    }
}
