//! Speed tiers and the oracle-provided gas estimation table.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The speed tier a user operation should target.
///
/// Mirrors the buckets exposed by gas estimation oracles: a higher tier pays
/// more per gas in exchange for faster inclusion.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GasSpeed {
    /// Cheapest tier, may take several blocks to be included.
    Low,
    /// The oracle's standard suggestion.
    #[default]
    Medium,
    /// Above-standard fee for next-block inclusion.
    High,
    /// Highest tier the oracle reports.
    Instant,
}

impl GasSpeed {
    /// All tiers, cheapest first.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Instant];

    /// Returns the tier name as used on the wire.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Instant => "instant",
        }
    }
}

impl fmt::Display for GasSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GasSpeed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "instant" => Ok(Self::Instant),
            _ => Err(format!("unknown gas speed: `{s}`")),
        }
    }
}

/// The fee pair suggested by an oracle for a single speed tier.
///
/// Quantities serialize as hex strings (`"0x.."`), matching the
/// `gas_requestGasEstimation` wire format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasEstimationParams {
    /// Suggested fee cap in wei.
    pub max_fee_per_gas: U256,
    /// Suggested priority fee in wei.
    pub max_priority_fee_per_gas: U256,
}

/// A full speed-tier table as returned by a gas estimation oracle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasEstimation {
    /// Suggested fees for [`GasSpeed::Low`].
    pub low: GasEstimationParams,
    /// Suggested fees for [`GasSpeed::Medium`].
    pub medium: GasEstimationParams,
    /// Suggested fees for [`GasSpeed::High`].
    pub high: GasEstimationParams,
    /// Suggested fees for [`GasSpeed::Instant`].
    pub instant: GasEstimationParams,
}

impl GasEstimation {
    /// Returns the suggested fee pair for the given tier.
    pub const fn params_for(&self, speed: GasSpeed) -> GasEstimationParams {
        match speed {
            GasSpeed::Low => self.low,
            GasSpeed::Medium => self.medium,
            GasSpeed::High => self.high,
            GasSpeed::Instant => self.instant,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn gas_speed_roundtrip() {
        for speed in GasSpeed::ALL {
            assert_eq!(speed.as_str().parse::<GasSpeed>().unwrap(), speed);
        }
        assert!("warp".parse::<GasSpeed>().is_err());
    }

    #[test]
    fn estimation_wire_format() {
        let json = r#"{
            "low": { "maxFeePerGas": "0x3b9aca00", "maxPriorityFeePerGas": "0x1" },
            "medium": { "maxFeePerGas": "0x77359400", "maxPriorityFeePerGas": "0x2" },
            "high": { "maxFeePerGas": "0xb2d05e00", "maxPriorityFeePerGas": "0x3" },
            "instant": { "maxFeePerGas": "0xee6b2800", "maxPriorityFeePerGas": "0x4" }
        }"#;
        let estimation: GasEstimation = serde_json::from_str(json).unwrap();
        assert_eq!(estimation.low.max_fee_per_gas, U256::from(1_000_000_000u64));
        assert_eq!(estimation.high.max_priority_fee_per_gas, U256::from(3u64));

        let tier = estimation.params_for(GasSpeed::Instant);
        assert_eq!(tier.max_fee_per_gas, U256::from(4_000_000_000u64));

        // quantities stay hex encoded on the way out
        let value = serde_json::to_value(estimation).unwrap();
        assert_eq!(value["medium"]["maxFeePerGas"], "0x77359400");
    }
}
