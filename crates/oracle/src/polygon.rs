//! Polygon gas station client.
//!
//! Polygon's fee market misbehaves with plain `eth_feeHistory` estimates, so
//! the network runs a dedicated oracle at `gasstation.polygon.technology`
//! reporting suggested fees in (fractional) gwei per speed level.

use crate::OracleError;
use alloy_chains::NamedChain;
use gaskit_fees::{units::gwei_f64, GasEstimation, GasEstimationParams};
use serde::Deserialize;
use tracing::trace;

const GAS_STATION_URL: &str = "https://gasstation.polygon.technology/v2";
const GAS_STATION_AMOY_URL: &str = "https://gasstation-testnet.polygon.technology/v2";

/// Suggested fees for one gas station speed level, in gwei.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GasStationLevel {
    max_priority_fee: f64,
    max_fee: f64,
}

/// The gas station v2 response.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GasStationResponse {
    safe_low: GasStationLevel,
    standard: GasStationLevel,
    fast: GasStationLevel,
    #[allow(dead_code)]
    estimated_base_fee: f64,
    block_time: u64,
    block_number: u64,
}

impl GasStationLevel {
    fn is_zero(&self) -> bool {
        self.max_priority_fee == 0.0 || self.max_fee == 0.0
    }

    fn to_params(self) -> GasEstimationParams {
        GasEstimationParams {
            max_fee_per_gas: gwei_f64(self.max_fee),
            max_priority_fee_per_gas: gwei_f64(self.max_priority_fee),
        }
    }
}

impl GasStationResponse {
    /// Maps the three gas station levels onto the four speed tiers; the
    /// station has no tier above `fast`, so `instant` reuses it.
    fn into_estimation(self) -> Result<GasEstimation, OracleError> {
        if self.safe_low.is_zero() || self.standard.is_zero() || self.fast.is_zero() {
            return Err(OracleError::ZeroFee);
        }
        Ok(GasEstimation {
            low: self.safe_low.to_params(),
            medium: self.standard.to_params(),
            high: self.fast.to_params(),
            instant: self.fast.to_params(),
        })
    }
}

/// Client for the Polygon gas station oracle.
#[derive(Clone, Debug)]
pub struct PolygonGasStation {
    client: reqwest::Client,
    url: &'static str,
}

impl PolygonGasStation {
    /// Creates a client for the given Polygon chain.
    ///
    /// Errors for chains the gas station does not serve.
    pub fn new(chain_id: u64) -> Result<Self, OracleError> {
        let url = match NamedChain::try_from(chain_id) {
            Ok(NamedChain::Polygon) => GAS_STATION_URL,
            Ok(NamedChain::PolygonAmoy) => GAS_STATION_AMOY_URL,
            _ => return Err(OracleError::UnsupportedChain(chain_id)),
        };
        Ok(Self { client: reqwest::Client::new(), url })
    }

    /// Fetches the current speed-tier estimation.
    pub async fn estimate(&self) -> Result<GasEstimation, OracleError> {
        let response =
            self.client.get(self.url).send().await?.json::<GasStationResponse>().await?;
        trace!(
            target: "gaskit::oracle",
            block = response.block_number,
            block_time = response.block_time,
            "gas station response"
        );
        response.into_estimation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;
    use similar_asserts::assert_eq;

    const RESPONSE: &str = r#"{
        "safeLow": { "maxPriorityFee": 30.1, "maxFee": 30.6 },
        "standard": { "maxPriorityFee": 32.0, "maxFee": 32.5 },
        "fast": { "maxPriorityFee": 77.5, "maxFee": 78.0 },
        "estimatedBaseFee": 0.5,
        "blockTime": 2,
        "blockNumber": 59000000
    }"#;

    #[test]
    fn parses_gas_station_response() {
        let response: GasStationResponse = serde_json::from_str(RESPONSE).unwrap();
        let estimation = response.into_estimation().unwrap();
        assert_eq!(estimation.low.max_priority_fee_per_gas, U256::from(30_100_000_000u64));
        assert_eq!(estimation.medium.max_fee_per_gas, U256::from(32_500_000_000u64));
        assert_eq!(estimation.high.max_fee_per_gas, U256::from(78_000_000_000u64));
        // instant reuses the fast level
        assert_eq!(estimation.instant, estimation.high);
    }

    #[test]
    fn rejects_zero_fees() {
        let response: GasStationResponse = serde_json::from_str(
            r#"{
                "safeLow": { "maxPriorityFee": 0.0, "maxFee": 30.6 },
                "standard": { "maxPriorityFee": 32.0, "maxFee": 32.5 },
                "fast": { "maxPriorityFee": 77.5, "maxFee": 78.0 },
                "estimatedBaseFee": 0.5,
                "blockTime": 2,
                "blockNumber": 59000000
            }"#,
        )
        .unwrap();
        assert!(matches!(response.into_estimation(), Err(OracleError::ZeroFee)));
    }

    #[test]
    fn unsupported_chain() {
        assert!(matches!(PolygonGasStation::new(1), Err(OracleError::UnsupportedChain(1))));
        assert!(PolygonGasStation::new(137).is_ok());
        assert!(PolygonGasStation::new(80002).is_ok());
    }
}
