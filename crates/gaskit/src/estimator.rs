//! Aggregation of the upstream fee sources.

use alloy_primitives::U256;
use alloy_provider::Provider;
use alloy_transport::TransportError;
use gaskit_fees::{select_fees_per_gas, FeeEstimate, FeeInputs, FeePair, GasSpeed};
use gaskit_oracle::{GasOracle, OracleError};
use tracing::debug;

/// Aggregates the live fee sources for one chain and runs the fee selector
/// over them.
///
/// The individual sources may fail independently; a failed source contributes
/// an absent input to the selector and is recorded on the resulting
/// [`FeeSnapshot`] instead of aborting the whole estimation.
#[derive(Clone, Debug)]
pub struct FeeEstimator<P> {
    provider: P,
    oracle: GasOracle<P>,
    chain_id: u64,
    gas_speed: GasSpeed,
    speed_bump_percent: u64,
}

impl<P: Provider + Clone> FeeEstimator<P> {
    /// Creates an estimator for `chain_id` over the given provider.
    pub fn new(provider: P, chain_id: u64) -> Self {
        let oracle = GasOracle::new(provider.clone());
        Self {
            provider,
            oracle,
            chain_id,
            gas_speed: GasSpeed::default(),
            speed_bump_percent: crate::config::DEFAULT_SPEED_BUMP_PERCENT,
        }
    }

    /// Sets the speed tier to target.
    pub fn with_gas_speed(mut self, gas_speed: GasSpeed) -> Self {
        self.gas_speed = gas_speed;
        self
    }

    /// Sets the speed bump percentage; 100 = no bump.
    pub fn with_speed_bump_percent(mut self, percent: u64) -> Self {
        self.speed_bump_percent = percent;
        self
    }

    /// Fetches all upstream sources concurrently and selects the fee pair.
    pub async fn estimate(&self) -> FeeSnapshot {
        let (fees, gas_price, priority_fee, estimation) = futures::join!(
            self.provider.estimate_eip1559_fees(),
            self.provider.get_gas_price(),
            self.provider.get_max_priority_fee_per_gas(),
            self.oracle.estimate(self.chain_id),
        );

        let mut errors = SourceErrors::default();

        let fees_per_gas = match fees {
            Ok(estimate) => FeeEstimate {
                max_fee_per_gas: Some(U256::from(estimate.max_fee_per_gas)),
                max_priority_fee_per_gas: Some(U256::from(estimate.max_priority_fee_per_gas)),
            },
            Err(err) => {
                debug!(target: "gaskit::fees", %err, "eip1559 fee estimate unavailable");
                errors.fee_estimate = Some(err);
                FeeEstimate::default()
            }
        };

        let gas_price = match gas_price {
            Ok(price) => Some(U256::from(price)),
            Err(err) => {
                debug!(target: "gaskit::fees", %err, "gas price unavailable");
                errors.gas_price = Some(err);
                None
            }
        };

        let priority_fee = match priority_fee {
            Ok(fee) => Some(U256::from(fee)),
            Err(err) => {
                debug!(target: "gaskit::fees", %err, "max priority fee unavailable");
                errors.priority_fee = Some(err);
                None
            }
        };

        let estimation = match estimation {
            Ok(estimation) => Some(estimation),
            Err(err) => {
                debug!(target: "gaskit::fees", %err, "gas estimation oracle unavailable");
                errors.gas_estimation = Some(err);
                None
            }
        };

        let inputs = FeeInputs {
            chain_id: self.chain_id,
            fees_per_gas,
            gas_price,
            estimated_max_priority_fee_per_gas: priority_fee,
            speed_bump_percent: self.speed_bump_percent,
            gas_speed: self.gas_speed,
            gas_estimation: estimation.as_ref(),
        };
        FeeSnapshot { fees: select_fees_per_gas(&inputs), errors }
    }
}

/// The outcome of one estimation round.
#[derive(Debug, Default)]
pub struct FeeSnapshot {
    /// The selected fee pair. May be incomplete when sources failed, see
    /// [`FeePair::is_complete`].
    pub fees: FeePair,
    /// Errors of the sources that failed this round.
    pub errors: SourceErrors,
}

impl FeeSnapshot {
    /// Whether any upstream source failed.
    pub fn is_degraded(&self) -> bool {
        self.errors.any()
    }
}

/// Per-source errors of one estimation round.
#[derive(Debug, Default)]
pub struct SourceErrors {
    /// Failure of the EIP-1559 fee estimate.
    pub fee_estimate: Option<TransportError>,
    /// Failure of the gas price fallback.
    pub gas_price: Option<TransportError>,
    /// Failure of the network priority fee source.
    pub priority_fee: Option<TransportError>,
    /// Failure of the gas estimation oracle.
    pub gas_estimation: Option<OracleError>,
}

impl SourceErrors {
    /// Whether any source failed.
    pub fn any(&self) -> bool {
        self.fee_estimate.is_some()
            || self.gas_price.is_some()
            || self.priority_fee.is_some()
            || self.gas_estimation.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_transport::TransportErrorKind;

    #[test]
    fn snapshot_degraded_on_any_source_error() {
        let mut snapshot = FeeSnapshot::default();
        assert!(!snapshot.is_degraded());

        snapshot.errors.gas_price = Some(TransportErrorKind::custom_str("connection refused"));
        assert!(snapshot.is_degraded());

        let mut snapshot = FeeSnapshot::default();
        snapshot.errors.gas_estimation = Some(OracleError::ZeroFee);
        assert!(snapshot.is_degraded());
    }
}
