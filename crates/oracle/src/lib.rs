//! Speed-tier gas estimation oracles.
//!
//! Produces the [`GasEstimation`] table consumed by the fee selector. Chains
//! that deviate from `eth_feeHistory` get a dedicated oracle (currently the
//! Polygon gas station); everything else is estimated from fee history reward
//! percentiles.

#![warn(missing_docs, unused_crate_dependencies)]

use alloy_chains::NamedChain;
use alloy_provider::Provider;
use gaskit_fees::GasEstimation;

pub mod fee_history;
pub mod polygon;

pub use polygon::PolygonGasStation;

/// Errors produced while querying a gas estimation oracle.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// The requested chain has no dedicated oracle.
    #[error("no gas estimation oracle for chain id {0}")]
    UnsupportedChain(u64),
    /// The oracle reported a zero fee, which means its data is stale.
    #[error("gas oracle returned a zero fee")]
    ZeroFee,
    /// `eth_feeHistory` returned no usable blocks.
    #[error("fee history response contained no blocks")]
    EmptyFeeHistory,
    /// The HTTP request to the oracle failed.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The RPC call to the node failed.
    #[error(transparent)]
    Transport(#[from] alloy_transport::TransportError),
}

/// Chain-aware gas estimation.
///
/// Routes the Polygon family to [`PolygonGasStation`] and every other chain
/// to the [`fee_history`] estimator over the wrapped provider.
#[derive(Clone, Debug)]
pub struct GasOracle<P> {
    provider: P,
}

impl<P: Provider> GasOracle<P> {
    /// Creates a new oracle over the given provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns the speed-tier estimation for `chain_id`.
    pub async fn estimate(&self, chain_id: u64) -> Result<GasEstimation, OracleError> {
        if let Ok(chain) = NamedChain::try_from(chain_id) {
            match chain {
                NamedChain::Polygon | NamedChain::PolygonAmoy => {
                    return PolygonGasStation::new(chain_id)?.estimate().await;
                }
                _ => {}
            }
        }
        fee_history::estimate(&self.provider).await
    }
}
