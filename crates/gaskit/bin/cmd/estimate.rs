use alloy_chains::NamedChain;
use alloy_primitives::{utils::format_units, U256};
use alloy_provider::{Provider, RootProvider};
use clap::Parser;
use eyre::{Result, WrapErr};
use gaskit::{Config, FeeEstimator};
use gaskit_fees::GasSpeed;
use tracing::warn;
use url::Url;

/// CLI arguments for `gaskit estimate`.
#[derive(Debug, Parser)]
pub struct EstimateArgs {
    /// The chain to estimate for.
    ///
    /// Defaults to the chain id reported by the node.
    #[arg(long)]
    chain: Option<u64>,

    /// The RPC endpoint, overrides the configured one.
    #[arg(short = 'r', long, env = "ETH_RPC_URL")]
    rpc_url: Option<String>,

    /// The speed tier to target: low, medium, high or instant.
    #[arg(long)]
    speed: Option<GasSpeed>,

    /// Speed bump percentage applied to the wallet-side estimate; 100 = no
    /// bump.
    #[arg(long)]
    speed_bump: Option<u64>,

    /// Print the selected pair as JSON hex quantities.
    #[arg(long)]
    json: bool,
}

impl EstimateArgs {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        let rpc_url = self.rpc_url.unwrap_or(config.rpc_url);
        let url: Url =
            rpc_url.parse().wrap_err_with(|| format!("invalid RPC endpoint: {rpc_url}"))?;
        let provider = RootProvider::new_http(url);

        let chain_id = match self.chain {
            Some(chain_id) => chain_id,
            None => provider.get_chain_id().await?,
        };

        let estimator = FeeEstimator::new(provider, chain_id)
            .with_gas_speed(self.speed.unwrap_or(config.gas_speed))
            .with_speed_bump_percent(self.speed_bump.unwrap_or(config.speed_bump_percent));
        let snapshot = estimator.estimate().await;

        if snapshot.is_degraded() {
            warn!(target: "gaskit", "one or more fee sources failed, estimate may be degraded");
        }
        if !snapshot.fees.is_complete() {
            eyre::bail!("could not determine a complete fee pair from the available sources");
        }

        if self.json {
            println!(
                "{}",
                serde_json::json!({
                    "maxFeePerGas": snapshot.fees.max_fee_per_gas,
                    "maxPriorityFeePerGas": snapshot.fees.max_priority_fee_per_gas,
                })
            );
        } else {
            println!("chain: {}", chain_name(chain_id));
            println!("maxFeePerGas: {}", in_gwei(snapshot.fees.max_fee_per_gas)?);
            println!("maxPriorityFeePerGas: {}", in_gwei(snapshot.fees.max_priority_fee_per_gas)?);
        }
        Ok(())
    }
}

fn chain_name(chain_id: u64) -> String {
    NamedChain::try_from(chain_id)
        .map(|chain| chain.to_string())
        .unwrap_or_else(|_| chain_id.to_string())
}

fn in_gwei(value: Option<U256>) -> Result<String> {
    match value {
        Some(value) => Ok(format!("{} gwei", format_units(value, "gwei")?)),
        None => Ok("n/a".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_speed_tier() {
        let args = EstimateArgs::parse_from(["gaskit", "--speed", "instant", "--chain", "137"]);
        assert_eq!(args.speed, Some(GasSpeed::Instant));
        assert_eq!(args.chain, Some(137));
    }

    #[test]
    fn rejects_unknown_speed_tier() {
        assert!(EstimateArgs::try_parse_from(["gaskit", "--speed", "warp"]).is_err());
    }

    #[test]
    fn formats_gwei() {
        assert_eq!(in_gwei(Some(U256::from(77_500_000_000u64))).unwrap(), "77.500000000 gwei");
        assert_eq!(in_gwei(None).unwrap(), "n/a");
    }
}
