use alloy_provider::RootProvider;
use clap::Parser;
use eyre::{Result, WrapErr};
use gaskit::{server, Config};
use gaskit_oracle::GasOracle;
use std::net::SocketAddr;
use url::Url;

/// CLI arguments for `gaskit serve`.
#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// The host to bind to.
    #[arg(long)]
    host: Option<String>,

    /// The port to bind to.
    #[arg(short, long)]
    port: Option<u16>,

    /// The upstream RPC endpoint used for fee-history estimation.
    #[arg(short = 'r', long, env = "ETH_RPC_URL")]
    rpc_url: Option<String>,
}

impl ServeArgs {
    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;
        let rpc_url = self.rpc_url.unwrap_or(config.rpc_url);
        let url: Url =
            rpc_url.parse().wrap_err_with(|| format!("invalid RPC endpoint: {rpc_url}"))?;
        let oracle = GasOracle::new(RootProvider::new_http(url));

        let host = self.host.unwrap_or(config.host);
        let port = self.port.unwrap_or(config.port);
        let addr: SocketAddr =
            format!("{host}:{port}").parse().wrap_err("invalid listen address")?;
        server::serve(addr, oracle).await
    }
}
