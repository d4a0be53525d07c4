use crate::cmd::{estimate::EstimateArgs, serve::ServeArgs};
use clap::{Parser, Subcommand};

/// The `gaskit` CLI.
#[derive(Debug, Parser)]
#[command(name = "gaskit", version, about = "User-operation gas fee toolkit")]
pub struct Gaskit {
    #[command(subcommand)]
    pub cmd: GaskitSubcommand,
}

/// The available subcommands.
#[derive(Debug, Subcommand)]
pub enum GaskitSubcommand {
    /// Select the fee pair for a pending user operation.
    #[command(visible_alias = "e")]
    Estimate(EstimateArgs),

    /// Serve the gas estimation JSON-RPC endpoint.
    Serve(ServeArgs),
}
