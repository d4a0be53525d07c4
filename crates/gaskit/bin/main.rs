use clap::Parser;
use eyre::Result;

mod args;
mod cmd;

use args::{Gaskit, GaskitSubcommand};

fn main() -> Result<()> {
    subscriber();
    let args = Gaskit::parse();
    run(args)
}

#[tokio::main]
async fn run(args: Gaskit) -> Result<()> {
    match args.cmd {
        GaskitSubcommand::Estimate(cmd) => cmd.run().await,
        GaskitSubcommand::Serve(cmd) => cmd.run().await,
    }
}

/// Initializes the tracing subscriber from the `RUST_LOG` env var.
fn subscriber() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
