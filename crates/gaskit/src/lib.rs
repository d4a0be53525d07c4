//! User-operation gas fee toolkit.
//!
//! Ties the pure fee selector ([`gaskit_fees`]) and the gas estimation
//! oracles ([`gaskit_oracle`]) to live nodes: [`FeeEstimator`] aggregates the
//! upstream fee sources over an alloy provider, and [`server`] exposes the
//! oracle as a `gas_requestGasEstimation` JSON-RPC endpoint.

#![warn(missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod estimator;
pub mod rpc;
pub mod server;

pub use config::Config;
pub use estimator::{FeeEstimator, FeeSnapshot, SourceErrors};

// used by the `gaskit` binary
use alloy_chains as _;
use clap as _;
use tracing_subscriber as _;
use url as _;
