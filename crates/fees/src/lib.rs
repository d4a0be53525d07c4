//! Chain-aware EIP-1559 fee selection for ERC-4337 user operations.
//!
//! The entry point is [`select_fees_per_gas`]: a pure function that combines a
//! wallet-side fee estimate, a network gas price fallback, and an oracle's
//! speed-tier table into the `(maxFeePerGas, maxPriorityFeePerGas)` pair to
//! attach to a pending user operation. Chain-specific minimum floors are
//! expressed as a [`FeeFloorPolicy`] lookup table rather than per-chain
//! branching, see the [`policy`] module.

#![warn(missing_docs, unused_crate_dependencies)]

pub mod estimation;
pub mod policy;
pub mod select;
pub mod units;

pub use estimation::{GasEstimation, GasEstimationParams, GasSpeed};
pub use policy::{policy_for, FeeFloorPolicy};
pub use select::{select_fees_per_gas, FeeEstimate, FeeInputs, FeePair};
