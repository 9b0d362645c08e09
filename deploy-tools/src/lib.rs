// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Tools for deploying compiled contracts to Arbitrum chains.
//!
//! The [`core`] module holds the building blocks (network registry, credentials, artifacts and
//! the deployment runner), while [`ops`] strings them together into the operations exposed by
//! the `arb-deploy` binary.

#[macro_use]
mod macros;

pub mod core;
pub(crate) mod error;
pub mod ops;
pub mod utils;

pub use error::{Error, Result};
