// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

pub use deploy::{deploy, DeployConfig};
pub use networks::{summaries, NetworkSummary};

mod deploy;
mod networks;
