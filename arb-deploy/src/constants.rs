// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

/// Environment variable selecting the target network.
pub const NETWORK_ENV: &str = "DEPLOY_NETWORK";

/// Environment variable pointing at an extra networks file.
pub const NETWORKS_FILE_ENV: &str = "DEPLOY_NETWORKS_FILE";
