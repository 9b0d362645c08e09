// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::path::PathBuf;

use deploy_tools::core::{
    artifact::{ArtifactStore, DEFAULT_ARTIFACTS_DIR},
    network::{ConfigurationError, NetworkRegistry},
};

use crate::constants::NETWORKS_FILE_ENV;

#[derive(Debug, clap::Args)]
pub struct RegistryArgs {
    /// TOML file adding or overriding network definitions
    #[arg(long, env = NETWORKS_FILE_ENV)]
    pub networks_file: Option<PathBuf>,
}

impl RegistryArgs {
    /// Built-in networks, merged with the networks file if one was given.
    pub fn registry(&self) -> Result<NetworkRegistry, ConfigurationError> {
        let registry = NetworkRegistry::builtin();
        match &self.networks_file {
            Some(path) => registry.with_file(path),
            None => Ok(registry),
        }
    }
}

#[derive(Debug, clap::Args)]
pub struct ArtifactArgs {
    /// Directory holding the compiled contract artifacts
    #[arg(long, default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,
}

impl ArtifactArgs {
    pub fn store(&self) -> ArtifactStore {
        ArtifactStore::new(&self.artifacts)
    }
}
