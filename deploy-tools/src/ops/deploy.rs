// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.

use alloy::{network::EthereumWallet, providers::ProviderBuilder};

use crate::{
    core::{
        artifact::ArtifactStore,
        credential::SecretSource,
        deployment::{self, Deployment, DeploymentError, DeploymentResult, RpcCreator},
        network::NetworkProfile,
    },
    utils::color::Color,
};

/// Settings for a deployment, assembled once at startup.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub artifacts: ArtifactStore,
}

/// Deploys the named contract to the network described by `profile`.
///
/// The signing key is read from `secrets` before anything touches the network. Any failure is
/// captured in the returned [`DeploymentResult`].
pub async fn deploy(
    contract_name: &str,
    profile: &NetworkProfile,
    config: &DeployConfig,
    secrets: &impl SecretSource,
) -> DeploymentResult {
    let result = try_deploy(contract_name, profile, config, secrets).await;
    if let Ok(deployment) = &result {
        if let Some(explorer) = profile.explorer() {
            let link = explorer.address_url(deployment.address).mint();
            info!(@grey, "explorer: {link}");
        }
    }
    result.into()
}

async fn try_deploy(
    contract_name: &str,
    profile: &NetworkProfile,
    config: &DeployConfig,
    secrets: &impl SecretSource,
) -> crate::Result<Deployment> {
    let signer = profile.credential().signer(secrets)?;
    let artifact = config.artifacts.load(contract_name)?;

    debug!(@grey, "connecting to {}", profile.rpc_url());
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::new(signer))
        .connect(profile.rpc_url())
        .await
        .map_err(DeploymentError::from)?;

    let creator = RpcCreator::new(provider);
    Ok(deployment::deploy(&artifact, profile, &creator).await?)
}
