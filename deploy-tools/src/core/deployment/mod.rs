// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Contract deployment.
//!
//! A deployment is a single contract creation transaction. It is never retried and never
//! deduplicated: deploying the same artifact twice creates two contracts.

use std::fmt::Display;

use alloy::primitives::{Address, Bytes, TxHash};

use crate::{
    core::{artifact::ContractArtifact, network::NetworkProfile},
    utils::color::DebugColor,
};

pub mod request;

pub use request::{DeploymentRequest, RpcCreator};

/// A mined contract creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deployment {
    pub address: Address,
    pub tx_hash: TxHash,
    pub gas_used: u64,
    pub block_number: Option<u64>,
}

/// The chain operations needed to deploy a contract.
#[allow(async_fn_in_trait)]
pub trait ContractCreator {
    /// Address the creation transaction is sent from.
    fn sender(&self) -> Address;

    async fn chain_id(&self) -> Result<u64, DeploymentError>;

    /// Submits a creation transaction for `code` and waits until it is mined.
    async fn create(&self, code: Bytes) -> Result<Deployment, DeploymentError>;
}

/// Outcome of a deployment as reported to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentResult {
    pub contract_address: Option<Address>,
    pub tx_hash: Option<TxHash>,
    pub success: bool,
    pub error: Option<String>,
}

impl DeploymentResult {
    pub fn succeeded(deployment: &Deployment) -> Self {
        Self {
            contract_address: Some(deployment.address),
            tx_hash: Some(deployment.tx_hash),
            success: true,
            error: None,
        }
    }

    pub fn failed(error: impl Display) -> Self {
        Self {
            contract_address: None,
            tx_hash: None,
            success: false,
            error: Some(error.to_string()),
        }
    }

    /// The deployed address, or the failure as an error.
    pub fn into_result(self) -> eyre::Result<Address> {
        match (self.success, self.contract_address) {
            (true, Some(address)) => Ok(address),
            _ => Err(eyre::eyre!(self
                .error
                .unwrap_or_else(|| "deployment failed".to_owned()))),
        }
    }
}

impl<E: Display> From<Result<Deployment, E>> for DeploymentResult {
    fn from(result: Result<Deployment, E>) -> Self {
        match result {
            Ok(deployment) => Self::succeeded(&deployment),
            Err(err) => Self::failed(err),
        }
    }
}

/// Deploys `artifact` to the network described by `profile`.
///
/// The remote chain id must match the one declared for the network. A mismatch with the chain id
/// declared for the network's explorer is only reported.
pub async fn deploy(
    artifact: &ContractArtifact,
    profile: &NetworkProfile,
    creator: &impl ContractCreator,
) -> Result<Deployment, DeploymentError> {
    let chain_id = creator.chain_id().await?;
    check_chain_id(profile, chain_id)?;
    debug!(@grey, "sender address: {}", creator.sender().debug_lavender());
    info!(@grey,
        "deploying {} to {} (chain id {chain_id})",
        artifact.qualified_name(),
        profile.name()
    );

    let deployment = creator.create(artifact.bytecode.clone()).await?;

    info!(@grey, "deployed code at address: {}", deployment.address.debug_lavender());
    debug!(@grey, "gas used: {}", deployment.gas_used);
    if let Some(block) = deployment.block_number {
        debug!(@grey, "mined in block {block}");
    }
    info!(@grey, "deployment tx hash: {}", deployment.tx_hash.debug_lavender());
    Ok(deployment)
}

fn check_chain_id(profile: &NetworkProfile, remote: u64) -> Result<(), DeploymentError> {
    if let Some(expected) = profile.chain_id() {
        if expected != remote {
            return Err(DeploymentError::ChainIdMismatch {
                network: profile.name().to_owned(),
                expected,
                actual: remote,
            });
        }
    }
    if let Some(explorer) = profile.explorer().and_then(|explorer| explorer.chain_id) {
        if explorer != remote {
            warn!(@yellow,
                "{}: explorer is registered under chain id {explorer} but the endpoint reports {remote}",
                profile.name()
            );
        }
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum DeploymentError {
    #[error("rpc error: {0}")]
    Rpc(#[from] alloy::transports::RpcError<alloy::transports::TransportErrorKind>),

    #[error("network {network} expects chain id {expected} but the endpoint reports {actual}")]
    ChainIdMismatch {
        network: String,
        expected: u64,
        actual: u64,
    },
    #[error("deploy tx {} failed to complete: {reason}", .tx_hash.debug_red())]
    FailedToComplete { tx_hash: TxHash, reason: String },
    #[error("deploy tx reverted {}", .tx_hash.debug_red())]
    Reverted { tx_hash: TxHash },
    #[error("deploy tx {} has no contract address in its receipt", .tx_hash.debug_red())]
    NoContractAddress { tx_hash: TxHash },
}
