// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use alloy::primitives::Address;
use deploy_tools::{
    core::credential::ProcessEnv,
    ops::{self, DeployConfig},
};

use crate::{
    common_args::{ArtifactArgs, RegistryArgs},
    constants::NETWORK_ENV,
    error::CliResult,
    utils::{deployed_line, deployment_label},
};

#[derive(Debug, clap::Args)]
pub struct Args {
    /// Network to deploy to
    #[arg(long, env = NETWORK_ENV)]
    network: String,
    /// Contract to deploy, by name or as `<source>:<name>`
    #[arg(long)]
    contract: String,
    /// Label printed in front of the deployed address (defaults to the contract name)
    #[arg(long)]
    label: Option<String>,

    #[command(flatten)]
    artifacts: ArtifactArgs,
    #[command(flatten)]
    registry: RegistryArgs,
}

pub async fn exec(args: Args) -> CliResult {
    let registry = args.registry.registry()?;
    // Secrets are only read through this snapshot, never straight from the environment
    let secrets = ProcessEnv::capture(registry.credential_vars());
    let profile = registry.resolve(&args.network, &secrets)?;
    let config = DeployConfig {
        artifacts: args.artifacts.store(),
    };

    let address: Address = ops::deploy(&args.contract, &profile, &config, &secrets)
        .await
        .into_result()?;

    let label = deployment_label(args.label.as_deref(), &args.contract);
    println!("{}", deployed_line(label, address));
    Ok(())
}
