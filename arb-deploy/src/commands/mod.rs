// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use crate::error::CliResult;

mod deploy;
mod networks;

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Deploy a compiled contract and print its address
    #[clap(visible_alias = "d")]
    Deploy(deploy::Args),
    /// List the known networks
    #[clap(visible_alias = "n")]
    Networks(networks::Args),
}

pub async fn exec(cmd: Command) -> CliResult {
    match cmd {
        Command::Deploy(args) => deploy::exec(args).await,
        Command::Networks(args) => networks::exec(args),
    }
}
