// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use deploy_tools::{core::credential::ProcessEnv, ops};

use crate::{common_args::RegistryArgs, error::CliResult, utils::print_warning};

#[derive(Debug, clap::Args)]
pub struct Args {
    #[command(flatten)]
    registry: RegistryArgs,
}

pub fn exec(args: Args) -> CliResult {
    let registry = args.registry.registry()?;
    let secrets = ProcessEnv::capture(registry.credential_vars());
    for summary in ops::summaries(&registry, &secrets) {
        println!("{summary}");
    }
    for note in registry.diagnostics() {
        print_warning(note);
    }
    Ok(())
}
