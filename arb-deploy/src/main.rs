// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! CLI for `arb-deploy`.

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

mod commands;
mod common_args;
mod constants;
mod error;
mod utils;

#[derive(Debug, Parser)]
#[command(name = "arb-deploy")]
#[command(author = "Offchain Labs, Inc.")]
#[command(about = "Deploy compiled contracts to Arbitrum chains", long_about = None)]
#[command(propagate_version = true)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: commands::Command,

    /// Whether to print debug info.
    #[arg(long, global = true)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // Dependencies only get to report warnings
    SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .with_module_level("arb_deploy", log_level)
        .with_module_level("deploy_tools", log_level)
        .without_timestamps()
        .init()
        .expect("setting up logger");

    // Build async runtime and block on command execution
    let result = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(Into::into)
        .and_then(|rt| rt.block_on(commands::exec(args.command)));

    // Report any error and return proper exit code
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            utils::print_error(&err);
            err.exit_code()
        }
    }
}
