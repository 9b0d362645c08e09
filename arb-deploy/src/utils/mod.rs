// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

use std::fmt::Display;

use alloy::primitives::Address;
use style::{BOLD, ERROR, WARNING};

mod style;

pub fn print_error(err: impl Display) {
    eprintln!("{ERROR}error{ERROR:#}{BOLD}:{BOLD:#} {err}");
}

pub fn print_warning(msg: impl Display) {
    eprintln!("{WARNING}warning{WARNING:#}{BOLD}:{BOLD:#} {msg}");
}

/// Label printed in front of the deployed address.
///
/// Defaults to the contract name, without its source path when fully qualified.
pub fn deployment_label<'a>(label: Option<&'a str>, contract: &'a str) -> &'a str {
    label.unwrap_or_else(|| {
        contract
            .rsplit_once(':')
            .map(|(_, name)| name)
            .unwrap_or(contract)
    })
}

/// The single line printed on a successful deployment.
pub fn deployed_line(label: &str, address: Address) -> String {
    format!("{label} Contract Deployed at {address}")
}
