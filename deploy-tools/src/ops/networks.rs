// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Network listing.

use std::fmt;

use crate::core::{
    credential::SecretSource,
    network::{NetworkProfile, NetworkRegistry},
};

/// Printable view of a network profile. Holds no secret values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkSummary {
    pub name: String,
    pub rpc_url: String,
    pub chain_id: Option<u64>,
    pub credential_var: String,
    pub credential_set: bool,
    pub explorer: Option<String>,
    pub explorer_chain_id: Option<u64>,
}

impl NetworkSummary {
    fn new(profile: &NetworkProfile, secrets: &impl SecretSource) -> Self {
        Self {
            name: profile.name().to_owned(),
            rpc_url: profile.rpc_url().to_owned(),
            chain_id: profile.chain_id(),
            credential_var: profile.credential().var().to_owned(),
            credential_set: profile.credential().is_available(secrets),
            explorer: profile.explorer().map(|e| e.browser_url.clone()),
            explorer_chain_id: profile.explorer().and_then(|e| e.chain_id),
        }
    }
}

impl fmt::Display for NetworkSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unset = "-".to_owned();
        let chain_id = self.chain_id.map(|id| id.to_string()).unwrap_or(unset.clone());
        let status = if self.credential_set { "set" } else { "missing" };
        write!(
            f,
            "{}\n  rpc:        {}\n  chain id:   {chain_id}\n  credential: ${} ({status})",
            self.name, self.rpc_url, self.credential_var
        )?;
        if let Some(explorer) = &self.explorer {
            let explorer_chain_id = self
                .explorer_chain_id
                .map(|id| id.to_string())
                .unwrap_or(unset);
            write!(f, "\n  explorer:   {explorer} (chain id {explorer_chain_id})")?;
        }
        Ok(())
    }
}

/// Summaries of every registered network, sorted by name.
pub fn summaries(registry: &NetworkRegistry, secrets: &impl SecretSource) -> Vec<NetworkSummary> {
    registry
        .iter()
        .map(|profile| NetworkSummary::new(profile, secrets))
        .collect()
}
