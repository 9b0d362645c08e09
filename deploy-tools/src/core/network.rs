// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Network configuration registry.
//!
//! Maps a network name to the endpoint, chain id, signing credential and block explorer used to
//! deploy to it. The registry starts from the built-in Arbitrum networks and can be extended or
//! overridden by a TOML networks file:
//!
//! ```toml
//! [networks.localNitro]
//! url = "http://localhost:8547"
//! chain-id = 412346
//! credential = "DEVNET_KEY"
//!
//! [networks.localNitro.explorer]
//! api-url = "http://localhost:4000/api"
//! browser-url = "http://localhost:4000"
//! ```

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{
    core::credential::{CredentialError, CredentialRef, SecretSource},
    utils::join_display,
};

/// Variable holding the signing key used on test networks.
pub const WALLET_KEY_VAR: &str = "WALLET_KEY";
/// Variable holding the signing key used on Arbitrum One.
pub const MAINNET_KEY_VAR: &str = "MAINNET_KEY";
/// Variable holding the Arbiscan API key.
pub const EXPLORER_API_KEY_VAR: &str = "ARBISCAN_API_KEY";

pub const ARBITRUM_GOERLI: &str = "arbitrumGoerli";
pub const ARBITRUM_ONE: &str = "arbitrumOne";
pub const ARBITRUM_SEPOLIA: &str = "arbitrumSepolia";

/// Block explorer endpoints for a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ExplorerEndpoints {
    /// Chain id the explorer is registered under. May disagree with the network's own.
    #[serde(default)]
    pub chain_id: Option<u64>,
    pub api_url: String,
    pub browser_url: String,
    #[serde(default)]
    pub api_key: Option<CredentialRef>,
}

impl ExplorerEndpoints {
    /// Link to an address on the explorer's web interface.
    pub fn address_url(&self, address: Address) -> String {
        format!(
            "{}/address/{address}",
            self.browser_url.trim_end_matches('/')
        )
    }
}

/// Everything needed to talk to one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    name: String,
    rpc_url: String,
    chain_id: Option<u64>,
    credential: CredentialRef,
    explorer: Option<ExplorerEndpoints>,
}

impl NetworkProfile {
    pub fn new(
        name: impl Into<String>,
        rpc_url: impl Into<String>,
        chain_id: Option<u64>,
        credential: CredentialRef,
        explorer: Option<ExplorerEndpoints>,
    ) -> Self {
        Self {
            name: name.into(),
            rpc_url: rpc_url.into(),
            chain_id,
            credential,
            explorer,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Chain id declared for the network itself, if any.
    pub fn chain_id(&self) -> Option<u64> {
        self.chain_id
    }

    pub fn credential(&self) -> &CredentialRef {
        &self.credential
    }

    pub fn explorer(&self) -> Option<&ExplorerEndpoints> {
        self.explorer.as_ref()
    }

    /// Returns `(network, explorer)` chain ids when both are declared and differ.
    pub fn chain_id_conflict(&self) -> Option<(u64, u64)> {
        let network = self.chain_id?;
        let explorer = self.explorer.as_ref()?.chain_id?;
        (network != explorer).then_some((network, explorer))
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct NetworksFile {
    #[serde(default)]
    networks: BTreeMap<String, NetworkEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct NetworkEntry {
    url: String,
    #[serde(default)]
    chain_id: Option<u64>,
    credential: CredentialRef,
    #[serde(default)]
    explorer: Option<ExplorerEndpoints>,
}

/// Network name to profile mapping, consulted once at startup.
#[derive(Debug, Clone, Default)]
pub struct NetworkRegistry {
    profiles: BTreeMap<String, NetworkProfile>,
}

impl NetworkRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the built-in Arbitrum networks.
    pub fn builtin() -> Self {
        let arbiscan_key = || Some(CredentialRef::env(EXPLORER_API_KEY_VAR));
        let mut registry = Self::empty();
        registry.insert(NetworkProfile::new(
            ARBITRUM_GOERLI,
            "https://goerli-rollup.arbitrum.io/rpc",
            Some(421613),
            CredentialRef::env(WALLET_KEY_VAR),
            Some(ExplorerEndpoints {
                chain_id: Some(421613),
                api_url: "https://api-goerli.arbiscan.io/api".to_owned(),
                browser_url: "https://goerli.arbiscan.io/".to_owned(),
                api_key: arbiscan_key(),
            }),
        ));
        registry.insert(NetworkProfile::new(
            ARBITRUM_ONE,
            "https://arb1.arbitrum.io/rpc",
            None,
            CredentialRef::env(MAINNET_KEY_VAR),
            Some(ExplorerEndpoints {
                chain_id: Some(42161),
                api_url: "https://api.arbiscan.io/api".to_owned(),
                browser_url: "https://arbiscan.io/".to_owned(),
                api_key: arbiscan_key(),
            }),
        ));
        // The explorer entry is kept exactly as registered, basescan URLs included. It declares
        // chain id 421611, which disagrees with the 421613 used for the Goerli rollup.
        registry.insert(NetworkProfile::new(
            ARBITRUM_SEPOLIA,
            "https://sepolia-rollup.arbitrum.io/rpc",
            None,
            CredentialRef::env(WALLET_KEY_VAR),
            Some(ExplorerEndpoints {
                chain_id: Some(421611),
                api_url: "https://api-sepolia.basescan.org/api".to_owned(),
                browser_url: "https://sepolia.basescan.org".to_owned(),
                api_key: arbiscan_key(),
            }),
        ));
        registry
    }

    /// Adds a profile, replacing any existing profile with the same name.
    pub fn insert(&mut self, profile: NetworkProfile) -> Option<NetworkProfile> {
        self.profiles.insert(profile.name.clone(), profile)
    }

    /// Parses a networks file and merges it over this registry.
    pub fn merge_toml(&mut self, text: &str) -> Result<(), ConfigurationError> {
        self.merge_file_contents(text, None)
    }

    /// Reads a networks file and merges it over this registry.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigurationError::ReadFile {
            path: path.to_owned(),
            source,
        })?;
        self.merge_file_contents(&text, Some(path))?;
        debug!(@grey, "loaded networks file {}", path.display());
        Ok(self)
    }

    fn merge_file_contents(
        &mut self,
        text: &str,
        path: Option<&Path>,
    ) -> Result<(), ConfigurationError> {
        let file: NetworksFile =
            toml::from_str(text).map_err(|source| ConfigurationError::ParseFile {
                path: path.map(Path::to_owned),
                source,
            })?;
        // Every entry is checked before any of them is merged
        if let Some((name, entry)) = file
            .networks
            .iter()
            .find(|(_, entry)| !is_rpc_url(&entry.url))
        {
            return Err(ConfigurationError::InvalidRpcUrl {
                network: name.clone(),
                url: entry.url.clone(),
            });
        }
        for (name, entry) in file.networks {
            if self
                .insert(NetworkProfile::new(
                    name.clone(),
                    entry.url,
                    entry.chain_id,
                    entry.credential,
                    entry.explorer,
                ))
                .is_some()
            {
                debug!(@grey, "networks file overrides {name}");
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&NetworkProfile> {
        self.profiles.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkProfile> {
        self.profiles.values()
    }

    /// Names of the variables holding signing keys for any registered network.
    pub fn credential_vars(&self) -> BTreeSet<&str> {
        self.iter().map(|profile| profile.credential.var()).collect()
    }

    /// Looks up a network and checks that it can be deployed to.
    ///
    /// Fails if the name is unknown, if the network and its explorer declare different chain
    /// ids, or if the signing credential is absent or empty. The secret itself is dropped before
    /// returning.
    pub fn resolve(
        &self,
        name: &str,
        secrets: &impl SecretSource,
    ) -> Result<NetworkProfile, ConfigurationError> {
        let profile = self
            .get(name)
            .ok_or_else(|| ConfigurationError::UnknownNetwork {
                name: name.to_owned(),
                known: join_display(self.names()),
            })?;

        if let Some((network_chain_id, explorer_chain_id)) = profile.chain_id_conflict() {
            return Err(ConfigurationError::ConflictingChainIds {
                network: profile.name.clone(),
                network_chain_id,
                explorer_chain_id,
            });
        }

        profile
            .credential
            .acquire(secrets)
            .map_err(|source| ConfigurationError::Credential {
                network: profile.name.clone(),
                source,
            })?;

        Ok(profile.clone())
    }

    /// Warnings about suspicious entries, for display to the operator.
    pub fn diagnostics(&self) -> Vec<String> {
        let mut notes = Vec::new();
        for profile in self.iter() {
            let name = &profile.name;
            if let Some((network, explorer)) = profile.chain_id_conflict() {
                notes.push(format!(
                    "{name}: network declares chain id {network} but its explorer declares {explorer}"
                ));
            }
            match (profile.chain_id, profile.explorer.as_ref()) {
                (None, Some(ExplorerEndpoints { chain_id: Some(explorer), .. })) => {
                    notes.push(format!(
                        "{name}: no chain id declared for the network; its explorer is registered under {explorer}"
                    ));
                }
                (None, _) => notes.push(format!("{name}: no chain id declared")),
                _ => {}
            }
            if let Some(explorer) = &profile.explorer {
                if explorer.api_key.is_none() {
                    notes.push(format!("{name}: explorer has no API key variable"));
                }
            }
        }
        notes
    }
}

/// Only HTTP transports are enabled.
fn is_rpc_url(url: &str) -> bool {
    ["http://", "https://"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("unknown network {name} (known networks: {known})")]
    UnknownNetwork { name: String, known: String },
    #[error("network {network}: {source}")]
    Credential {
        network: String,
        source: CredentialError,
    },
    #[error(
        "network {network} declares chain id {network_chain_id} but its explorer declares {explorer_chain_id}"
    )]
    ConflictingChainIds {
        network: String,
        network_chain_id: u64,
        explorer_chain_id: u64,
    },
    #[error("network {network} has an unsupported rpc url: {url}")]
    InvalidRpcUrl { network: String, url: String },
    #[error("failed to read networks file {}: {source}", .path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse networks file{}: {source}", .path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
    ParseFile {
        path: Option<PathBuf>,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn secrets(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn builtin_chain_ids() {
        let registry = NetworkRegistry::builtin();
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            [ARBITRUM_GOERLI, ARBITRUM_ONE, ARBITRUM_SEPOLIA]
        );

        let goerli = registry.get(ARBITRUM_GOERLI).unwrap();
        assert_eq!(goerli.chain_id(), Some(421613));
        assert_eq!(goerli.explorer().unwrap().chain_id, Some(421613));

        let one = registry.get(ARBITRUM_ONE).unwrap();
        assert_eq!(one.chain_id(), None);
        assert_eq!(one.credential().var(), MAINNET_KEY_VAR);

        // Left as registered: the network itself has no chain id and the explorer says 421611
        let sepolia = registry.get(ARBITRUM_SEPOLIA).unwrap();
        assert_eq!(sepolia.chain_id(), None);
        assert_eq!(sepolia.explorer().unwrap().chain_id, Some(421611));
        assert_eq!(sepolia.credential().var(), WALLET_KEY_VAR);
    }

    #[test]
    fn resolve_known_network() {
        let registry = NetworkRegistry::builtin();
        let profile = registry
            .resolve(ARBITRUM_GOERLI, &secrets(&[(WALLET_KEY_VAR, "0x01")]))
            .unwrap();
        assert_eq!(profile.rpc_url(), "https://goerli-rollup.arbitrum.io/rpc");
    }

    #[test]
    fn resolve_unknown_network() {
        let registry = NetworkRegistry::builtin();
        let err = registry
            .resolve("hardhat", &secrets(&[(WALLET_KEY_VAR, "0x01")]))
            .unwrap_err();
        assert!(matches!(err, ConfigurationError::UnknownNetwork { .. }));
        assert!(err.to_string().contains(ARBITRUM_SEPOLIA));
    }

    #[test]
    fn resolve_requires_credential() {
        let registry = NetworkRegistry::builtin();
        let err = registry
            .resolve(ARBITRUM_ONE, &secrets(&[(WALLET_KEY_VAR, "0x01")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::Credential {
                source: CredentialError::Missing { .. },
                ..
            }
        ));

        let err = registry
            .resolve(ARBITRUM_ONE, &secrets(&[(MAINNET_KEY_VAR, "")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::Credential {
                source: CredentialError::Empty { .. },
                ..
            }
        ));
    }

    #[test]
    fn resolve_never_leaks_secret() {
        let registry = NetworkRegistry::builtin();
        let profile = registry
            .resolve(ARBITRUM_SEPOLIA, &secrets(&[(WALLET_KEY_VAR, "hunter2")]))
            .unwrap();
        assert!(!format!("{profile:?}").contains("hunter2"));
    }

    #[test]
    fn file_overrides_and_extends() {
        let mut registry = NetworkRegistry::builtin();
        registry
            .merge_toml(
                r#"
                [networks.arbitrumSepolia]
                url = "https://sepolia-rollup.arbitrum.io/rpc"
                chain-id = 421614
                credential = "SEPOLIA_KEY"

                [networks.localNitro]
                url = "http://localhost:8547"
                chain-id = 412346
                credential = "DEVNET_KEY"

                [networks.localNitro.explorer]
                api-url = "http://localhost:4000/api"
                browser-url = "http://localhost:4000/"
                "#,
            )
            .unwrap();

        let sepolia = registry.get(ARBITRUM_SEPOLIA).unwrap();
        assert_eq!(sepolia.chain_id(), Some(421614));
        assert_eq!(sepolia.credential().var(), "SEPOLIA_KEY");
        assert!(sepolia.explorer().is_none());

        let local = registry.get("localNitro").unwrap();
        let explorer = local.explorer().unwrap();
        assert_eq!(
            explorer.address_url(Address::ZERO),
            format!("http://localhost:4000/address/{}", Address::ZERO)
        );
        assert!(registry
            .diagnostics()
            .iter()
            .any(|note| note.starts_with("localNitro: explorer has no API key")));
    }

    #[test]
    fn conflicting_chain_ids_are_rejected() {
        let mut registry = NetworkRegistry::empty();
        registry
            .merge_toml(
                r#"
                [networks.arbitrumSepolia]
                url = "https://sepolia-rollup.arbitrum.io/rpc"
                chain-id = 421613
                credential = "WALLET_KEY"

                [networks.arbitrumSepolia.explorer]
                chain-id = 421611
                api-url = "https://api-sepolia.basescan.org/api"
                browser-url = "https://sepolia.basescan.org"
                "#,
            )
            .unwrap();

        let profile = registry.get(ARBITRUM_SEPOLIA).unwrap();
        assert_eq!(profile.chain_id_conflict(), Some((421613, 421611)));
        assert!(registry
            .diagnostics()
            .iter()
            .any(|note| note.contains("421613") && note.contains("421611")));

        let err = registry
            .resolve(ARBITRUM_SEPOLIA, &secrets(&[(WALLET_KEY_VAR, "0x01")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::ConflictingChainIds {
                network_chain_id: 421613,
                explorer_chain_id: 421611,
                ..
            }
        ));
    }

    #[test]
    fn invalid_files() {
        let mut registry = NetworkRegistry::empty();
        assert!(matches!(
            registry.merge_toml("[networks.x]\nurl = \"http://a\"\n"),
            Err(ConfigurationError::ParseFile { .. })
        ));
        assert!(matches!(
            registry.merge_toml(
                "[networks.x]\nurl = \"http://a\"\ncredential = \"K\"\naccounts = [\"0x1\"]\n"
            ),
            Err(ConfigurationError::ParseFile { .. })
        ));
        assert!(matches!(
            registry.merge_toml("[networks.x]\nurl = \"ftp://a\"\ncredential = \"K\"\n"),
            Err(ConfigurationError::InvalidRpcUrl { .. })
        ));
        assert!(matches!(
            NetworkRegistry::empty().with_file("/nonexistent/networks.toml"),
            Err(ConfigurationError::ReadFile { .. })
        ));
    }

    #[test]
    fn rejected_file_leaves_registry_untouched() {
        let mut registry = NetworkRegistry::builtin();
        let err = registry
            .merge_toml(
                r#"
                [networks.aaa]
                url = "http://localhost:8547"
                credential = "WALLET_KEY"

                [networks.arbitrumOne]
                url = "http://localhost:8548"
                credential = "MAINNET_KEY"

                [networks.zzz]
                url = "ws://localhost:8546"
                credential = "WALLET_KEY"
                "#,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidRpcUrl { ref network, .. } if network == "zzz"
        ));
        assert_eq!(registry.names().count(), 3);
        assert!(registry.get("aaa").is_none());
        assert_eq!(
            registry.get(ARBITRUM_ONE).unwrap().rpc_url(),
            "https://arb1.arbitrum.io/rpc"
        );
    }

    #[test]
    fn credential_vars_are_deduplicated() {
        let registry = NetworkRegistry::builtin();
        let vars = registry.credential_vars();
        assert_eq!(
            vars.into_iter().collect::<Vec<_>>(),
            [MAINNET_KEY_VAR, WALLET_KEY_VAR]
        );
    }

    #[test]
    fn builtin_diagnostics_flag_missing_chain_ids() {
        let notes = NetworkRegistry::builtin().diagnostics();
        assert!(notes
            .iter()
            .any(|note| note.starts_with(ARBITRUM_SEPOLIA) && note.contains("421611")));
        assert!(!notes.iter().any(|note| note.starts_with(ARBITRUM_GOERLI)));
    }
}
