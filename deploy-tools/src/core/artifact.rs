// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Compiled contract artifacts.
//!
//! Artifacts are read from a Hardhat-style `artifacts/` directory, where each contract lives at
//! `<source>/<Contract>.json`, e.g. `artifacts/contracts/ColorClash.sol/ColorClash.json`.

use std::{
    collections::BTreeMap,
    fs,
    path::{Component, Path, PathBuf},
};

use alloy::{json_abi::JsonAbi, primitives::Bytes};
use glob::Pattern;
use serde::Deserialize;

use crate::utils::{decode0x, join_display};

/// Default artifacts directory, relative to the project root.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// A compiled contract ready to be deployed.
#[derive(Debug, Clone)]
pub struct ContractArtifact {
    pub contract_name: String,
    pub source_name: String,
    pub abi: JsonAbi,
    /// Creation bytecode.
    pub bytecode: Bytes,
}

impl ContractArtifact {
    /// Fully qualified name, e.g. `contracts/ColorClash.sol:ColorClash`.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&text).map_err(|err| match err {
            ArtifactError::Parse { source, .. } => ArtifactError::Parse {
                path: Some(path.to_owned()),
                source,
            },
            other => other,
        })
    }

    /// Parses and validates a Hardhat artifact.
    pub fn from_json(text: &str) -> Result<Self, ArtifactError> {
        let raw: HardhatArtifact =
            serde_json::from_str(text).map_err(|source| ArtifactError::Parse {
                path: None,
                source,
            })?;

        // Unlinked bytecode carries `__$...$__` placeholders and is not valid hex
        let libraries: Vec<_> = raw
            .link_references
            .iter()
            .flat_map(|(source, libs)| libs.keys().map(move |lib| format!("{source}:{lib}")))
            .collect();
        if !libraries.is_empty() {
            return Err(ArtifactError::UnlinkedLibraries {
                contract: raw.contract_name,
                libraries: join_display(libraries),
            });
        }

        let bytecode = decode0x(&raw.bytecode).map_err(|err| ArtifactError::InvalidBytecode {
            contract: raw.contract_name.clone(),
            reason: err.to_string(),
        })?;
        if bytecode.is_empty() {
            return Err(ArtifactError::NotDeployable {
                contract: raw.contract_name,
            });
        }

        if let Some(constructor) = &raw.abi.constructor {
            if !constructor.inputs.is_empty() {
                return Err(ArtifactError::ConstructorArguments {
                    contract: raw.contract_name,
                    count: constructor.inputs.len(),
                });
            }
        }

        Ok(Self {
            contract_name: raw.contract_name,
            source_name: raw.source_name,
            abi: raw.abi,
            bytecode: bytecode.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    contract_name: String,
    source_name: String,
    #[serde(default)]
    abi: JsonAbi,
    bytecode: String,
    #[serde(default)]
    link_references: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

/// Looks up artifacts by contract name.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Loads an artifact by bare (`ColorClash`) or fully qualified
    /// (`contracts/ColorClash.sol:ColorClash`) name.
    pub fn load(&self, name: &str) -> Result<ContractArtifact, ArtifactError> {
        let path = self.locate(name)?;
        debug!(@grey, "reading artifact {}", path.display());
        ContractArtifact::from_file(path)
    }

    fn locate(&self, name: &str) -> Result<PathBuf, ArtifactError> {
        let not_found = || ArtifactError::NotFound {
            name: name.to_owned(),
            root: self.root.clone(),
        };

        if let Some((source, contract)) = name.rsplit_once(':') {
            if !is_source_name(source) || !is_contract_name(contract) {
                return Err(ArtifactError::InvalidName(name.to_owned()));
            }
            let path = self.root.join(source).join(format!("{contract}.json"));
            return if path.is_file() {
                Ok(path)
            } else {
                Err(not_found())
            };
        }

        if !is_contract_name(name) {
            return Err(ArtifactError::InvalidName(name.to_owned()));
        }
        let pattern = format!(
            "{}/**/{name}.json",
            Pattern::escape(&self.root.to_string_lossy())
        );
        let mut matches: Vec<PathBuf> = glob::glob(&pattern)
            .map_err(|err| ArtifactError::InvalidName(format!("{name}: {err}")))?
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .collect();

        match matches.len() {
            0 => Err(not_found()),
            1 => Ok(matches.remove(0)),
            _ => {
                matches.sort();
                let candidates = matches.iter().map(|path| self.qualified_name_of(path, name));
                Err(ArtifactError::Ambiguous {
                    name: name.to_owned(),
                    candidates: join_display(candidates),
                })
            }
        }
    }

    fn qualified_name_of(&self, path: &Path, contract: &str) -> String {
        let source = path
            .parent()
            .and_then(|dir| dir.strip_prefix(&self.root).ok())
            .unwrap_or(path);
        format!("{}:{contract}", source.display())
    }
}

/// A relative source path that stays under the artifacts directory.
fn is_source_name(source: &str) -> bool {
    let mut components = Path::new(source).components().peekable();
    components.peek().is_some()
        && components.all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

fn is_contract_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("invalid contract name: {0}")]
    InvalidName(String),
    #[error("no artifact for contract {name} under {}", .root.display())]
    NotFound { name: String, root: PathBuf },
    #[error("contract name {name} is ambiguous, use one of: {candidates}")]
    Ambiguous { name: String, candidates: String },
    #[error("failed to read artifact {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse artifact{}: {source}", .path.as_ref().map(|p| format!(" {}", p.display())).unwrap_or_default())]
    Parse {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    #[error("contract {contract} has invalid bytecode: {reason}")]
    InvalidBytecode { contract: String, reason: String },
    #[error("contract {contract} needs linked libraries: {libraries}")]
    UnlinkedLibraries { contract: String, libraries: String },
    #[error("contract {contract} has no creation bytecode (is it abstract or an interface?)")]
    NotDeployable { contract: String },
    #[error("contract {contract} has a constructor taking {count} argument(s), which is not supported")]
    ConstructorArguments { contract: String, count: usize },
}
