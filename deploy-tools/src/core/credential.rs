// Copyright 2025, Offchain Labs, Inc.
// For licensing, see https://github.com/OffchainLabs/stylus-sdk-rs/blob/main/licenses/COPYRIGHT.md

//! Signing credentials.
//!
//! Network profiles only ever carry a [`CredentialRef`], the name of the variable holding a
//! secret. The secret itself is looked up from a [`SecretSource`] right before it is needed and
//! lives in a [`SecretString`], which is zeroed when dropped and never printed.

use std::{collections::HashMap, env, fmt};

use alloy::{primitives::B256, signers::local::PrivateKeySigner};
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, Zeroizing};

use crate::utils::decode0x;

/// Length of a secp256k1 private key.
const KEY_LENGTH: usize = 32;

/// Where secrets are read from.
///
/// The source is created once at startup and handed to whatever needs a secret, so nothing
/// reads the environment ad hoc.
pub trait SecretSource {
    fn lookup(&self, name: &str) -> Option<SecretString>;
}

/// Snapshot of secret variables taken from the process environment.
///
/// Variables are read exactly once, in [`ProcessEnv::capture`]. Later changes to the
/// environment are not observed.
#[derive(Debug, Default)]
pub struct ProcessEnv {
    vars: HashMap<String, SecretString>,
}

impl ProcessEnv {
    /// Reads the named variables. Variables that are unset or not valid unicode are left out.
    pub fn capture<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let vars = names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let value = env::var(name).ok()?;
                Some((name.to_owned(), SecretString::new(value)))
            })
            .collect();
        Self { vars }
    }
}

impl SecretSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<SecretString> {
        self.vars.get(name).cloned()
    }
}

impl SecretSource for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<SecretString> {
        self.get(name).map(|value| SecretString::new(value.as_str()))
    }
}

/// A secret value, zeroed on drop.
#[derive(Clone)]
pub struct SecretString(Zeroizing<String>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the secret is empty once surrounding whitespace is ignored.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

/// Reference to a secret held in an environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialRef {
    var: String,
}

impl CredentialRef {
    pub fn env(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }

    /// Name of the variable holding the secret.
    pub fn var(&self) -> &str {
        &self.var
    }

    /// Whether the variable resolves to a non-empty secret. The secret is dropped immediately.
    pub fn is_available(&self, source: &impl SecretSource) -> bool {
        self.acquire(source).is_ok()
    }

    /// Looks up the secret, rejecting absent and blank values.
    pub fn acquire(&self, source: &impl SecretSource) -> Result<SecretString, CredentialError> {
        let secret = source
            .lookup(&self.var)
            .ok_or_else(|| CredentialError::Missing {
                var: self.var.clone(),
            })?;
        if secret.is_blank() {
            return Err(CredentialError::Empty {
                var: self.var.clone(),
            });
        }
        Ok(secret)
    }

    /// Acquires the secret and turns it into a local signer.
    ///
    /// The secret only lives for the duration of this call.
    pub fn signer(&self, source: &impl SecretSource) -> Result<PrivateKeySigner, CredentialError> {
        let secret = self.acquire(source)?;
        signer_from_secret(&self.var, &secret)
    }
}

impl fmt::Display for CredentialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.var)
    }
}

/// Parses a hex encoded secp256k1 private key, with or without a `0x` prefix.
pub fn signer_from_secret(
    var: &str,
    secret: &SecretString,
) -> Result<PrivateKeySigner, CredentialError> {
    let invalid = |reason: String| CredentialError::InvalidSigningKey {
        var: var.to_owned(),
        reason,
    };

    // The decode error may quote a character of the key, so it is not forwarded
    let bytes = Zeroizing::new(
        decode0x(secret.expose()).map_err(|_| invalid("not valid hex".to_owned()))?,
    );
    if bytes.len() != KEY_LENGTH {
        return Err(invalid(format!(
            "expected {KEY_LENGTH} bytes, got {}",
            bytes.len()
        )));
    }

    let mut key = B256::from_slice(&bytes);
    let signer = PrivateKeySigner::from_bytes(&key);
    key.0.zeroize();
    signer.map_err(|_| invalid("not a valid secp256k1 private key".to_owned()))
}

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("credential variable {var} is not set")]
    Missing { var: String },
    #[error("credential variable {var} is empty")]
    Empty { var: String },
    #[error("credential variable {var} does not hold a usable signing key: {reason}")]
    InvalidSigningKey { var: String, reason: String },
}
