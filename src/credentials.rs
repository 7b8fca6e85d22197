//! # Credential Key Chain
//!
//! Associates credentials (passwords, recovery keys) with a [`PathSpec`]
//! subtree, keyed by its [`Fingerprint`]. Consulted by backends during
//! `FileSystem::open` / `FileObject::open` for encrypted containers.
//!
//! ## Quick Example
//!
//! ```rust
//! use vfscore::credentials::{KeyChain, CredentialName, CredentialValue};
//! use vfscore::path_spec::PathSpec;
//! use vfscore::registry::TypeRegistry;
//!
//! let registry = TypeRegistry::global();
//! let chain = KeyChain::new();
//! let spec = PathSpec::fake("/images/apfs.raw");
//! // TYPE_FAKE declares no accepted credentials, so this is rejected:
//! assert!(
//!     chain
//!         .set_credential(registry, &spec, CredentialName::Password, CredentialValue::from("x"))
//!         .is_err()
//! );
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::VfsError;
use crate::path_spec::{Fingerprint, PathSpec};
use crate::registry::TypeRegistry;

/// A credential kind a backend may accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialName {
    /// A plaintext password.
    Password,
    /// A recovery password (BitLocker, FileVault).
    RecoveryPassword,
    /// A startup key (BitLocker).
    StartupKey,
    /// Raw key material.
    KeyData,
}

impl CredentialName {
    /// The canonical name string, matching the attribute names spec.md
    /// declares at minimum.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::RecoveryPassword => "recovery_password",
            Self::StartupKey => "startup_key",
            Self::KeyData => "key_data",
        }
    }
}

/// A credential value.
///
/// Wraps raw bytes and never prints its contents via `Debug`, so a
/// credential can never leak into a log line or error message by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialValue(Box<[u8]>);

impl CredentialValue {
    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for CredentialValue {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().into())
    }
}

impl From<String> for CredentialValue {
    fn from(s: String) -> Self {
        Self(s.into_bytes().into_boxed_slice())
    }
}

impl From<Vec<u8>> for CredentialValue {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into_boxed_slice())
    }
}

impl std::fmt::Debug for CredentialValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CredentialValue").field(&"<redacted>").finish()
    }
}

/// Process-wide (or per-caller, if constructed explicitly) store of
/// credentials keyed by path-spec fingerprint.
///
/// Prefer threading an explicit `KeyChain` through the resolver calls that
/// need it; [`KeyChain::global`] exists only for CLI-style convenience.
#[derive(Default)]
pub struct KeyChain {
    entries: RwLock<HashMap<Fingerprint, HashMap<CredentialName, CredentialValue>>>,
}

impl KeyChain {
    /// Construct an empty key chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide default key chain.
    pub fn global() -> &'static KeyChain {
        static GLOBAL: std::sync::OnceLock<KeyChain> = std::sync::OnceLock::new();
        GLOBAL.get_or_init(KeyChain::new)
    }

    /// Store a credential for the subtree rooted at `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`VfsError::Credential`] if `name` is not in the accepted
    /// credential set `registry` has on file for `spec`'s type indicator —
    /// storing an unknown credential name for a type is an error, not a
    /// silent no-op.
    pub fn set_credential(
        &self,
        registry: &TypeRegistry,
        spec: &PathSpec,
        name: CredentialName,
        value: CredentialValue,
    ) -> Result<(), VfsError> {
        let factory = registry.lookup(spec.type_indicator())?;
        if !factory.accepted_credentials.contains(&name) {
            return Err(VfsError::Credential {
                reason: format!(
                    "{} does not accept credential {name:?}",
                    spec.type_indicator()
                ),
            });
        }
        let mut entries = self
            .entries
            .write()
            .map_err(|_| VfsError::Credential {
                reason: "key chain lock poisoned".into(),
            })?;
        entries
            .entry(spec.comparable())
            .or_default()
            .insert(name, value);
        Ok(())
    }

    /// Look up a credential previously stored for `fingerprint`.
    pub fn get_credential(
        &self,
        fingerprint: &Fingerprint,
        name: CredentialName,
    ) -> Option<CredentialValue> {
        let entries = self.entries.read().ok()?;
        entries.get(fingerprint)?.get(&name).cloned()
    }

    /// Remove every credential associated with `fingerprint`.
    pub fn clear(&self, fingerprint: &Fingerprint) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(fingerprint);
        }
    }
}
