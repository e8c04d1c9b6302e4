//! In-memory vault model.
//!
//! A decrypted [`Vault`] is exclusively owned by one command's execution:
//! loaded by the repository, mutated through the access operations, then
//! re-encrypted and written back. Plaintext values and tokens are held as
//! [`SecretString`] so they are zeroed when the command finishes.

use sealbox_core::SecretString;

/// A named secret and the services allowed to read it.
#[derive(Debug, Clone)]
pub struct SecretEntry {
    /// Unique, case-sensitive name.
    pub name: String,

    /// Decrypted value. Encrypted at rest by the repository.
    pub value: SecretString,

    /// Names of services granted access. Ordered, deduplicated on grant.
    pub access: Vec<String>,
}

/// A service that has been granted access to one or more secrets.
///
/// The token is the opaque bearer credential handed out on first grant and
/// stable for the entry's lifetime.
#[derive(Debug, Clone)]
pub struct ServiceEntry {
    /// Unique service name.
    pub name: String,

    /// Decrypted bearer token (100 hex characters).
    pub token: SecretString,
}

/// The full decrypted store: every secret and every service.
#[derive(Debug, Clone, Default)]
pub struct Vault {
    pub secrets: Vec<SecretEntry>,
    pub services: Vec<ServiceEntry>,
}

impl Vault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of the secret named `name`, if present.
    pub fn index_of_secret(&self, name: &str) -> Option<usize> {
        self.secrets.iter().position(|s| s.name == name)
    }

    /// Look up a secret by name.
    pub fn secret(&self, name: &str) -> Option<&SecretEntry> {
        self.secrets.iter().find(|s| s.name == name)
    }

    /// Look up a service by name.
    pub fn service(&self, name: &str) -> Option<&ServiceEntry> {
        self.services.iter().find(|s| s.name == name)
    }

    /// Whether a service entry with this name exists.
    pub fn has_service(&self, name: &str) -> bool {
        self.service(name).is_some()
    }
}
