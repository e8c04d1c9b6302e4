//! On-disk vault persistence.
//!
//! The vault is one JSON document, pretty-printed so it diffs cleanly under
//! version control. Names and access lists are plaintext; secret values,
//! service tokens, and the checksum are base64-encoded `nonce || ciphertext`
//! blobs, each sealed independently under the passphrase-derived key.
//!
//! The checksum field holds [`CHECKSUM_PHRASE`] encrypted under the current
//! passphrase. It exists purely so a load can detect a wrong passphrase
//! without touching any real secret.
//!
//! Saves overwrite the file in full, with no write-to-temp-then-rename: a
//! crash mid-write can corrupt the file, and nothing guards against two
//! processes racing on the same path (last writer wins). Both are known
//! limitations of the format.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::RngCore;
use sealbox_core::SecretString;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::crypto::{self, KEY_SIZE};
use crate::error::{Result, VaultError};
use crate::model::{SecretEntry, ServiceEntry, Vault};

/// Fixed plaintext whose successful decryption proves the passphrase.
pub const CHECKSUM_PHRASE: &[u8] = b"checksumToEnsureThatThePassPhraseIsAlwaysTheSame";

/// On-disk record for a single secret.
#[derive(Debug, Serialize, Deserialize)]
struct SecretRecord {
    #[serde(rename = "Name")]
    name: String,
    /// Encrypted value, base64-encoded.
    #[serde(rename = "Secret")]
    secret: String,
    #[serde(rename = "Access", default)]
    access: Vec<String>,
}

/// On-disk record for a service grant.
#[derive(Debug, Serialize, Deserialize)]
struct ServiceRecord {
    #[serde(rename = "Name")]
    name: String,
    /// Encrypted token, base64-encoded.
    #[serde(rename = "Secret")]
    secret: String,
}

/// The full on-disk document.
#[derive(Debug, Serialize, Deserialize)]
struct VaultDocument {
    #[serde(rename = "Secrets", default)]
    secrets: Vec<SecretRecord>,
    #[serde(rename = "Checksum")]
    checksum: String,
    #[serde(rename = "Services", default)]
    services: Vec<ServiceRecord>,
}

/// File-backed repository for one vault.
///
/// Holds only the path; the passphrase is supplied per operation so a
/// caller can load under one passphrase and save under another (passphrase
/// rotation).
pub struct VaultRepository {
    path: PathBuf,
}

impl VaultRepository {
    /// Create a repository for the vault file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The vault file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the vault file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the vault, bootstrapping an empty one if the file is missing.
    ///
    /// Bootstrap is the only implicit write on this read path: a fresh
    /// vault holding just the encrypted checksum is persisted before being
    /// returned. Any decryption failure discards the partially decrypted
    /// store wholesale.
    pub fn load_or_create(&self, passphrase: &str, rng: &mut dyn RngCore) -> Result<Vault> {
        require_passphrase(passphrase)?;

        if !self.path.exists() {
            debug!(path = %self.path.display(), "vault file missing, bootstrapping");
            let vault = Vault::new();
            self.save(&vault, passphrase, rng)?;
            return Ok(vault);
        }

        debug!(path = %self.path.display(), "loading vault");
        let data = std::fs::read_to_string(&self.path)?;
        let doc: VaultDocument = serde_json::from_str(&data)
            .map_err(|e| VaultError::CorruptData(format!("malformed vault file: {e}")))?;

        let key = crypto::derive_key(passphrase);

        // Verify the passphrase against the checksum before decrypting
        // anything else.
        let checksum = crypto::decrypt(&key, &decode_blob(&doc.checksum)?)?;
        verify_checksum(&checksum, CHECKSUM_PHRASE)?;

        let mut vault = Vault::new();
        for record in doc.secrets {
            let value = decrypt_text(&key, &record.secret)?;
            vault.secrets.push(SecretEntry {
                name: record.name,
                value,
                access: record.access,
            });
        }
        for record in doc.services {
            let token = decrypt_text(&key, &record.secret)?;
            vault.services.push(ServiceEntry {
                name: record.name,
                token,
            });
        }

        Ok(vault)
    }

    /// Encrypt and write the vault under `passphrase`.
    ///
    /// Every blob gets a fresh nonce, so saving an unchanged vault still
    /// rewrites every ciphertext.
    pub fn save(&self, vault: &Vault, passphrase: &str, rng: &mut dyn RngCore) -> Result<()> {
        require_passphrase(passphrase)?;

        let key = crypto::derive_key(passphrase);

        let mut secrets = Vec::with_capacity(vault.secrets.len());
        for entry in &vault.secrets {
            secrets.push(SecretRecord {
                name: entry.name.clone(),
                secret: encrypt_blob(&key, entry.value.as_bytes(), rng)?,
                access: entry.access.clone(),
            });
        }

        let mut services = Vec::with_capacity(vault.services.len());
        for entry in &vault.services {
            services.push(ServiceRecord {
                name: entry.name.clone(),
                secret: encrypt_blob(&key, entry.token.as_bytes(), rng)?,
            });
        }

        let doc = VaultDocument {
            secrets,
            checksum: encrypt_blob(&key, CHECKSUM_PHRASE, rng)?,
            services,
        };

        let json = serde_json::to_string_pretty(&doc)
            .map_err(|e| VaultError::CorruptData(format!("serialization failed: {e}")))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!(path = %self.path.display(), secrets = vault.secrets.len(), "writing vault");
        write_restricted(&self.path, json.as_bytes())?;
        Ok(())
    }
}

/// Compare a decrypted checksum against the expected constant.
///
/// The constant is passed in explicitly rather than read as ambient state,
/// so the verification is testable in isolation.
pub fn verify_checksum(decrypted: &[u8], expected: &[u8]) -> Result<()> {
    if decrypted != expected {
        return Err(VaultError::Authentication(
            "incorrect passphrase".to_string(),
        ));
    }
    Ok(())
}

fn require_passphrase(passphrase: &str) -> Result<()> {
    if passphrase.is_empty() {
        return Err(VaultError::InvalidArgument(
            "passphrase must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn encrypt_blob(key: &[u8; KEY_SIZE], plaintext: &[u8], rng: &mut dyn RngCore) -> Result<String> {
    let blob = crypto::encrypt(key, plaintext, rng)?;
    Ok(BASE64.encode(blob))
}

fn decode_blob(encoded: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(encoded)
        .map_err(|e| VaultError::CorruptData(format!("invalid base64 ciphertext: {e}")))
}

fn decrypt_text(key: &[u8; KEY_SIZE], encoded: &str) -> Result<SecretString> {
    let plaintext = crypto::decrypt(key, &decode_blob(encoded)?)?;
    let text = String::from_utf8(plaintext)
        .map_err(|e| VaultError::CorruptData(format!("decrypted value is not UTF-8: {e}")))?;
    Ok(SecretString::new(text))
}

/// Write `data` to `path` with mode 0600 on Unix.
fn write_restricted(path: &Path, data: &[u8]) -> Result<()> {
    std::fs::write(path, data)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, perms)?;
    }

    Ok(())
}
