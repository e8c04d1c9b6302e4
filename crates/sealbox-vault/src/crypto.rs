//! AES-256-GCM encryption with SHA-256 key derivation.
//!
//! The cipher key is the SHA-256 digest of the passphrase. That is a fast,
//! non-memory-hard derivation kept for compatibility with the historical
//! vault format; it resists collisions but not offline brute-force of weak
//! passphrases. A fresh random nonce is prepended to every ciphertext so
//! each stored blob is self-describing and saves never repeat bytes even
//! for unchanged plaintext.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::error::{Result, VaultError};

/// AES-GCM nonce length in bytes.
pub const NONCE_SIZE: usize = 12;
/// Derived key length in bytes (AES-256).
pub const KEY_SIZE: usize = 32;

/// Derive a 256-bit cipher key from `passphrase` via SHA-256.
pub fn derive_key(passphrase: &str) -> [u8; KEY_SIZE] {
    let digest = Sha256::digest(passphrase.as_bytes());
    digest.into()
}

/// Encrypt `plaintext` under `key` with a fresh nonce drawn from `rng`.
///
/// Returns `nonce || ciphertext_with_tag`. Never fails in practice; a seal
/// failure would indicate a broken cipher state and is reported as
/// [`VaultError::CorruptData`].
pub fn encrypt(key: &[u8; KEY_SIZE], plaintext: &[u8], rng: &mut dyn RngCore) -> Result<Vec<u8>> {
    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rng.fill_bytes(&mut nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::CorruptData(format!("cipher init failed: {e}")))?;

    let nonce = Nonce::from_slice(&nonce_bytes);
    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| VaultError::CorruptData(format!("encryption failed: {e}")))?;

    // Prepend nonce to ciphertext so decrypt can split it back out.
    let mut blob = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);

    Ok(blob)
}

/// Decrypt a blob previously produced by [`encrypt`].
///
/// A blob shorter than the nonce is corrupt. A tag verification failure
/// means the key (and therefore the passphrase) is wrong or the data was
/// tampered with; both surface as [`VaultError::Authentication`].
pub fn decrypt(key: &[u8; KEY_SIZE], blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() < NONCE_SIZE {
        return Err(VaultError::CorruptData(format!(
            "ciphertext too short: {} bytes",
            blob.len()
        )));
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_SIZE);

    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| VaultError::CorruptData(format!("cipher init failed: {e}")))?;

    let nonce = Nonce::from_slice(nonce_bytes);
    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| VaultError::Authentication("incorrect passphrase".to_string()))
}
