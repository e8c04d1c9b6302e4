//! Error types for vault operations.

use thiserror::Error;

/// Errors that can occur during vault operations.
///
/// Wrong-passphrase detection rides on AEAD authentication: any tag
/// verification failure while decrypting the vault surfaces as
/// [`VaultError::Authentication`]. The library never retries and performs
/// no partial rollback.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Corrupt vault data: {0}")]
    CorruptData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
