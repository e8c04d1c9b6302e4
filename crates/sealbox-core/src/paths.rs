//! Path resolution utilities.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while resolving well-known paths.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("Could not determine home directory")]
    NoHomeDir,
}

/// Get the Sealbox base directory (~/.sealbox).
pub fn base_dir() -> Result<PathBuf, PathError> {
    let home = dirs::home_dir().ok_or(PathError::NoHomeDir)?;
    Ok(home.join(".sealbox"))
}

/// Get the default vault file path (~/.sealbox/vault.json).
pub fn vault_file() -> Result<PathBuf, PathError> {
    Ok(base_dir()?.join("vault.json"))
}
