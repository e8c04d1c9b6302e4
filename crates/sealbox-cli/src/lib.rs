//! Sealbox command-line interface.
//!
//! Thin translation layer: parses arguments, resolves the vault path and
//! passphrase, calls into `sealbox-vault`, and maps error kinds to exit
//! codes. All real invariants live in the vault crate.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sealbox_vault::VaultError;

/// Sealbox - encrypted secret vault with service access control
#[derive(Parser)]
#[command(name = "sealbox")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the vault file (default: ~/.sealbox/vault.json)
    #[arg(short, long, global = true, env = "SEALBOX_FILE")]
    pub file: Option<PathBuf>,

    /// Passphrase for the vault (prompts if omitted)
    #[arg(short, long, global = true, env = "SEALBOX_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Store a secret, overwriting any existing value but keeping its access list
    Set {
        /// Secret name
        name: String,

        /// Secret value (if omitted, prompts for hidden input)
        #[arg(long)]
        value: Option<String>,
    },

    /// Print the decrypted value of a secret
    Get {
        /// Secret name
        name: String,
    },

    /// List all secrets with a truncated value hint and their access lists
    List,

    /// Remove a secret (no error if it does not exist)
    Remove {
        /// Secret name
        name: String,
    },

    /// Grant a service access to secrets and print its bearer token
    AddAccess {
        /// Service name
        service: String,

        /// Secret names to grant access to
        #[arg(required = true)]
        secrets: Vec<String>,
    },

    /// Print the bearer token of an existing service
    Token {
        /// Service name
        service: String,
    },

    /// Strip a service from the access lists of the named secrets only
    RemoveAccess {
        /// Service name
        service: String,

        /// Secret names to remove access from
        #[arg(required = true)]
        secrets: Vec<String>,
    },

    /// Delete a service and remove it from every access list
    RevokeService {
        /// Service name
        service: String,
    },

    /// Re-encrypt the vault under a new passphrase
    ChangePassphrase {
        /// New passphrase (if omitted, prompts for hidden input)
        #[arg(long)]
        new_passphrase: Option<String>,
    },
}

/// Run the CLI with the given arguments.
pub fn run(cli: Cli) -> sealbox_vault::Result<()> {
    commands::run(cli)
}

/// Map an error kind to the process exit code the command should end with.
///
/// Usage errors reported by clap itself exit with 2 as well.
pub fn exit_code(err: &VaultError) -> i32 {
    match err {
        VaultError::InvalidArgument(_) => 2,
        VaultError::NotFound(_) => 3,
        VaultError::Authentication(_) => 4,
        VaultError::CorruptData(_) => 5,
        VaultError::Io(_) => 6,
    }
}
