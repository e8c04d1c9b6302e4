//! Encrypted secret vault with service-level access control.
//!
//! Secrets are named plaintext values persisted only in encrypted form.
//! Services are granted access to named secrets and receive an opaque
//! bearer token; revoking a service removes both the service entry and
//! every access-list reference to it.
//!
//! The whole vault lives in a single JSON file. Every command is a strict
//! load -> mutate -> save sequence; there is no file locking, so two
//! processes racing on the same file end in a last-writer-wins overwrite.

pub mod access;
pub mod crypto;
pub mod error;
pub mod model;
pub mod repository;
pub mod token;

pub use access::SetOutcome;
pub use error::{Result, VaultError};
pub use model::{SecretEntry, ServiceEntry, Vault};
pub use repository::VaultRepository;
pub use token::generate_token;
