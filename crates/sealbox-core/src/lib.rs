//! # sealbox-core
//!
//! Shared primitives used across the Sealbox crates:
//!
//! - **SecretString**: zeroize-on-drop plaintext wrapper with redacted output
//! - **Paths**: resolution of the default vault file location

pub mod paths;
pub mod secret;

pub use secret::SecretString;
