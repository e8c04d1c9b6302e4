//! Service token generation.
//!
//! All randomness in the crate (nonces and tokens) is drawn through an
//! injected [`RngCore`] handle so tests can substitute a seeded generator.
//! Production callers pass [`rand::rngs::OsRng`].

use rand::RngCore;

/// Raw entropy per token; hex-encoding doubles this to 100 characters.
pub const TOKEN_BYTES: usize = 50;

/// Generate a bearer token: [`TOKEN_BYTES`] random bytes, hex-encoded.
pub fn generate_token(rng: &mut dyn RngCore) -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
