//! Random sources.
//!
//! Generation draws from a ChaCha generator seeded by the operating system
//! so that an unavailable entropy source surfaces as an error instead of a
//! panic. Per-signature nonces come straight from [`OsRng`].

use rand::rngs::{OsRng, StdRng};
use rand::SeedableRng;

use crate::KeyError;

/// A freshly seeded CSPRNG for one key or parameter generation.
pub(crate) fn generation_rng() -> Result<StdRng, KeyError> {
    StdRng::from_rng(OsRng).map_err(|e| KeyError::Generation(e.to_string()))
}

/// The nonce source handed to randomized signers.
pub(crate) fn nonce_rng() -> OsRng {
    OsRng
}
