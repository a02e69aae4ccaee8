//! Ed25519 keys and signatures (RFC 8032).
//!
//! - [`PrivateKey`] - signing key, zeroized on drop, exported as PKCS#8
//! - [`PublicKey`] - verification key, exported as PKIX or SSH `ssh-ed25519`
//! - [`Signature`] - 64-byte deterministic signature
//! - [`KeyPair`] - both halves together
//!
//! Signing hashes internally; callers pass the raw message. The same key and
//! message always produce the same signature bytes.
//!
//! # Example
//!
//! ```
//! use sigil_keys::ed25519::{KeyPair, PublicKey};
//!
//! let pair = KeyPair::generate().unwrap();
//! let line = pair.authorized_key(Some("ops@example"));
//!
//! let imported = PublicKey::from_authorized_key(&line).unwrap();
//! let signature = pair.private_key().sign(b"deploy v42");
//! assert!(imported.verify(b"deploy v42", &signature));
//! ```

mod keys;

pub use keys::{PrivateKey, PublicKey, Signature, PRIVATE_KEY_LABEL, SSH_ALGORITHM};

/// An Ed25519 key pair.
pub type KeyPair = crate::KeyPair<PrivateKey>;

impl crate::KeyPair<PrivateKey> {
    /// Generate a fresh key pair.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Generation` if the random source fails.
    pub fn generate() -> Result<Self, crate::KeyError> {
        PrivateKey::generate().map(Self::from_private_key)
    }

    /// Replace both halves with freshly generated material.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Generation` and leaves the pair untouched if the
    /// random source fails.
    pub fn set_default(&mut self) -> Result<(), crate::KeyError> {
        self.set_private_key(PrivateKey::generate()?);
        Ok(())
    }
}
