//! ECDSA over the NIST curves P-256, P-384 and P-521.
//!
//! Messages are hashed with SHA-256 on every curve and signed with a fresh
//! per-signature nonce, so signatures are not reproducible.
//!
//! | Form | Encoding |
//! |------|----------|
//! | private key | SEC1 `ECPrivateKey` DER in an `ECDSA PRIVATE KEY` PEM block |
//! | public key | PKIX DER in a `PUBLIC KEY` PEM block |
//! | public key | `ecdsa-sha2-nistpNNN` authorized-keys line |
//! | signature | `(r, s)`, DER `SEQUENCE { r, s }` via [`RsSignature`](crate::RsSignature) |
//!
//! The curve travels with the key in every format and is recovered on
//! import; `*_expecting` importers reject a key on another curve.
//!
//! # Example
//!
//! ```
//! use sigil_keys::ecdsa::{Curve, KeyPair, PublicKey};
//!
//! let pair = KeyPair::generate(Curve::P384).unwrap();
//! let signature = pair.sign(b"release.tar.gz").unwrap();
//!
//! let pem = pair.public_key_pem().unwrap();
//! let imported = PublicKey::from_pem_expecting(&pem, Curve::P384).unwrap();
//! assert!(imported.verify(b"release.tar.gz", &signature));
//! ```

mod curve;
mod keys;

pub use curve::Curve;
pub use keys::{PrivateKey, PublicKey, Signature, PRIVATE_KEY_LABEL, SEC1_LABEL};

/// An ECDSA key pair.
pub type KeyPair = crate::KeyPair<PrivateKey>;

impl crate::KeyPair<PrivateKey> {
    /// Generate a fresh key pair on `curve`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Generation` if the random source fails.
    pub fn generate(curve: Curve) -> Result<Self, crate::KeyError> {
        PrivateKey::generate(curve).map(Self::from_private_key)
    }

    /// The curve both halves live on.
    #[must_use]
    pub fn curve(&self) -> Curve {
        self.private_key().curve()
    }

    /// Replace both halves with a fresh pair on `curve`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Generation` and leaves the pair untouched if the
    /// random source fails.
    pub fn set_curve(&mut self, curve: Curve) -> Result<(), crate::KeyError> {
        self.set_private_key(PrivateKey::generate(curve)?);
        Ok(())
    }

    /// Replace both halves with a fresh pair on P-256.
    ///
    /// # Errors
    ///
    /// Same as `set_curve`.
    pub fn set_default(&mut self) -> Result<(), crate::KeyError> {
        self.set_curve(Curve::default())
    }
}
