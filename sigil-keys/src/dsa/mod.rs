//! Legacy DSA (FIPS 186) with SHA-256.
//!
//! DSA is kept for interoperability with existing keys. New deployments
//! should use [`ed25519`](crate::ed25519) or [`ecdsa`](crate::ecdsa).
//!
//! Keys live under shared [`DomainParameters`] `(p, q, g)`. Generating
//! parameters dominates the cost of a fresh key, so
//! [`PrivateKey::generate_with_parameters`] reuses an existing set.
//!
//! | Form | Encoding |
//! |------|----------|
//! | private key | `SEQUENCE { SEQUENCE { SEQUENCE { p, q, g }, y }, x }` in a `DSA PRIVATE KEY` PEM block |
//! | public key | `SEQUENCE { SEQUENCE { p, q, g }, y }` in a `PUBLIC KEY` PEM block |
//! | public key | `ssh-dss` authorized-keys line |
//! | parameters | `Dss-Parms` in a `DSA PARAMETERS` PEM block |
//! | signature | `(r, s)` via [`RsSignature`](crate::RsSignature) |
//!
//! Import also accepts the flat OpenSSL private key layout, PKCS#8 and PKIX.
//!
//! [`ParameterSizes::L1024N160`] is deprecated: naming it warns at compile
//! time, and [`ParameterSizes::is_weak`] reports it at runtime.

mod keys;
#[allow(deprecated)]
mod params;

pub use keys::{PrivateKey, PublicKey, Signature, PRIVATE_KEY_LABEL, SSH_ALGORITHM};
pub use params::{DomainParameters, ParameterSizes, PARAMETERS_LABEL};

/// A DSA key pair.
pub type KeyPair = crate::KeyPair<PrivateKey>;

impl crate::KeyPair<PrivateKey> {
    /// Generate parameters of `sizes` and a key pair under them.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::ParameterGeneration` or `KeyError::Generation` if
    /// the random source fails.
    pub fn generate(sizes: ParameterSizes) -> Result<Self, crate::KeyError> {
        PrivateKey::generate(sizes).map(Self::from_private_key)
    }

    /// Generate a key pair under existing parameters.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Generation` if the random source fails.
    pub fn generate_with_parameters(
        parameters: &DomainParameters,
    ) -> Result<Self, crate::KeyError> {
        PrivateKey::generate_with_parameters(parameters).map(Self::from_private_key)
    }

    /// Replace both halves with a pair under fresh parameters of `sizes`.
    ///
    /// # Errors
    ///
    /// Same as `generate`; the pair is untouched on failure.
    pub fn set_sizes(&mut self, sizes: ParameterSizes) -> Result<(), crate::KeyError> {
        self.set_private_key(PrivateKey::generate(sizes)?);
        Ok(())
    }

    /// Replace both halves with a pair under fresh L2048N256 parameters.
    ///
    /// # Errors
    ///
    /// Same as `generate`; the pair is untouched on failure.
    pub fn set_default(&mut self) -> Result<(), crate::KeyError> {
        self.set_sizes(ParameterSizes::default())
    }
}
