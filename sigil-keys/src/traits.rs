//! The surface shared by the three algorithm modules.
//!
//! Generation is not part of it: Ed25519 takes no parameter, ECDSA a curve
//! and DSA a parameter size, so each module keeps its own `generate`.

use zeroize::Zeroizing;

use crate::encoding::ssh::{self, AuthorizedKey};
use crate::{Fingerprint, KeyError};

/// A private key that can sign and be moved through PEM.
pub trait PrivateKeyOps: Sized {
    /// The matching public key.
    type PublicKey: PublicKeyOps<Signature = Self::Signature>;
    /// The signature this key produces.
    type Signature;

    /// Derive the public key.
    fn public_key(&self) -> Self::PublicKey;

    /// Sign `message`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Signing` if the nonce source or the primitive fails.
    fn try_sign(&self, message: &[u8]) -> Result<Self::Signature, KeyError>;

    /// Export as PEM in this algorithm's private key format.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if DER encoding fails.
    fn to_pem(&self) -> Result<Zeroizing<String>, KeyError>;

    /// Import from PEM.
    ///
    /// # Errors
    ///
    /// Returns a decode error for malformed input and a type mismatch error
    /// for a key of another algorithm.
    fn from_pem(text: &str) -> Result<Self, KeyError>;
}

/// A public key that can verify and be moved through PEM and SSH text.
pub trait PublicKeyOps: Clone + PartialEq + Sized {
    /// The signature this key checks.
    type Signature;

    /// Check `signature` over `message`. Never errors, never panics.
    fn verify(&self, message: &[u8], signature: &Self::Signature) -> bool;

    /// Export as PEM.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if DER encoding fails.
    fn to_pem(&self) -> Result<String, KeyError>;

    /// Import from PEM.
    ///
    /// # Errors
    ///
    /// Returns a decode error for malformed input and a type mismatch error
    /// for a key of another algorithm.
    fn from_pem(text: &str) -> Result<Self, KeyError>;

    /// SSH algorithm identifier, e.g. `ssh-ed25519`.
    fn ssh_algorithm(&self) -> &'static str;

    /// SSH wire blob.
    fn to_ssh_blob(&self) -> Vec<u8>;

    /// Import from an SSH wire blob.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::AlgorithmMismatch` for a blob of another algorithm.
    fn from_ssh_blob(blob: &[u8]) -> Result<Self, KeyError>;

    /// Export as an authorized-keys line.
    fn to_authorized_key(&self, comment: Option<&str>) -> String {
        ssh::format(self.ssh_algorithm(), &self.to_ssh_blob(), comment)
    }

    /// Import the first key of an authorized-keys text.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decode` for a malformed line and
    /// `KeyError::AlgorithmMismatch` for a well-formed key of another algorithm.
    fn from_authorized_key(text: &str) -> Result<Self, KeyError> {
        Self::from_ssh_blob(&AuthorizedKey::parse(text)?.blob)
    }

    /// OpenSSH SHA-256 fingerprint.
    fn fingerprint(&self) -> Fingerprint {
        Fingerprint::from_ssh_blob(&self.to_ssh_blob())
    }
}
