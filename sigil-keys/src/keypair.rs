use zeroize::Zeroizing;

use crate::{KeyError, PrivateKeyOps, PublicKeyOps};

/// A private key together with its public half.
///
/// The stored public key is always the one derived from the stored private
/// key. Every mutation replaces both sides at once or, on error, neither.
///
/// Each algorithm module exposes this as `KeyPair` and adds its own
/// generation constructors.
pub struct KeyPair<K: PrivateKeyOps> {
    private_key: K,
    public_key: K::PublicKey,
}

impl<K: PrivateKeyOps> KeyPair<K> {
    /// Wrap a private key, deriving the public half.
    #[must_use]
    pub fn from_private_key(private_key: K) -> Self {
        let public_key = private_key.public_key();
        Self {
            private_key,
            public_key,
        }
    }

    /// Import a pair from a private key PEM.
    ///
    /// # Errors
    ///
    /// Propagates the private key importer's error.
    pub fn from_private_pem(text: &str) -> Result<Self, KeyError> {
        K::from_pem(text).map(Self::from_private_key)
    }

    #[must_use]
    pub fn private_key(&self) -> &K {
        &self.private_key
    }

    #[must_use]
    pub fn public_key(&self) -> &K::PublicKey {
        &self.public_key
    }

    /// Replace both halves.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::KeyPairMismatch` and leaves the pair untouched if
    /// `public_key` is not derived from `private_key`.
    pub fn set_key_pair(&mut self, private_key: K, public_key: K::PublicKey) -> Result<(), KeyError> {
        if private_key.public_key() != public_key {
            return Err(KeyError::KeyPairMismatch);
        }
        self.private_key = private_key;
        self.public_key = public_key;
        Ok(())
    }

    /// Replace the private key and re-derive the public half.
    pub fn set_private_key(&mut self, private_key: K) {
        *self = Self::from_private_key(private_key);
    }

    /// Sign with the private half.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Signing` if the primitive fails.
    pub fn sign(&self, message: &[u8]) -> Result<K::Signature, KeyError> {
        self.private_key.try_sign(message)
    }

    /// Verify with the public half.
    #[must_use]
    pub fn verify(&self, message: &[u8], signature: &K::Signature) -> bool {
        self.public_key.verify(message, signature)
    }

    /// Export the private half as PEM.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if DER encoding fails.
    pub fn private_key_pem(&self) -> Result<Zeroizing<String>, KeyError> {
        self.private_key.to_pem()
    }

    /// Export the public half as PEM.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if DER encoding fails.
    pub fn public_key_pem(&self) -> Result<String, KeyError> {
        self.public_key.to_pem()
    }

    /// Export the public half as an authorized-keys line.
    #[must_use]
    pub fn authorized_key(&self, comment: Option<&str>) -> String {
        self.public_key.to_authorized_key(comment)
    }

    /// Replace both halves from a private key PEM.
    ///
    /// # Errors
    ///
    /// Propagates the importer's error; the pair is untouched on failure.
    pub fn import_private_pem(&mut self, text: &str) -> Result<(), KeyError> {
        *self = Self::from_private_pem(text)?;
        Ok(())
    }

    /// Split into the private and public halves.
    #[must_use]
    pub fn into_parts(self) -> (K, K::PublicKey) {
        (self.private_key, self.public_key)
    }
}

impl<K> Clone for KeyPair<K>
where
    K: PrivateKeyOps + Clone,
{
    fn clone(&self) -> Self {
        Self {
            private_key: self.private_key.clone(),
            public_key: self.public_key.clone(),
        }
    }
}

impl<K: PrivateKeyOps> std::fmt::Debug for KeyPair<K>
where
    K::PublicKey: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}
