use ed25519_dalek::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use ed25519_dalek::Signer;
use zeroize::Zeroizing;

use crate::encoding::ssh::{Reader, Writer};
use crate::encoding::{asn1, pem};
use crate::{random, Fingerprint, KeyError, PrivateKeyOps, PublicKeyOps, SecretBytes};

/// PEM label written for private keys.
pub const PRIVATE_KEY_LABEL: &str = "ED25519 PRIVATE KEY";

/// SSH algorithm identifier.
pub const SSH_ALGORITHM: &str = "ssh-ed25519";

const ALGORITHM_NAME: &str = "Ed25519";
const ACCEPTED_PRIVATE_LABELS: &[&str] = &[PRIVATE_KEY_LABEL, pem::PRIVATE_KEY];

/// A private Ed25519 signing key.
///
/// # Security
///
/// - Zeroized on drop to prevent key material from lingering in memory
/// - No `Debug` implementation to prevent accidental logging
/// - Raw exports come back as [`SecretBytes`]
#[derive(Clone)]
pub struct PrivateKey(ed25519_dalek::SigningKey);

impl PrivateKey {
    /// Generate a new random private key.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Generation` if the random source fails.
    pub fn generate() -> Result<Self, KeyError> {
        let mut rng = random::generation_rng()?;
        Ok(Self(ed25519_dalek::SigningKey::generate(&mut rng)))
    }

    /// Replace this key with freshly generated material.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Generation` and leaves the key untouched if the
    /// random source fails.
    pub fn set_default(&mut self) -> Result<(), KeyError> {
        *self = Self::generate()?;
        Ok(())
    }

    /// Load a private key from its 32-byte seed.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidLength` if the slice is not exactly 32 bytes.
    pub fn from_seed(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: Zeroizing<[u8; 32]> =
            Zeroizing::new(bytes.try_into().map_err(|_| KeyError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            })?);
        Ok(Self(ed25519_dalek::SigningKey::from_bytes(&bytes)))
    }

    /// Export the 32-byte seed.
    #[must_use]
    pub fn to_seed(&self) -> SecretBytes {
        SecretBytes::new(self.0.to_bytes().to_vec())
    }

    /// Load a private key from the 64-byte `seed || public key` form.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidLength` for a slice that is not 64 bytes and
    /// `KeyError::KeyPairMismatch` if the public half does not match the seed.
    pub fn from_keypair_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: Zeroizing<[u8; 64]> =
            Zeroizing::new(bytes.try_into().map_err(|_| KeyError::InvalidLength {
                expected: 64,
                actual: bytes.len(),
            })?);
        ed25519_dalek::SigningKey::from_keypair_bytes(&bytes)
            .map(Self)
            .map_err(|_| KeyError::KeyPairMismatch)
    }

    /// Export the 64-byte `seed || public key` form.
    #[must_use]
    pub fn to_keypair_bytes(&self) -> SecretBytes {
        SecretBytes::new(self.0.to_keypair_bytes().to_vec())
    }

    /// Sign a message with this private key.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.0.sign(message))
    }

    /// Derive the public key from this private key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }

    /// Export the private key as PKCS#8 v2 DER (seed and public key).
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if DER encoding fails.
    pub fn to_pkcs8_der(&self) -> Result<SecretBytes, KeyError> {
        let document = self.0.to_pkcs8_der().map_err(KeyError::encode)?;
        Ok(SecretBytes::new(document.as_bytes().to_vec()))
    }

    /// Load a private key from PKCS#8 DER bytes.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decode` if the bytes are not valid PKCS#8 and
    /// `KeyError::AlgorithmMismatch` if they hold a key of another algorithm.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self, KeyError> {
        asn1::private_key_algorithm(der)?.expect(asn1::ED25519, ALGORITHM_NAME)?;
        ed25519_dalek::SigningKey::from_pkcs8_der(der)
            .map(Self)
            .map_err(KeyError::decode)
    }

    /// Export as an `ED25519 PRIVATE KEY` PEM block.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if DER encoding fails.
    pub fn to_pem(&self) -> Result<Zeroizing<String>, KeyError> {
        let der = self.to_pkcs8_der()?;
        Ok(pem::encode_secret(PRIVATE_KEY_LABEL, &der))
    }

    /// Import from a PEM block labelled `ED25519 PRIVATE KEY` or `PRIVATE KEY`.
    ///
    /// # Errors
    ///
    /// Returns a decode error for malformed input and a type mismatch error
    /// for another label or algorithm.
    pub fn from_pem(text: &str) -> Result<Self, KeyError> {
        let block = pem::decode(text, ACCEPTED_PRIVATE_LABELS)?;
        Self::from_pkcs8_der(block.der())
    }
}

// `PrivateKey` stays without Debug; `KeyPair`'s Debug shows the public half.

/// A public Ed25519 verification key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey(ed25519_dalek::VerifyingKey);

impl PublicKey {
    /// Load a public key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidLength` if the slice is not exactly 32 bytes.
    /// Returns `KeyError::Decode` if the bytes don't represent a valid point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| KeyError::InvalidLength {
            expected: 32,
            actual: bytes.len(),
        })?;
        ed25519_dalek::VerifyingKey::from_bytes(&bytes)
            .map(Self)
            .map_err(KeyError::decode)
    }

    /// Export the raw public key bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Verify a signature over a message.
    ///
    /// Uses `verify_strict` to reject weak/small-order keys.
    #[must_use]
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.0.verify_strict(message, &signature.0).is_ok()
    }

    /// Verify a signature given as raw bytes; any length but 64 is `false`.
    #[must_use]
    pub fn verify_bytes(&self, message: &[u8], signature: &[u8]) -> bool {
        Signature::from_bytes(signature).is_ok_and(|sig| self.verify(message, &sig))
    }

    /// Export as PKIX `SubjectPublicKeyInfo` DER.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if DER encoding fails.
    pub fn to_pkix_der(&self) -> Result<Vec<u8>, KeyError> {
        let document = self.0.to_public_key_der().map_err(KeyError::encode)?;
        Ok(document.into_vec())
    }

    /// Import from PKIX `SubjectPublicKeyInfo` DER.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decode` for malformed DER and
    /// `KeyError::AlgorithmMismatch` for a key of another algorithm.
    pub fn from_pkix_der(der: &[u8]) -> Result<Self, KeyError> {
        asn1::public_key_algorithm(der)?.expect(asn1::ED25519, ALGORITHM_NAME)?;
        ed25519_dalek::VerifyingKey::from_public_key_der(der)
            .map(Self)
            .map_err(KeyError::decode)
    }

    /// Export as a `PUBLIC KEY` PEM block.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if DER encoding fails.
    pub fn to_pem(&self) -> Result<String, KeyError> {
        Ok(pem::encode(pem::PUBLIC_KEY, &self.to_pkix_der()?))
    }

    /// Import from a `PUBLIC KEY` PEM block.
    ///
    /// # Errors
    ///
    /// Returns a decode error for malformed input and a type mismatch error
    /// for another label or algorithm.
    pub fn from_pem(text: &str) -> Result<Self, KeyError> {
        let block = pem::decode(text, &[pem::PUBLIC_KEY])?;
        Self::from_pkix_der(block.der())
    }

    /// SSH wire blob: `string "ssh-ed25519"`, `string key`.
    #[must_use]
    pub fn to_ssh_blob(&self) -> Vec<u8> {
        let mut writer = Writer::new();
        writer.string(SSH_ALGORITHM.as_bytes()).string(&self.to_bytes());
        writer.finish()
    }

    /// Import from an SSH wire blob.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::AlgorithmMismatch` for a blob of another algorithm
    /// and a decode error for a malformed one.
    pub fn from_ssh_blob(blob: &[u8]) -> Result<Self, KeyError> {
        let mut reader = Reader::new(blob);
        reader.expect_algorithm(SSH_ALGORITHM)?;
        let key = reader.string()?;
        reader.finish()?;
        Self::from_bytes(key)
    }

    /// Export as an authorized-keys line.
    #[must_use]
    pub fn to_authorized_key(&self, comment: Option<&str>) -> String {
        PublicKeyOps::to_authorized_key(self, comment)
    }

    /// Import the first key of an authorized-keys text.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::AlgorithmMismatch` for a well-formed key of another
    /// algorithm and a decode error for a malformed line.
    pub fn from_authorized_key(text: &str) -> Result<Self, KeyError> {
        <Self as PublicKeyOps>::from_authorized_key(text)
    }

    /// OpenSSH SHA-256 fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        PublicKeyOps::fingerprint(self)
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({})", self.fingerprint())
    }
}

/// An Ed25519 signature.
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(ed25519_dalek::Signature);

impl Signature {
    /// Load a signature from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidLength` if the slice is not exactly 64 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; 64] = bytes.try_into().map_err(|_| KeyError::InvalidLength {
            expected: 64,
            actual: bytes.len(),
        })?;
        Ok(Self(ed25519_dalek::Signature::from_bytes(&bytes)))
    }

    /// Export the raw signature bytes.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 64] {
        self.0.to_bytes()
    }
}

impl std::fmt::Debug for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r: String = self.0.r_bytes()[..4].iter().map(|b| format!("{b:02x}")).collect();
        write!(f, "ed25519::Signature(R={r}...)")
    }
}

impl PrivateKeyOps for PrivateKey {
    type PublicKey = PublicKey;
    type Signature = Signature;

    fn public_key(&self) -> PublicKey {
        PrivateKey::public_key(self)
    }

    fn try_sign(&self, message: &[u8]) -> Result<Signature, KeyError> {
        Ok(self.sign(message))
    }

    fn to_pem(&self) -> Result<Zeroizing<String>, KeyError> {
        PrivateKey::to_pem(self)
    }

    fn from_pem(text: &str) -> Result<Self, KeyError> {
        PrivateKey::from_pem(text)
    }
}

impl PublicKeyOps for PublicKey {
    type Signature = Signature;

    fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        PublicKey::verify(self, message, signature)
    }

    fn to_pem(&self) -> Result<String, KeyError> {
        PublicKey::to_pem(self)
    }

    fn from_pem(text: &str) -> Result<Self, KeyError> {
        PublicKey::from_pem(text)
    }

    fn ssh_algorithm(&self) -> &'static str {
        SSH_ALGORITHM
    }

    fn to_ssh_blob(&self) -> Vec<u8> {
        PublicKey::to_ssh_blob(self)
    }

    fn from_ssh_blob(blob: &[u8]) -> Result<Self, KeyError> {
        PublicKey::from_ssh_blob(blob)
    }
}
