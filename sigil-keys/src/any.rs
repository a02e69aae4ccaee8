//! Keys whose algorithm is only known at runtime.
//!
//! The importers here look at the PEM label, the PKCS#8/PKIX algorithm OID
//! or the SSH algorithm name and hand off to the matching module. Mixing
//! algorithms is never an error at verification time: a signature of one
//! algorithm checked against a key of another simply does not verify.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::encoding::ssh::AuthorizedKey;
use crate::encoding::{asn1, pem};
use crate::{dsa, ecdsa, ed25519, Fingerprint, KeyError, PublicKeyOps, RsSignature};

const ANY_ALGORITHM: &str = "Ed25519, ECDSA or DSA";
const ANY_SSH_ALGORITHM: &str = "ssh-ed25519, ecdsa-sha2-nistp* or ssh-dss";

/// A signature algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Ed25519,
    Ecdsa,
    Dsa,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Ed25519, Algorithm::Ecdsa, Algorithm::Dsa];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Ed25519 => "ed25519",
            Algorithm::Ecdsa => "ecdsa",
            Algorithm::Dsa => "dsa",
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ed25519" | "ssh-ed25519" => Ok(Algorithm::Ed25519),
            "ecdsa" | "ec" => Ok(Algorithm::Ecdsa),
            "dsa" | "dss" | "ssh-dss" => Ok(Algorithm::Dsa),
            _ => Err(KeyError::AlgorithmMismatch {
                expected: ANY_ALGORITHM,
                actual: s.to_string(),
            }),
        }
    }
}

/// A private key of any supported algorithm.
#[derive(Clone)]
pub enum AnyPrivateKey {
    Ed25519(ed25519::PrivateKey),
    Ecdsa(ecdsa::PrivateKey),
    Dsa(dsa::PrivateKey),
}

impl AnyPrivateKey {
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Ed25519(_) => Algorithm::Ed25519,
            Self::Ecdsa(_) => Algorithm::Ecdsa,
            Self::Dsa(_) => Algorithm::Dsa,
        }
    }

    #[must_use]
    pub fn public_key(&self) -> AnyPublicKey {
        match self {
            Self::Ed25519(key) => AnyPublicKey::Ed25519(key.public_key()),
            Self::Ecdsa(key) => AnyPublicKey::Ecdsa(key.public_key()),
            Self::Dsa(key) => AnyPublicKey::Dsa(key.public_key()),
        }
    }

    /// Sign `message` with whichever algorithm this key uses.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Signing` if the nonce source or the primitive fails.
    pub fn sign(&self, message: &[u8]) -> Result<AnySignature, KeyError> {
        Ok(match self {
            Self::Ed25519(key) => AnySignature::Ed25519(key.sign(message)),
            Self::Ecdsa(key) => AnySignature::Ecdsa(key.sign(message)?),
            Self::Dsa(key) => AnySignature::Dsa(key.sign(message)?),
        })
    }

    /// Export in the algorithm's own private key PEM format.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if DER encoding fails.
    pub fn to_pem(&self) -> Result<Zeroizing<String>, KeyError> {
        match self {
            Self::Ed25519(key) => key.to_pem(),
            Self::Ecdsa(key) => key.to_pem(),
            Self::Dsa(key) => key.to_pem(),
        }
    }

    /// Import a private key PEM of any supported algorithm.
    ///
    /// The label picks the algorithm; a generic `PRIVATE KEY` block is
    /// routed by the OID inside it.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::UnexpectedLabel` for a non-private-key block,
    /// `KeyError::AlgorithmMismatch` for an unsupported PKCS#8 algorithm and
    /// the module importer's error otherwise.
    pub fn from_pem(text: &str) -> Result<Self, KeyError> {
        let block = pem::decode_any(text)?;
        match block.label() {
            ed25519::PRIVATE_KEY_LABEL => ed25519::PrivateKey::from_pem(text).map(Self::Ed25519),
            ecdsa::PRIVATE_KEY_LABEL | ecdsa::SEC1_LABEL => {
                ecdsa::PrivateKey::from_pem(text).map(Self::Ecdsa)
            }
            dsa::PRIVATE_KEY_LABEL => dsa::PrivateKey::from_pem(text).map(Self::Dsa),
            pem::PRIVATE_KEY => {
                let info = asn1::private_key_algorithm(block.der())?;
                if info.algorithm == asn1::ED25519 {
                    ed25519::PrivateKey::from_pkcs8_der(block.der()).map(Self::Ed25519)
                } else if info.algorithm == asn1::EC_PUBLIC_KEY {
                    ecdsa::PrivateKey::from_pkcs8_der(block.der()).map(Self::Ecdsa)
                } else if info.algorithm == asn1::DSA {
                    dsa::PrivateKey::from_pkcs8_der(block.der()).map(Self::Dsa)
                } else {
                    Err(KeyError::AlgorithmMismatch {
                        expected: ANY_ALGORITHM,
                        actual: asn1::algorithm_name(&info.algorithm),
                    })
                }
            }
            other => Err(KeyError::UnexpectedLabel {
                expected: pem::PRIVATE_KEY,
                actual: other.to_string(),
            }),
        }
    }
}

impl From<ed25519::PrivateKey> for AnyPrivateKey {
    fn from(key: ed25519::PrivateKey) -> Self {
        Self::Ed25519(key)
    }
}

impl From<ecdsa::PrivateKey> for AnyPrivateKey {
    fn from(key: ecdsa::PrivateKey) -> Self {
        Self::Ecdsa(key)
    }
}

impl From<dsa::PrivateKey> for AnyPrivateKey {
    fn from(key: dsa::PrivateKey) -> Self {
        Self::Dsa(key)
    }
}

/// A public key of any supported algorithm.
#[derive(Clone, PartialEq)]
pub enum AnyPublicKey {
    Ed25519(ed25519::PublicKey),
    Ecdsa(ecdsa::PublicKey),
    Dsa(dsa::PublicKey),
}

impl AnyPublicKey {
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Ed25519(_) => Algorithm::Ed25519,
            Self::Ecdsa(_) => Algorithm::Ecdsa,
            Self::Dsa(_) => Algorithm::Dsa,
        }
    }

    /// Check `signature` over `message`. A signature of another algorithm
    /// is `false`.
    #[must_use]
    pub fn verify(&self, message: &[u8], signature: &AnySignature) -> bool {
        match (self, signature) {
            (Self::Ed25519(key), AnySignature::Ed25519(sig)) => key.verify(message, sig),
            (Self::Ecdsa(key), AnySignature::Ecdsa(sig)) => key.verify(message, sig),
            (Self::Dsa(key), AnySignature::Dsa(sig)) => key.verify(message, sig),
            _ => false,
        }
    }

    /// Export as a `PUBLIC KEY` PEM block.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if DER encoding fails.
    pub fn to_pem(&self) -> Result<String, KeyError> {
        match self {
            Self::Ed25519(key) => key.to_pem(),
            Self::Ecdsa(key) => key.to_pem(),
            Self::Dsa(key) => key.to_pem(),
        }
    }

    /// Import a `PUBLIC KEY` PEM block of any supported algorithm.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::UnexpectedLabel` for another label,
    /// `KeyError::AlgorithmMismatch` for an unsupported algorithm and a
    /// decode error for malformed content.
    pub fn from_pem(text: &str) -> Result<Self, KeyError> {
        let block = pem::decode(text, &[pem::PUBLIC_KEY])?;
        let der = block.der();
        let Ok(info) = asn1::public_key_algorithm(der) else {
            // Only the nested DSA layout is not a SubjectPublicKeyInfo.
            return dsa::PublicKey::from_der(der).map(Self::Dsa);
        };

        if info.algorithm == asn1::ED25519 {
            ed25519::PublicKey::from_pkix_der(der).map(Self::Ed25519)
        } else if info.algorithm == asn1::EC_PUBLIC_KEY {
            ecdsa::PublicKey::from_pkix_der(der).map(Self::Ecdsa)
        } else if info.algorithm == asn1::DSA {
            dsa::PublicKey::from_der(der).map(Self::Dsa)
        } else {
            Err(KeyError::AlgorithmMismatch {
                expected: ANY_ALGORITHM,
                actual: asn1::algorithm_name(&info.algorithm),
            })
        }
    }

    /// SSH algorithm identifier.
    #[must_use]
    pub fn ssh_algorithm(&self) -> &'static str {
        match self {
            Self::Ed25519(key) => key.ssh_algorithm(),
            Self::Ecdsa(key) => key.ssh_algorithm(),
            Self::Dsa(key) => key.ssh_algorithm(),
        }
    }

    /// SSH wire blob.
    #[must_use]
    pub fn to_ssh_blob(&self) -> Vec<u8> {
        match self {
            Self::Ed25519(key) => key.to_ssh_blob(),
            Self::Ecdsa(key) => key.to_ssh_blob(),
            Self::Dsa(key) => key.to_ssh_blob(),
        }
    }

    /// Import from an SSH wire blob of any supported algorithm.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::AlgorithmMismatch` for an unsupported algorithm
    /// and a decode error for a malformed blob.
    pub fn from_ssh_blob(blob: &[u8]) -> Result<Self, KeyError> {
        let name = crate::encoding::ssh::blob_algorithm(blob)?;
        if name == ed25519::SSH_ALGORITHM {
            ed25519::PublicKey::from_ssh_blob(blob).map(Self::Ed25519)
        } else if name == dsa::SSH_ALGORITHM {
            dsa::PublicKey::from_ssh_blob(blob).map(Self::Dsa)
        } else if ecdsa::Curve::from_ssh_algorithm(name).is_some() {
            ecdsa::PublicKey::from_ssh_blob(blob).map(Self::Ecdsa)
        } else {
            Err(KeyError::AlgorithmMismatch {
                expected: ANY_SSH_ALGORITHM,
                actual: name.to_string(),
            })
        }
    }

    /// Export as an authorized-keys line.
    #[must_use]
    pub fn to_authorized_key(&self, comment: Option<&str>) -> String {
        crate::encoding::ssh::format(self.ssh_algorithm(), &self.to_ssh_blob(), comment)
    }

    /// Import the first key of an authorized-keys text.
    ///
    /// # Errors
    ///
    /// Same as [`AnyPublicKey::from_ssh_blob`], plus `KeyError::Decode` for
    /// a malformed line.
    pub fn from_authorized_key(text: &str) -> Result<Self, KeyError> {
        Self::from_ssh_blob(&AuthorizedKey::parse(text)?.blob)
    }

    /// Import either a `PUBLIC KEY` PEM block or an authorized-keys line.
    ///
    /// # Errors
    ///
    /// Same as [`AnyPublicKey::from_pem`] or
    /// [`AnyPublicKey::from_authorized_key`].
    pub fn parse(text: &str) -> Result<Self, KeyError> {
        if text.trim_start().starts_with("-----BEGIN") {
            Self::from_pem(text)
        } else {
            Self::from_authorized_key(text)
        }
    }

    /// OpenSSH SHA-256 fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::from_ssh_blob(&self.to_ssh_blob())
    }
}

impl std::fmt::Debug for AnyPublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ed25519(key) => std::fmt::Debug::fmt(key, f),
            Self::Ecdsa(key) => std::fmt::Debug::fmt(key, f),
            Self::Dsa(key) => std::fmt::Debug::fmt(key, f),
        }
    }
}

impl From<ed25519::PublicKey> for AnyPublicKey {
    fn from(key: ed25519::PublicKey) -> Self {
        Self::Ed25519(key)
    }
}

impl From<ecdsa::PublicKey> for AnyPublicKey {
    fn from(key: ecdsa::PublicKey) -> Self {
        Self::Ecdsa(key)
    }
}

impl From<dsa::PublicKey> for AnyPublicKey {
    fn from(key: dsa::PublicKey) -> Self {
        Self::Dsa(key)
    }
}

/// A signature tagged with the algorithm that made it.
#[derive(Debug, Clone, PartialEq)]
pub enum AnySignature {
    Ed25519(ed25519::Signature),
    Ecdsa(RsSignature),
    Dsa(RsSignature),
}

impl AnySignature {
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Ed25519(_) => Algorithm::Ed25519,
            Self::Ecdsa(_) => Algorithm::Ecdsa,
            Self::Dsa(_) => Algorithm::Dsa,
        }
    }

    /// Wire bytes: 64 raw bytes for Ed25519, DER `SEQUENCE { r, s }`
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if DER encoding fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, KeyError> {
        match self {
            Self::Ed25519(sig) => Ok(sig.to_bytes().to_vec()),
            Self::Ecdsa(sig) | Self::Dsa(sig) => sig.to_der(),
        }
    }

    /// Parse wire bytes produced by [`AnySignature::to_bytes`].
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidLength` or `KeyError::Decode` for bytes
    /// that are not a signature of `algorithm`.
    pub fn from_bytes(algorithm: Algorithm, bytes: &[u8]) -> Result<Self, KeyError> {
        match algorithm {
            Algorithm::Ed25519 => ed25519::Signature::from_bytes(bytes).map(Self::Ed25519),
            Algorithm::Ecdsa => RsSignature::from_der(bytes).map(Self::Ecdsa),
            Algorithm::Dsa => RsSignature::from_der(bytes).map(Self::Dsa),
        }
    }
}
