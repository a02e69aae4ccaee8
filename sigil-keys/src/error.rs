//! Error vocabulary shared by every algorithm module.

/// Errors that can occur during key operations.
///
/// Verification never produces one of these: a signature that does not check
/// out is reported as `false` by `verify`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum KeyError {
    /// The secure random source could not be used.
    #[error("key generation failed: {0}")]
    Generation(String),

    /// DSA domain parameters could not be generated or are unusable.
    #[error("DSA parameter generation failed: {0}")]
    ParameterGeneration(String),

    /// The input is not a well-formed PEM block, DER structure or SSH line.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The provided bytes have an invalid length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The PEM block carries a label this importer does not accept.
    #[error("unexpected PEM label: expected {expected}, got {actual:?}")]
    UnexpectedLabel { expected: &'static str, actual: String },

    /// The decoded key belongs to a different algorithm.
    #[error("key type mismatch: expected {expected}, got {actual}")]
    AlgorithmMismatch { expected: &'static str, actual: String },

    /// The decoded EC key is on a different curve than the caller asked for.
    #[error("curve mismatch: expected {expected}, got {actual}")]
    CurveMismatch { expected: &'static str, actual: &'static str },

    /// The EC key names a curve this crate does not implement.
    #[error("unsupported curve: {0}")]
    UnsupportedCurve(String),

    /// The public key is not the public half of the private key.
    #[error("public key does not match private key")]
    KeyPairMismatch,

    /// The signing primitive rejected the operation.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Serializing a key failed.
    #[error("encode failed: {0}")]
    Encode(String),

    /// The fingerprint string has an invalid format.
    #[error("invalid fingerprint format")]
    InvalidFingerprint,
}

impl KeyError {
    /// True for failures of the random source or of DSA parameter generation.
    #[must_use]
    pub fn is_generation(&self) -> bool {
        matches!(self, Self::Generation(_) | Self::ParameterGeneration(_))
    }

    /// True when the input could not be parsed at all.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::InvalidLength { .. })
    }

    /// True when the input parsed but holds the wrong kind of key.
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedLabel { .. }
                | Self::AlgorithmMismatch { .. }
                | Self::CurveMismatch { .. }
                | Self::UnsupportedCurve(_)
        )
    }

    pub(crate) fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    pub(crate) fn encode(err: impl std::fmt::Display) -> Self {
        Self::Encode(err.to_string())
    }
}

impl From<der::Error> for KeyError {
    fn from(err: der::Error) -> Self {
        Self::decode(err)
    }
}

impl From<pem::PemError> for KeyError {
    fn from(err: pem::PemError) -> Self {
        Self::decode(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(KeyError::Generation("rng".into()).is_generation());
        assert!(KeyError::ParameterGeneration("L,N".into()).is_generation());
        assert!(KeyError::Decode("bad".into()).is_decode());
        assert!(KeyError::InvalidLength { expected: 64, actual: 3 }.is_decode());
        assert!(KeyError::AlgorithmMismatch {
            expected: "ssh-ed25519",
            actual: "ssh-dss".into()
        }
        .is_type_mismatch());
        assert!(KeyError::CurveMismatch {
            expected: "P-256",
            actual: "P-384"
        }
        .is_type_mismatch());
        assert!(!KeyError::KeyPairMismatch.is_decode());
        assert!(!KeyError::KeyPairMismatch.is_type_mismatch());
    }

    #[test]
    fn test_display() {
        let err = KeyError::UnexpectedLabel {
            expected: "PUBLIC KEY",
            actual: "CERTIFICATE".into(),
        };
        assert_eq!(
            err.to_string(),
            "unexpected PEM label: expected PUBLIC KEY, got \"CERTIFICATE\""
        );
    }
}
