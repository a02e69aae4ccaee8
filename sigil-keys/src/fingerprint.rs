use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::KeyError;

/// A SHA-256 fingerprint of a public key.
///
/// Format: `SHA256:{base64_no_padding}` computed over the SSH wire blob of
/// the key, the same string `ssh-keygen -l` prints.
///
/// # Security
///
/// Equality is constant time. `Hash` is derived anyway; the fingerprint is
/// public, only comparisons need timing protection.
#[derive(Clone, Eq, Hash, Serialize, Deserialize)]
#[allow(clippy::derived_hash_with_manual_eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// The prefix used for fingerprint strings.
    pub const PREFIX: &'static str = "SHA256:";

    /// Fingerprint an SSH public key blob.
    #[must_use]
    pub fn from_ssh_blob(blob: &[u8]) -> Self {
        Self::from_hash_bytes(Sha256::digest(blob).into())
    }

    /// Parse a fingerprint from a string.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::InvalidFingerprint` if the string doesn't have the
    /// correct format (`SHA256:{base64}` over 32 bytes).
    pub fn parse(s: &str) -> Result<Self, KeyError> {
        let encoded = s
            .strip_prefix(Self::PREFIX)
            .ok_or(KeyError::InvalidFingerprint)?;
        let decoded = STANDARD_NO_PAD
            .decode(encoded)
            .map_err(|_| KeyError::InvalidFingerprint)?;

        if decoded.len() != 32 {
            return Err(KeyError::InvalidFingerprint);
        }

        Ok(Self(s.to_string()))
    }

    /// Create a fingerprint from raw hash bytes.
    #[must_use]
    pub fn from_hash_bytes(hash: [u8; 32]) -> Self {
        Self(format!("{}{}", Self::PREFIX, STANDARD_NO_PAD.encode(hash)))
    }

    /// Get the raw hash bytes (without the prefix).
    ///
    /// Returns `None` only if the value was built through deserialization
    /// from a malformed string.
    #[must_use]
    pub fn hash_bytes(&self) -> Option<[u8; 32]> {
        let encoded = self.0.strip_prefix(Self::PREFIX)?;
        STANDARD_NO_PAD.decode(encoded).ok()?.try_into().ok()
    }

    /// Get the fingerprint as a string reference.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Fingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl std::str::FromStr for Fingerprint {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fingerprint({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_format() {
        let fingerprint = Fingerprint::from_ssh_blob(b"not really a key");

        assert!(fingerprint.as_str().starts_with("SHA256:"));
        // 7 (prefix) + 43 (32 bytes of unpadded base64)
        assert_eq!(fingerprint.as_str().len(), 50);
    }

    #[test]
    fn test_fingerprint_parse() {
        let fingerprint = Fingerprint::from_ssh_blob(b"blob");
        let parsed = Fingerprint::parse(fingerprint.as_str()).unwrap();
        assert_eq!(fingerprint, parsed);
    }

    #[test]
    fn test_fingerprint_parse_invalid() {
        // Missing prefix
        assert!(Fingerprint::parse("abc123").is_err());

        // Invalid base64
        assert!(Fingerprint::parse("SHA256:!!!invalid!!!").is_err());

        // Wrong length
        assert!(Fingerprint::parse("SHA256:YWJj").is_err());

        // URL-safe alphabet is not what ssh-keygen prints
        assert!(Fingerprint::parse("SHA256:aO-rz9duMkEBwYQzOXmtUGyBzeI4zY7MvGQLT8VVsjI").is_err());
    }

    #[test]
    fn test_fingerprint_hash_bytes_roundtrip() {
        let fingerprint = Fingerprint::from_ssh_blob(b"blob");
        let hash = fingerprint.hash_bytes().unwrap();
        assert_eq!(Fingerprint::from_hash_bytes(hash), fingerprint);
    }

    #[test]
    fn test_fingerprint_serde() {
        let fingerprint = Fingerprint::from_ssh_blob(b"blob");
        let json = serde_json::to_string(&fingerprint).unwrap();
        assert_eq!(json, format!("\"{}\"", fingerprint.as_str()));
        let back: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fingerprint);
    }
}
