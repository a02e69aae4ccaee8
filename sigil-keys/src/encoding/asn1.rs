//! Object identifiers and container peeking.
//!
//! PKCS#8 and SPKI containers name their algorithm before the key body. The
//! peeks read that name first so a foreign key is reported as a type
//! mismatch instead of a generic decode failure.

use der::asn1::ObjectIdentifier;

use crate::KeyError;

/// Ed25519 (RFC 8410).
pub const ED25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");
/// `id-ecPublicKey` (RFC 5480).
pub const EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
/// `secp256r1` / `prime256v1`.
pub const SECP256R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
/// `secp384r1`.
pub const SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
/// `secp521r1`.
pub const SECP521R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");
/// `id-dsa` (RFC 3279).
pub const DSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10040.4.1");
/// `rsaEncryption`.
pub const RSA: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
/// X25519, seen when an ECDH key is handed to a signature importer.
pub const X25519: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.110");

/// Human-readable name for an algorithm OID, falling back to dotted form.
#[must_use]
pub fn algorithm_name(oid: &ObjectIdentifier) -> String {
    const NAMES: [(ObjectIdentifier, &str); 5] = [
        (ED25519, "Ed25519"),
        (EC_PUBLIC_KEY, "ECDSA"),
        (DSA, "DSA"),
        (RSA, "RSA"),
        (X25519, "X25519"),
    ];
    NAMES
        .iter()
        .find(|(known, _)| known == oid)
        .map_or_else(|| oid.to_string(), |(_, name)| (*name).to_string())
}

/// Algorithm and optional parameter OID of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub algorithm: ObjectIdentifier,
    pub parameters: Option<ObjectIdentifier>,
}

impl AlgorithmInfo {
    /// Fail with `AlgorithmMismatch` unless the container holds `expected`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::AlgorithmMismatch` naming both algorithms.
    pub fn expect(self, expected: ObjectIdentifier, name: &'static str) -> Result<Self, KeyError> {
        if self.algorithm == expected {
            Ok(self)
        } else {
            Err(KeyError::AlgorithmMismatch {
                expected: name,
                actual: algorithm_name(&self.algorithm),
            })
        }
    }
}

/// Read the algorithm of a PKCS#8 `PrivateKeyInfo`.
///
/// # Errors
///
/// Returns `KeyError::Decode` if `der` is not a `PrivateKeyInfo`.
pub fn private_key_algorithm(der: &[u8]) -> Result<AlgorithmInfo, KeyError> {
    let info = pkcs8::PrivateKeyInfo::try_from(der).map_err(KeyError::decode)?;
    Ok(AlgorithmInfo {
        algorithm: info.algorithm.oid,
        parameters: info.algorithm.parameters_oid().ok(),
    })
}

/// Read the algorithm of an SPKI `SubjectPublicKeyInfo`.
///
/// # Errors
///
/// Returns `KeyError::Decode` if `der` is not a `SubjectPublicKeyInfo`.
pub fn public_key_algorithm(der: &[u8]) -> Result<AlgorithmInfo, KeyError> {
    let spki = spki::SubjectPublicKeyInfoRef::try_from(der).map_err(KeyError::decode)?;
    Ok(AlgorithmInfo {
        algorithm: spki.algorithm.oid,
        parameters: spki.algorithm.parameters_oid().ok(),
    })
}
