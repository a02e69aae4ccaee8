use der::asn1::ObjectIdentifier;

use crate::encoding::asn1;
use crate::KeyError;

/// A NIST prime curve supported for ECDSA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Curve {
    /// NIST P-256 (`secp256r1`, `prime256v1`).
    #[default]
    P256,
    /// NIST P-384 (`secp384r1`).
    P384,
    /// NIST P-521 (`secp521r1`).
    P521,
}

impl Curve {
    /// Every supported curve, smallest first.
    pub const ALL: [Curve; 3] = [Curve::P256, Curve::P384, Curve::P521];

    /// NIST name, e.g. `P-384`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Curve::P256 => "P-256",
            Curve::P384 => "P-384",
            Curve::P521 => "P-521",
        }
    }

    /// Curve identifier inside SSH blobs, e.g. `nistp384`.
    #[must_use]
    pub const fn ssh_identifier(self) -> &'static str {
        match self {
            Curve::P256 => "nistp256",
            Curve::P384 => "nistp384",
            Curve::P521 => "nistp521",
        }
    }

    /// SSH algorithm identifier, e.g. `ecdsa-sha2-nistp384`.
    #[must_use]
    pub const fn ssh_algorithm(self) -> &'static str {
        match self {
            Curve::P256 => "ecdsa-sha2-nistp256",
            Curve::P384 => "ecdsa-sha2-nistp384",
            Curve::P521 => "ecdsa-sha2-nistp521",
        }
    }

    /// Size of a field element and of each signature component, in bytes.
    #[must_use]
    pub const fn field_size(self) -> usize {
        match self {
            Curve::P256 => 32,
            Curve::P384 => 48,
            Curve::P521 => 66,
        }
    }

    /// Named-curve OID used in SEC1 and SPKI parameters.
    #[must_use]
    pub const fn oid(self) -> ObjectIdentifier {
        match self {
            Curve::P256 => asn1::SECP256R1,
            Curve::P384 => asn1::SECP384R1,
            Curve::P521 => asn1::SECP521R1,
        }
    }

    /// Look up a curve by its named-curve OID.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::UnsupportedCurve` for any other OID.
    pub fn from_oid(oid: ObjectIdentifier) -> Result<Self, KeyError> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.oid() == oid)
            .ok_or_else(|| KeyError::UnsupportedCurve(oid.to_string()))
    }

    /// Look up a curve by its SSH algorithm identifier.
    #[must_use]
    pub fn from_ssh_algorithm(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|curve| curve.ssh_algorithm() == name)
    }
}

impl std::fmt::Display for Curve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Curve {
    type Err = KeyError;

    /// Accepts NIST, SEC, ANSI and SSH spellings, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "p-256" | "p256" | "secp256r1" | "prime256v1" | "nistp256" => Ok(Curve::P256),
            "p-384" | "p384" | "secp384r1" | "nistp384" => Ok(Curve::P384),
            "p-521" | "p521" | "secp521r1" | "nistp521" => Ok(Curve::P521),
            _ => Err(KeyError::UnsupportedCurve(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("P-256".parse::<Curve>().unwrap(), Curve::P256);
        assert_eq!("prime256v1".parse::<Curve>().unwrap(), Curve::P256);
        assert_eq!("secp384r1".parse::<Curve>().unwrap(), Curve::P384);
        assert_eq!("NISTP521".parse::<Curve>().unwrap(), Curve::P521);
        assert!("P-192".parse::<Curve>().unwrap_err().is_type_mismatch());
    }

    #[test]
    fn test_oid_lookup() {
        for curve in Curve::ALL {
            assert_eq!(Curve::from_oid(curve.oid()).unwrap(), curve);
            assert_eq!(Curve::from_ssh_algorithm(curve.ssh_algorithm()), Some(curve));
        }
        assert!(Curve::from_oid(asn1::ED25519).is_err());
        assert_eq!(Curve::from_ssh_algorithm("ssh-ed25519"), None);
    }

    #[test]
    fn test_default_and_display() {
        assert_eq!(Curve::default(), Curve::P256);
        assert_eq!(Curve::P384.to_string(), "P-384");
    }
}
