use der::asn1::UintRef;
use der::{Decode, Encode, Sequence};

use crate::KeyError;

/// Wire form `SEQUENCE { r INTEGER, s INTEGER }` (RFC 3279 `Dss-Sig-Value`
/// and `ECDSA-Sig-Value`).
#[derive(Sequence)]
struct SigValue<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

/// An `(r, s)` signature as produced by ECDSA and DSA.
///
/// Both integers are kept as minimal unsigned big-endian bytes. Whether they
/// are in range for a particular key is decided at verification time.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RsSignature {
    r: Vec<u8>,
    s: Vec<u8>,
}

impl RsSignature {
    /// Build a signature from big-endian `r` and `s`; leading zeros are dropped.
    #[must_use]
    pub fn from_scalars(r: &[u8], s: &[u8]) -> Self {
        Self {
            r: strip_leading_zeros(r).to_vec(),
            s: strip_leading_zeros(s).to_vec(),
        }
    }

    /// The `r` component as minimal big-endian bytes.
    #[must_use]
    pub fn r(&self) -> &[u8] {
        &self.r
    }

    /// The `s` component as minimal big-endian bytes.
    #[must_use]
    pub fn s(&self) -> &[u8] {
        &self.s
    }

    /// Encode as ASN.1 DER.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if the DER writer fails.
    pub fn to_der(&self) -> Result<Vec<u8>, KeyError> {
        let or_zero = |v: &[u8]| if v.is_empty() { vec![0u8] } else { v.to_vec() };
        let (r, s) = (or_zero(&self.r), or_zero(&self.s));
        SigValue {
            r: UintRef::new(&r).map_err(KeyError::encode)?,
            s: UintRef::new(&s).map_err(KeyError::encode)?,
        }
        .to_der()
        .map_err(KeyError::encode)
    }

    /// Decode from ASN.1 DER.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decode` if `der` is not a pair of non-negative integers.
    pub fn from_der(der: &[u8]) -> Result<Self, KeyError> {
        let value = SigValue::from_der(der)?;
        Ok(Self::from_scalars(value.r.as_bytes(), value.s.as_bytes()))
    }

    /// `r || s`, each left-padded to `width` bytes.
    ///
    /// Returns `None` if a component does not fit.
    #[must_use]
    pub fn to_fixed(&self, width: usize) -> Option<Vec<u8>> {
        let mut out = left_pad(&self.r, width)?;
        out.extend(left_pad(&self.s, width)?);
        Some(out)
    }
}

impl std::fmt::Debug for RsSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let head = |v: &[u8]| v.iter().take(4).map(|b| format!("{b:02x}")).collect::<String>();
        write!(f, "RsSignature(r={}..., s={}...)", head(&self.r), head(&self.s))
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Left-pad `bytes` with zeros to exactly `width` bytes.
pub(crate) fn left_pad(bytes: &[u8], width: usize) -> Option<Vec<u8>> {
    let bytes = strip_leading_zeros(bytes);
    if bytes.len() > width {
        return None;
    }
    let mut out = vec![0u8; width - bytes.len()];
    out.extend_from_slice(bytes);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_der_roundtrip() {
        let sig = RsSignature::from_scalars(&[0x00, 0x81, 0x02], &[0x01]);
        assert_eq!(sig.r(), &[0x81, 0x02]);

        let der = sig.to_der().unwrap();
        // INTEGER 0x0081_02 needs a sign byte, INTEGER 0x01 does not
        assert_eq!(der, vec![0x30, 0x08, 0x02, 0x03, 0x00, 0x81, 0x02, 0x02, 0x01, 0x01]);
        assert_eq!(RsSignature::from_der(&der).unwrap(), sig);
    }

    #[test]
    fn test_from_der_rejects_garbage() {
        assert!(RsSignature::from_der(&[]).unwrap_err().is_decode());
        assert!(RsSignature::from_der(&[0x30, 0x03, 0x02, 0x01]).is_err());
        // negative r
        assert!(RsSignature::from_der(&[0x30, 0x06, 0x02, 0x01, 0xff, 0x02, 0x01, 0x01]).is_err());
    }

    #[test]
    fn test_to_fixed() {
        let sig = RsSignature::from_scalars(&[0x01, 0x02], &[0x03]);
        assert_eq!(sig.to_fixed(3).unwrap(), vec![0, 1, 2, 0, 0, 3]);
        assert!(sig.to_fixed(1).is_none());
    }
}
