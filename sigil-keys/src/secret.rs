use zeroize::{Zeroize, ZeroizeOnDrop};

/// Private key material exported as raw bytes or DER.
///
/// The buffer is wiped when dropped. `Debug` prints only the length.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes(Vec<u8>);

impl SecretBytes {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Borrow the bytes. Anything copied out of the slice is not wiped.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<zeroize::Zeroizing<Vec<u8>>> for SecretBytes {
    fn from(bytes: zeroize::Zeroizing<Vec<u8>>) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for SecretBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::ops::Deref for SecretBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretBytes({} bytes)", self.0.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_contents() {
        let secret = SecretBytes::new(vec![0xAB; 4]);
        assert_eq!(format!("{secret:?}"), "SecretBytes(4 bytes)");
        assert_eq!(secret.as_bytes(), &[0xAB; 4]);
        assert_eq!(secret.len(), 4);
    }
}
