//! PEM armor.
//!
//! Output always uses LF line endings and 64-column base64. Input is the first
//! PEM block found in the text; its label must be one the importer accepts.

use zeroize::Zeroizing;

use crate::KeyError;

/// Label for PKIX `SubjectPublicKeyInfo` and the raw DSA public key.
pub const PUBLIC_KEY: &str = "PUBLIC KEY";

/// Label OpenSSL uses for PKCS#8 private keys of any algorithm.
pub const PRIVATE_KEY: &str = "PRIVATE KEY";

/// A decoded PEM block.
pub struct Block {
    label: String,
    der: Zeroizing<Vec<u8>>,
}

impl Block {
    /// The label between `BEGIN` and the closing dashes.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The decoded DER body.
    #[must_use]
    pub fn der(&self) -> &[u8] {
        &self.der
    }
}

/// Wrap DER bytes in a PEM block.
#[must_use]
pub fn encode(label: &str, der: &[u8]) -> String {
    let block = ::pem::Pem::new(label, der);
    ::pem::encode_config(
        &block,
        ::pem::EncodeConfig::new().set_line_ending(::pem::LineEnding::LF),
    )
}

/// Wrap secret DER bytes; the returned text is zeroized on drop.
#[must_use]
pub fn encode_secret(label: &str, der: &[u8]) -> Zeroizing<String> {
    Zeroizing::new(encode(label, der))
}

/// Decode the first PEM block in `text` without looking at its label.
///
/// # Errors
///
/// Returns `KeyError::Decode` if no well-formed block is present.
pub fn decode_any(text: &str) -> Result<Block, KeyError> {
    let block = ::pem::parse(text)?;
    let label = block.tag().to_string();
    Ok(Block {
        label,
        der: Zeroizing::new(block.into_contents()),
    })
}

/// Decode the first PEM block in `text`, accepting only the given labels.
///
/// The first entry of `accepted` is the label reported in the error.
///
/// # Errors
///
/// Returns `KeyError::Decode` if no well-formed block is present and
/// `KeyError::UnexpectedLabel` if the block carries another label.
pub fn decode(text: &str, accepted: &[&'static str]) -> Result<Block, KeyError> {
    let block = decode_any(text)?;
    if !accepted.contains(&block.label()) {
        return Err(KeyError::UnexpectedLabel {
            expected: accepted.first().copied().unwrap_or(PUBLIC_KEY),
            actual: block.label,
        });
    }
    Ok(block)
}
