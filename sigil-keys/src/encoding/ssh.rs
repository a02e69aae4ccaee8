//! SSH public key wire format (RFC 4253 §6.6) and authorized-keys lines.
//!
//! A key blob is a sequence of length-prefixed fields:
//!
//! ```text
//! +----------------+------------------+----------------+-----
//! | len (4 bytes)  | algorithm name   | len (4 bytes)  | ...
//! | big-endian u32 | e.g. ssh-ed25519 | big-endian u32 |
//! +----------------+------------------+----------------+-----
//! ```
//!
//! An authorized-keys line is `[options] <algorithm> <base64 blob> [comment]`.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::{Buf, BufMut, BytesMut};

use crate::KeyError;

/// Builds an SSH key blob.
#[derive(Default)]
pub struct Writer {
    buf: BytesMut,
}

impl Writer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a length-prefixed `string`.
    ///
    /// # Panics
    ///
    /// Panics if `value` is longer than `u32::MAX` bytes.
    pub fn string(&mut self, value: &[u8]) -> &mut Self {
        self.length(value.len());
        self.buf.put_slice(value);
        self
    }

    /// Append an `mpint` from an unsigned big-endian magnitude.
    ///
    /// # Panics
    ///
    /// Panics if the encoded integer is longer than `u32::MAX` bytes.
    pub fn mpint(&mut self, magnitude: &[u8]) -> &mut Self {
        let start = magnitude
            .iter()
            .position(|&b| b != 0)
            .unwrap_or(magnitude.len());
        let digits = &magnitude[start..];
        let sign_pad = digits.first().is_some_and(|&b| b & 0x80 != 0);

        self.length(digits.len() + usize::from(sign_pad));
        if sign_pad {
            self.buf.put_u8(0);
        }
        self.buf.put_slice(digits);
        self
    }

    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.buf.to_vec()
    }

    fn length(&mut self, len: usize) {
        self.buf.put_u32(field_length(len));
    }
}

fn field_length(len: usize) -> u32 {
    u32::try_from(len).expect("SSH field length exceeds u32::MAX")
}

/// Walks the fields of an SSH key blob.
pub struct Reader<'a> {
    buf: &'a [u8],
}

impl<'a> Reader<'a> {
    #[must_use]
    pub fn new(blob: &'a [u8]) -> Self {
        Self { buf: blob }
    }

    /// Read a length-prefixed `string`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decode` if the blob ends early.
    pub fn string(&mut self) -> Result<&'a [u8], KeyError> {
        if self.buf.remaining() < 4 {
            return Err(KeyError::Decode("truncated SSH key blob".into()));
        }
        let len = self.buf.get_u32() as usize;
        if self.buf.len() < len {
            return Err(KeyError::Decode("truncated SSH key blob".into()));
        }
        let (field, rest) = self.buf.split_at(len);
        self.buf = rest;
        Ok(field)
    }

    /// Read an `mpint` and return its unsigned big-endian magnitude.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decode` for truncated or negative values.
    pub fn mpint(&mut self) -> Result<&'a [u8], KeyError> {
        let field = self.string()?;
        if field.first().is_some_and(|&b| b & 0x80 != 0) {
            return Err(KeyError::Decode("negative mpint in SSH key blob".into()));
        }
        let start = field.iter().position(|&b| b != 0).unwrap_or(field.len());
        Ok(&field[start..])
    }

    /// Read the algorithm name and require it to be `expected`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::AlgorithmMismatch` for a blob of another algorithm.
    pub fn expect_algorithm(&mut self, expected: &'static str) -> Result<(), KeyError> {
        let name = self.string()?;
        if name == expected.as_bytes() {
            Ok(())
        } else {
            Err(KeyError::AlgorithmMismatch {
                expected,
                actual: String::from_utf8_lossy(name).into_owned(),
            })
        }
    }

    /// Require that every byte was consumed.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decode` if bytes remain.
    pub fn finish(self) -> Result<(), KeyError> {
        if self.buf.is_empty() {
            Ok(())
        } else {
            Err(KeyError::Decode(format!(
                "{} trailing bytes in SSH key blob",
                self.buf.len()
            )))
        }
    }
}

/// Algorithm name stored at the front of a key blob.
///
/// # Errors
///
/// Returns `KeyError::Decode` if the blob is truncated or the name is not UTF-8.
pub fn blob_algorithm(blob: &[u8]) -> Result<&str, KeyError> {
    let name = Reader::new(blob).string()?;
    std::str::from_utf8(name).map_err(KeyError::decode)
}

/// One parsed authorized-keys entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedKey {
    /// Algorithm identifier, e.g. `ssh-ed25519`.
    pub algorithm: String,
    /// Decoded key blob.
    pub blob: Vec<u8>,
    /// Trailing comment, if any.
    pub comment: Option<String>,
}

impl AuthorizedKey {
    /// Parse the first key entry in `text`.
    ///
    /// Blank lines and `#` comments are skipped, and a leading options field
    /// (`from="..."`, `no-pty`, ...) is tolerated. The algorithm token must
    /// match the name inside the blob.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decode` if no key entry is found.
    pub fn parse(text: &str) -> Result<Self, KeyError> {
        let line = text
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
            .ok_or_else(|| KeyError::Decode("no SSH public key found".into()))?;

        let tokens: Vec<&str> = line.split_whitespace().collect();
        for (i, pair) in tokens.windows(2).enumerate() {
            let (algorithm, encoded) = (pair[0], pair[1]);
            let Ok(blob) = STANDARD.decode(encoded) else {
                continue;
            };
            if blob_algorithm(&blob).ok() != Some(algorithm) {
                continue;
            }
            let comment = tokens[i + 2..].join(" ");
            return Ok(Self {
                algorithm: algorithm.to_string(),
                blob,
                comment: (!comment.is_empty()).then_some(comment),
            });
        }

        Err(KeyError::Decode("malformed SSH public key line".into()))
    }

    /// Render as `<algorithm> <base64> [comment]` without a trailing newline.
    #[must_use]
    pub fn to_line(&self) -> String {
        format(&self.algorithm, &self.blob, self.comment.as_deref())
    }
}

/// Render an authorized-keys line.
#[must_use]
pub fn format(algorithm: &str, blob: &[u8], comment: Option<&str>) -> String {
    let encoded = STANDARD.encode(blob);
    match comment.map(str::trim).filter(|c| !c.is_empty()) {
        Some(comment) => format!("{algorithm} {encoded} {comment}"),
        None => format!("{algorithm} {encoded}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_blob() -> Vec<u8> {
        let mut writer = Writer::new();
        writer.string(b"ssh-test").string(&[1, 2, 3]);
        writer.finish()
    }

    #[test]
    fn test_writer_reader() {
        let blob = sample_blob();
        assert_eq!(&blob[..4], &[0, 0, 0, 8]);

        let mut reader = Reader::new(&blob);
        reader.expect_algorithm("ssh-test").unwrap();
        assert_eq!(reader.string().unwrap(), &[1, 2, 3]);
        reader.finish().unwrap();
    }

    #[test]
    fn test_mpint_encoding() {
        let mut writer = Writer::new();
        writer.mpint(&[0x00, 0x00, 0x7f]).mpint(&[0x80, 0x01]).mpint(&[]);
        let blob = writer.finish();
        assert_eq!(
            blob,
            vec![0, 0, 0, 1, 0x7f, 0, 0, 0, 3, 0x00, 0x80, 0x01, 0, 0, 0, 0]
        );

        let mut reader = Reader::new(&blob);
        assert_eq!(reader.mpint().unwrap(), &[0x7f]);
        assert_eq!(reader.mpint().unwrap(), &[0x80, 0x01]);
        assert_eq!(reader.mpint().unwrap(), &[] as &[u8]);
        reader.finish().unwrap();
    }

    #[test]
    fn test_long_field_length_prefix() {
        let mut writer = Writer::new();
        writer.string(&[0xab; 300]);
        let blob = writer.finish();
        assert_eq!(&blob[..4], &[0, 0, 1, 0x2c]);
        assert_eq!(Reader::new(&blob).string().unwrap().len(), 300);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    #[should_panic(expected = "exceeds u32::MAX")]
    fn test_field_length_over_u32_panics() {
        let _ = field_length(u32::MAX as usize + 1);
    }

    #[test]
    fn test_reader_rejects_negative_mpint() {
        let blob = [0, 0, 0, 1, 0x80];
        assert!(Reader::new(&blob).mpint().unwrap_err().is_decode());
    }

    #[test]
    fn test_reader_truncated() {
        let blob = sample_blob();
        let mut reader = Reader::new(&blob[..blob.len() - 1]);
        reader.string().unwrap();
        assert!(reader.string().unwrap_err().is_decode());
        assert!(Reader::new(&[0, 0]).string().is_err());
    }

    #[test]
    fn test_reader_trailing_bytes() {
        let mut blob = sample_blob();
        blob.push(0);
        let mut reader = Reader::new(&blob);
        reader.string().unwrap();
        reader.string().unwrap();
        assert!(reader.finish().is_err());
    }

    #[test]
    fn test_expect_algorithm_mismatch() {
        let blob = sample_blob();
        let err = Reader::new(&blob).expect_algorithm("ssh-ed25519").unwrap_err();
        assert_eq!(
            err,
            KeyError::AlgorithmMismatch {
                expected: "ssh-ed25519",
                actual: "ssh-test".into()
            }
        );
    }

    #[test]
    fn test_authorized_key_roundtrip() {
        let blob = sample_blob();
        let line = format("ssh-test", &blob, Some("alice@host"));
        let parsed = AuthorizedKey::parse(&line).unwrap();
        assert_eq!(parsed.algorithm, "ssh-test");
        assert_eq!(parsed.blob, blob);
        assert_eq!(parsed.comment.as_deref(), Some("alice@host"));
        assert_eq!(parsed.to_line(), line);
    }

    #[test]
    fn test_authorized_key_options_and_comments() {
        let blob = sample_blob();
        let text = format!(
            "# deploy keys\n\nno-pty,from=\"10.0.0.1\" {} backup key\n",
            format("ssh-test", &blob, None)
        );
        let parsed = AuthorizedKey::parse(&text).unwrap();
        assert_eq!(parsed.blob, blob);
        assert_eq!(parsed.comment.as_deref(), Some("backup key"));
    }

    #[test]
    fn test_authorized_key_token_must_match_blob() {
        let line = format("ssh-other", &sample_blob(), None);
        assert!(AuthorizedKey::parse(&line).unwrap_err().is_decode());
    }

    #[test]
    fn test_authorized_key_garbage() {
        assert!(AuthorizedKey::parse("").is_err());
        assert!(AuthorizedKey::parse("# only a comment").is_err());
        assert!(AuthorizedKey::parse("ssh-ed25519 !!!not-base64!!!").is_err());
    }
}
