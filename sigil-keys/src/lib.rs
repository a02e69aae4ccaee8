//! Asymmetric keys and digital signatures for three algorithm families.
//!
//! This crate is intentionally IO-free:
//! - No filesystem operations
//! - No network calls
//! - No logging
//!
//! Callers hand in and take back text (PEM blocks, SSH authorized-keys lines)
//! and byte strings; reading and writing them is the caller's job.
//!
//! Each algorithm lives in its own module with the same four-entity shape:
//! - [`ed25519`] - deterministic Ed25519 signatures
//! - [`ecdsa`] - ECDSA over P-256, P-384 and P-521 with SHA-256
//! - [`dsa`] - legacy DSA with SHA-256
//!
//! Every module exposes `PrivateKey`, `PublicKey`, `Signature` and a
//! `KeyPair` alias of the generic [`KeyPair`]. The [`PrivateKeyOps`] and
//! [`PublicKeyOps`] traits are the only shared surface; [`any`] provides a
//! tagged union for callers that only learn the algorithm at runtime.
//!
//! # Example
//!
//! ```
//! use sigil_keys::ed25519;
//!
//! let pair = ed25519::KeyPair::generate().unwrap();
//! let signature = pair.private_key().sign(b"abcdefg12345");
//!
//! assert!(pair.public_key().verify(b"abcdefg12345", &signature));
//! assert!(!pair.public_key().verify(b"abcdefg12346", &signature));
//! ```

pub mod any;
pub mod dsa;
pub mod ecdsa;
pub mod ed25519;
pub mod encoding;

mod error;
mod fingerprint;
mod keypair;
mod random;
mod secret;
mod rs_signature;
mod traits;

pub use any::{Algorithm, AnyPrivateKey, AnyPublicKey, AnySignature};
pub use encoding::ssh::AuthorizedKey;
pub use error::KeyError;
pub use fingerprint::Fingerprint;
pub use keypair::KeyPair;
pub use secret::SecretBytes;
pub use rs_signature::RsSignature;
pub use traits::{PrivateKeyOps, PublicKeyOps};
