//! Interchange formats shared by the algorithm modules.
//!
//! - [`pem`] - PEM armor with label checking
//! - [`asn1`] - algorithm and curve identifiers inside PKCS#8 / SPKI containers
//! - [`ssh`] - SSH wire encoding and authorized-keys lines

pub mod asn1;
pub mod pem;
pub mod ssh;
