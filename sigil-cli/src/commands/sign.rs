//! `sigil sign` and `sigil verify`.
//!
//! Signatures are stored as a single line of standard base64: the raw 64
//! bytes for Ed25519, DER `(r, s)` for ECDSA and DSA.

use std::path::Path;

use anyhow::{bail, Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sigil_keys::{AnyPrivateKey, AnyPublicKey, AnySignature};
use zeroize::Zeroizing;

use crate::files;

/// Load a private key PEM of any algorithm.
pub fn load_private_key(path: &Path) -> Result<AnyPrivateKey> {
    let text = Zeroizing::new(files::read_text(path)?);
    AnyPrivateKey::from_pem(&text)
        .with_context(|| format!("Failed to parse private key at {}", path.display()))
}

/// Load a public key from a PEM file or an authorized-keys line.
pub fn load_public_key(path: &Path) -> Result<AnyPublicKey> {
    let text = files::read_text(path)?;
    AnyPublicKey::parse(&text)
        .with_context(|| format!("Failed to parse public key at {}", path.display()))
}

pub fn encode_signature(signature: &AnySignature) -> Result<String> {
    Ok(STANDARD.encode(signature.to_bytes()?))
}

pub fn decode_signature(public_key: &AnyPublicKey, text: &str) -> Result<AnySignature> {
    let bytes = STANDARD
        .decode(text.trim())
        .context("Signature is not valid base64")?;
    AnySignature::from_bytes(public_key.algorithm(), &bytes)
        .with_context(|| format!("Malformed {} signature", public_key.algorithm()))
}

pub fn cmd_sign(key: &Path, input: &Path, output: Option<&Path>, json: bool) -> Result<()> {
    let key = load_private_key(key)?;
    let message = files::read_input(input)?;

    let signature = encode_signature(&key.sign(&message)?)?;
    tracing::debug!(algorithm = %key.algorithm(), bytes = message.len(), "signed input");

    if let Some(path) = output {
        files::write_public(path, &format!("{signature}\n"))?;
    }

    if json {
        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({
                "algorithm": key.algorithm(),
                "fingerprint": key.public_key().fingerprint(),
                "signature": signature,
            }))?
        );
    } else if output.is_none() {
        println!("{signature}");
    }

    Ok(())
}

pub fn cmd_verify(public_key: &Path, input: &Path, signature: &Path, json: bool) -> Result<()> {
    let public_key = load_public_key(public_key)?;
    let message = files::read_input(input)?;
    let signature = decode_signature(&public_key, &files::read_text(signature)?)?;

    let valid = public_key.verify(&message, &signature);
    let fingerprint = public_key.fingerprint();

    if json {
        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({
                "valid": valid,
                "algorithm": public_key.algorithm(),
                "fingerprint": fingerprint,
            }))?
        );
    } else if valid {
        println!("OK");
    } else {
        println!("FAILED");
    }

    if !valid {
        tracing::warn!(%fingerprint, "signature verification failed");
        bail!("signature does not match");
    }

    Ok(())
}
