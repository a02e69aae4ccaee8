//! `sigil convert` and `sigil fingerprint`.

use std::path::Path;

use anyhow::{bail, Result};
use sigil_keys::AnyPublicKey;
use zeroize::Zeroizing;

use super::sign::{load_private_key, load_public_key};
use crate::{files, PublicFormat};

/// Re-encode a public key as PEM or an authorized-keys line.
pub fn convert(public_key: &AnyPublicKey, to: PublicFormat, comment: Option<&str>) -> Result<String> {
    Ok(match to {
        PublicFormat::Pem => public_key.to_pem()?,
        PublicFormat::Ssh => format!("{}\n", public_key.to_authorized_key(comment)),
    })
}

pub fn cmd_convert(path: &Path, to: PublicFormat, comment: Option<&str>) -> Result<()> {
    let public_key = load_public_key(path)?;
    if comment.is_some() && matches!(to, PublicFormat::Pem) {
        tracing::warn!("--comment is ignored for PEM output");
    }
    print!("{}", convert(&public_key, to, comment)?);
    Ok(())
}

/// Fingerprint of a public key file, or of the public half of a private key.
pub fn fingerprint_of(path: &Path) -> Result<AnyPublicKey> {
    let text = Zeroizing::new(files::read_text(path)?);
    if text.contains("PRIVATE KEY-----") {
        return Ok(load_private_key(path)?.public_key());
    }
    match AnyPublicKey::parse(&text) {
        Ok(public_key) => Ok(public_key),
        Err(e) => bail!("{} is not a recognised key: {e}", path.display()),
    }
}

pub fn cmd_fingerprint(path: &Path, json: bool) -> Result<()> {
    let public_key = fingerprint_of(path)?;
    let fingerprint = public_key.fingerprint();

    if json {
        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({
                "algorithm": public_key.algorithm(),
                "ssh_algorithm": public_key.ssh_algorithm(),
                "fingerprint": fingerprint,
            }))?
        );
    } else {
        println!("{fingerprint} ({})", public_key.ssh_algorithm());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_keys::{ecdsa, AnyPrivateKey};

    #[test]
    fn test_convert_between_forms() {
        let key = AnyPrivateKey::from(ecdsa::PrivateKey::generate(ecdsa::Curve::P521).unwrap());
        let public_key = key.public_key();

        let line = convert(&public_key, PublicFormat::Ssh, Some("ops")).unwrap();
        assert!(line.starts_with("ecdsa-sha2-nistp521 "));
        assert!(line.ends_with(" ops\n"));

        let pem = convert(&AnyPublicKey::parse(&line).unwrap(), PublicFormat::Pem, None).unwrap();
        assert!(pem.starts_with("-----BEGIN PUBLIC KEY-----"));
        assert_eq!(AnyPublicKey::parse(&pem).unwrap(), public_key);
    }

    #[test]
    fn test_fingerprint_of_private_and_public_files_agree() {
        let dir = tempfile::tempdir().unwrap();
        let key = AnyPrivateKey::from(sigil_keys::ed25519::PrivateKey::generate().unwrap());
        let private = dir.path().join("id");
        let public = dir.path().join("id.pub");
        std::fs::write(&private, key.to_pem().unwrap().as_str()).unwrap();
        std::fs::write(&public, key.public_key().to_authorized_key(None)).unwrap();

        let from_private = fingerprint_of(&private).unwrap().fingerprint();
        let from_public = fingerprint_of(&public).unwrap().fingerprint();
        assert_eq!(from_private, from_public);
        assert_eq!(from_private, key.public_key().fingerprint());
    }

    #[test]
    fn test_fingerprint_of_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk");
        std::fs::write(&path, "hello").unwrap();
        assert!(fingerprint_of(&path).is_err());
    }
}
