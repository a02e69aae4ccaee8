//! `sigil keygen` and `sigil params`.

use std::path::Path;

use anyhow::{bail, Context, Result};
use sigil_keys::dsa::{DomainParameters, ParameterSizes};
use sigil_keys::{dsa, ecdsa, ed25519, Algorithm, AnyPrivateKey};

use crate::config::KeygenRequest;
use crate::files;

/// Generate a private key for `request`, reusing DSA parameters from
/// `params` when given.
pub fn generate(request: &KeygenRequest, params: Option<&Path>) -> Result<AnyPrivateKey> {
    if params.is_some() && request.algorithm != Algorithm::Dsa {
        bail!("--params only applies to DSA keys");
    }

    let key = match request.algorithm {
        Algorithm::Ed25519 => AnyPrivateKey::from(ed25519::PrivateKey::generate()?),
        Algorithm::Ecdsa => AnyPrivateKey::from(ecdsa::PrivateKey::generate(request.curve)?),
        Algorithm::Dsa => {
            let parameters = match params {
                Some(path) => {
                    let text = files::read_text(path)?;
                    DomainParameters::from_pem(&text).with_context(|| {
                        format!("Failed to parse DSA parameters at {}", path.display())
                    })?
                }
                None => {
                    warn_if_weak(request.sizes);
                    tracing::info!(sizes = %request.sizes, "generating DSA parameters");
                    DomainParameters::generate(request.sizes)?
                }
            };
            if let Some(sizes) = parameters.sizes() {
                warn_if_weak(sizes);
            }
            AnyPrivateKey::from(dsa::PrivateKey::generate_with_parameters(&parameters)?)
        }
    };

    tracing::debug!(algorithm = %key.algorithm(), "generated key");
    Ok(key)
}

fn warn_if_weak(sizes: ParameterSizes) {
    if sizes.is_weak() {
        tracing::warn!(%sizes, "DSA parameter sizes are below current minimum strength");
    }
}

pub fn cmd_keygen(
    request: &KeygenRequest,
    params: Option<&Path>,
    output: &Path,
    force: bool,
    json: bool,
) -> Result<()> {
    let pem_path = files::with_suffix(output, ".pub.pem");
    let ssh_path = files::with_suffix(output, ".pub");
    files::ensure_writable(&[output, &pem_path, &ssh_path], force)?;

    let key = generate(request, params)?;
    let public_key = key.public_key();
    let authorized_key = public_key.to_authorized_key(request.comment.as_deref());
    let fingerprint = public_key.fingerprint();

    files::write_private(output, &key.to_pem()?)?;
    files::write_public(&pem_path, &public_key.to_pem()?)?;
    files::write_public(&ssh_path, &format!("{authorized_key}\n"))?;

    if json {
        println!(
            "{}",
            serde_json::to_string(&serde_json::json!({
                "algorithm": key.algorithm(),
                "private_key": output.display().to_string(),
                "public_key_pem": pem_path.display().to_string(),
                "public_key_ssh": ssh_path.display().to_string(),
                "fingerprint": fingerprint,
            }))?
        );
    } else {
        eprintln!("Generated {} key", key.algorithm());
        eprintln!("  Private key: {}", output.display());
        eprintln!("  Public key:  {}", pem_path.display());
        eprintln!("  SSH key:     {}", ssh_path.display());
        println!("{fingerprint}");
    }

    Ok(())
}

pub fn cmd_params(sizes: ParameterSizes, output: Option<&Path>, json: bool) -> Result<()> {
    warn_if_weak(sizes);
    tracing::info!(%sizes, "generating DSA parameters");

    let parameters = DomainParameters::generate(sizes)?;
    let text = parameters.to_pem()?;

    match output {
        Some(path) => {
            files::write_public(path, &text)?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string(&serde_json::json!({
                        "sizes": sizes.to_string(),
                        "path": path.display().to_string(),
                    }))?
                );
            } else {
                eprintln!("Wrote {sizes} parameters to {}", path.display());
            }
        }
        None => print!("{text}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_keys::ecdsa::Curve;
    use tracing_test::traced_test;

    fn request(algorithm: Algorithm) -> KeygenRequest {
        KeygenRequest {
            algorithm,
            curve: Curve::P384,
            sizes: ParameterSizes::L2048N256,
            comment: Some("test@example".to_string()),
        }
    }

    #[test]
    fn test_keygen_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("id_ecdsa");

        cmd_keygen(&request(Algorithm::Ecdsa), None, &output, false, false).unwrap();

        let key = AnyPrivateKey::from_pem(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let pem = std::fs::read_to_string(dir.path().join("id_ecdsa.pub.pem")).unwrap();
        let ssh = std::fs::read_to_string(dir.path().join("id_ecdsa.pub")).unwrap();

        assert_eq!(key.algorithm(), Algorithm::Ecdsa);
        assert!(ssh.starts_with("ecdsa-sha2-nistp384 "));
        assert!(ssh.trim_end().ends_with(" test@example"));
        assert_eq!(
            sigil_keys::AnyPublicKey::parse(&pem).unwrap(),
            key.public_key()
        );
    }

    #[test]
    fn test_keygen_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("id");
        std::fs::write(&output, "keep").unwrap();

        let err = cmd_keygen(&request(Algorithm::Ed25519), None, &output, false, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "keep");

        cmd_keygen(&request(Algorithm::Ed25519), None, &output, true, false).unwrap();
        assert!(std::fs::read_to_string(&output).unwrap().contains("ED25519 PRIVATE KEY"));
    }

    #[test]
    fn test_dsa_reuses_parameter_file() {
        let dir = tempfile::tempdir().unwrap();
        let params = dir.path().join("dsa.params.pem");
        std::fs::write(
            &params,
            include_str!("../../../sigil-keys/tests/fixtures/dsa_2048_256.params.pem"),
        )
        .unwrap();

        let key = generate(&request(Algorithm::Dsa), Some(&params)).unwrap();
        let AnyPrivateKey::Dsa(key) = key else {
            panic!("expected a DSA key");
        };
        assert_eq!(key.sizes(), Some(ParameterSizes::L2048N256));
        assert_eq!(
            key.parameters(),
            DomainParameters::from_pem(&std::fs::read_to_string(&params).unwrap()).unwrap()
        );
    }

    #[traced_test]
    #[test]
    fn test_weak_dsa_sizes_are_accepted_with_warning() {
        let sizes: ParameterSizes = "L1024N160".parse().unwrap();
        assert!(sizes.is_weak());

        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("id_dsa");
        let request = KeygenRequest {
            sizes,
            ..request(Algorithm::Dsa)
        };
        cmd_keygen(&request, None, &output, false, true).unwrap();

        assert!(logs_contain("below current minimum strength"));
        let key = AnyPrivateKey::from_pem(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let AnyPrivateKey::Dsa(key) = key else {
            panic!("expected a DSA key");
        };
        assert_eq!(key.sizes(), Some(sizes));
    }

    #[traced_test]
    #[test]
    fn test_standard_dsa_sizes_do_not_warn() {
        let dir = tempfile::tempdir().unwrap();
        let params = dir.path().join("dsa.params.pem");
        std::fs::write(
            &params,
            include_str!("../../../sigil-keys/tests/fixtures/dsa_2048_256.params.pem"),
        )
        .unwrap();

        generate(&request(Algorithm::Dsa), Some(&params)).unwrap();
        assert!(!logs_contain("below current minimum strength"));
    }

    #[test]
    fn test_params_flag_needs_dsa() {
        let dir = tempfile::tempdir().unwrap();
        let params = dir.path().join("dsa.params.pem");
        let err = generate(&request(Algorithm::Ed25519), Some(&params))
            .err()
            .expect("--params with Ed25519 must fail");
        assert!(err.to_string().contains("DSA"));
    }
}
