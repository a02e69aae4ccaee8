//! `sigil.toml` configuration.
//!
//! ```toml
//! [keygen]
//! algorithm = "ecdsa"
//! curve = "P-384"
//! dsa_sizes = "L2048N256"
//! comment = "ops@example"
//! ```
//!
//! Every key is optional; command-line flags win over the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sigil_keys::dsa::ParameterSizes;
use sigil_keys::ecdsa::Curve;
use sigil_keys::Algorithm;

/// Top-level configuration file.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keygen: KeygenConfig,
}

/// Defaults for `sigil keygen` and `sigil params`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeygenConfig {
    pub algorithm: Option<Algorithm>,
    pub curve: Option<String>,
    pub dsa_sizes: Option<String>,
    pub comment: Option<String>,
}

/// Fully resolved key generation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeygenRequest {
    pub algorithm: Algorithm,
    pub curve: Curve,
    pub sizes: ParameterSizes,
    pub comment: Option<String>,
}

impl Config {
    /// Load from `explicit`, or from the platform config directory.
    ///
    /// An explicit path must exist; a missing default file means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("no configuration file, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// `<config dir>/sigil.toml`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "sigil", "sigil")
            .map(|dirs| dirs.config_dir().join("sigil.toml"))
    }
}

impl KeygenConfig {
    /// The configured curve, or P-256.
    pub fn curve(&self) -> Result<Curve> {
        match &self.curve {
            Some(name) => name
                .parse()
                .with_context(|| format!("Invalid curve in config: {name}")),
            None => Ok(Curve::default()),
        }
    }

    /// The configured DSA sizes, or L2048N256.
    pub fn dsa_sizes(&self) -> Result<ParameterSizes> {
        match &self.dsa_sizes {
            Some(name) => name
                .parse()
                .with_context(|| format!("Invalid dsa_sizes in config: {name}")),
            None => Ok(ParameterSizes::default()),
        }
    }

    /// Merge command-line flags over the configured defaults.
    pub fn resolve(
        &self,
        algorithm: Option<Algorithm>,
        curve: Option<Curve>,
        sizes: Option<ParameterSizes>,
        comment: Option<String>,
    ) -> Result<KeygenRequest> {
        Ok(KeygenRequest {
            algorithm: algorithm.or(self.algorithm).unwrap_or_default(),
            curve: match curve {
                Some(curve) => curve,
                None => self.curve()?,
            },
            sizes: match sizes {
                Some(sizes) => sizes,
                None => self.dsa_sizes()?,
            },
            comment: comment.or_else(|| self.comment.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sigil.toml");
        std::fs::write(
            &path,
            "[keygen]\nalgorithm = \"ecdsa\"\ncurve = \"secp384r1\"\ncomment = \"ops@example\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.keygen.algorithm, Some(Algorithm::Ecdsa));
        assert_eq!(config.keygen.curve().unwrap(), Curve::P384);
        assert_eq!(config.keygen.dsa_sizes().unwrap(), ParameterSizes::L2048N256);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read config"));
    }

    #[test]
    fn test_invalid_values() {
        let config: Config = toml::from_str("[keygen]\ncurve = \"P-192\"\n").unwrap();
        assert!(config.keygen.curve().is_err());

        assert!(toml::from_str::<Config>("[keygen]\nalgorithm = \"rsa\"\n").is_err());
    }

    #[test]
    fn test_flags_override_config() {
        let config: Config =
            toml::from_str("[keygen]\nalgorithm = \"dsa\"\ndsa_sizes = \"L3072N256\"\ncomment = \"file\"\n")
                .unwrap();

        let request = config
            .keygen
            .resolve(None, None, None, Some("flag".to_string()))
            .unwrap();
        assert_eq!(request.algorithm, Algorithm::Dsa);
        assert_eq!(request.sizes, ParameterSizes::L3072N256);
        assert_eq!(request.comment.as_deref(), Some("flag"));

        let request = config
            .keygen
            .resolve(Some(Algorithm::Ed25519), Some(Curve::P521), None, None)
            .unwrap();
        assert_eq!(request.algorithm, Algorithm::Ed25519);
        assert_eq!(request.curve, Curve::P521);
        assert_eq!(request.comment.as_deref(), Some("file"));
    }

    #[test]
    fn test_empty_config_defaults() {
        let config: Config = toml::from_str("").unwrap();
        let request = config.keygen.resolve(None, None, None, None).unwrap();
        assert_eq!(request.algorithm, Algorithm::Ed25519);
        assert_eq!(request.curve, Curve::P256);
        assert_eq!(request.comment, None);
    }
}
