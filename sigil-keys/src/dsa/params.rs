use ::dsa::{BigUint, Components, KeySize};
use der::{Decode, Encode};

use crate::encoding::pem;
use crate::{random, KeyError};

/// PEM label for a bare `Dss-Parms` structure.
pub const PARAMETERS_LABEL: &str = "DSA PARAMETERS";

/// FIPS 186 `(L, N)` sizes: bit lengths of the prime `p` and the subgroup
/// order `q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParameterSizes {
    /// L = 1024, N = 160.
    #[deprecated(note = "L1024N160 offers under 112 bits of security; use L2048N256 or larger")]
    L1024N160,
    /// L = 2048, N = 224.
    L2048N224,
    /// L = 2048, N = 256.
    #[default]
    L2048N256,
    /// L = 3072, N = 256.
    L3072N256,
}

impl ParameterSizes {
    /// Every size, weakest first.
    pub const ALL: [ParameterSizes; 4] = [
        ParameterSizes::L1024N160,
        ParameterSizes::L2048N224,
        ParameterSizes::L2048N256,
        ParameterSizes::L3072N256,
    ];

    /// `(L, N)` in bits.
    #[must_use]
    pub const fn bits(self) -> (usize, usize) {
        match self {
            ParameterSizes::L1024N160 => (1024, 160),
            ParameterSizes::L2048N224 => (2048, 224),
            ParameterSizes::L2048N256 => (2048, 256),
            ParameterSizes::L3072N256 => (3072, 256),
        }
    }

    /// Whether this size is below current minimum strength.
    #[must_use]
    pub const fn is_weak(self) -> bool {
        matches!(self, ParameterSizes::L1024N160)
    }

    /// Find the size with these bit lengths.
    #[must_use]
    pub fn from_bits(l: usize, n: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|sizes| sizes.bits() == (l, n))
    }

    fn key_size(self) -> KeySize {
        match self {
            ParameterSizes::L1024N160 => KeySize::DSA_1024_160,
            ParameterSizes::L2048N224 => KeySize::DSA_2048_224,
            ParameterSizes::L2048N256 => KeySize::DSA_2048_256,
            ParameterSizes::L3072N256 => KeySize::DSA_3072_256,
        }
    }
}

impl std::fmt::Display for ParameterSizes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (l, n) = self.bits();
        write!(f, "L{l}N{n}")
    }
}

impl std::str::FromStr for ParameterSizes {
    type Err = KeyError;

    /// Accepts `L2048N256` as well as `2048/256` and `2048-256`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let parsed = match lower.strip_prefix('l').and_then(|rest| rest.split_once('n')) {
            Some(pair) => Some(pair),
            None => lower.split_once(['/', '-']),
        };
        parsed
            .and_then(|(l, n)| Some((l.parse::<usize>().ok()?, n.parse::<usize>().ok()?)))
            .and_then(|(l, n)| Self::from_bits(l, n))
            .ok_or_else(|| KeyError::Decode(format!("unknown DSA parameter sizes: {s}")))
    }
}

/// Shared DSA domain parameters `(p, q, g)`.
///
/// Generating these is slow (seconds for L2048, longer for L3072), so one
/// set is usually made once and reused for many keys.
#[derive(Clone, PartialEq)]
pub struct DomainParameters(Components);

impl DomainParameters {
    /// Generate fresh parameters of the given sizes.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::ParameterGeneration` if the random source fails.
    pub fn generate(sizes: ParameterSizes) -> Result<Self, KeyError> {
        let mut rng = random::generation_rng()
            .map_err(|err| KeyError::ParameterGeneration(err.to_string()))?;
        Ok(Self(Components::generate(&mut rng, sizes.key_size())))
    }

    /// Build parameters from big-endian `p`, `q` and `g`.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decode` if the values are out of range, the sizes
    /// are not a standard `(L, N)` pair or `g` does not generate the order
    /// `q` subgroup of `p`.
    pub fn from_components(p: &[u8], q: &[u8], g: &[u8]) -> Result<Self, KeyError> {
        let components = Components::from_components(
            BigUint::from_bytes_be(p),
            BigUint::from_bytes_be(q),
            BigUint::from_bytes_be(g),
        )
        .map_err(|_| KeyError::Decode("invalid DSA domain parameters".into()))?;
        Self::checked(components)
    }

    /// The prime modulus `p`, big-endian.
    #[must_use]
    pub fn p(&self) -> Vec<u8> {
        self.0.p().to_bytes_be()
    }

    /// The subgroup order `q`, big-endian.
    #[must_use]
    pub fn q(&self) -> Vec<u8> {
        self.0.q().to_bytes_be()
    }

    /// The generator `g`, big-endian.
    #[must_use]
    pub fn g(&self) -> Vec<u8> {
        self.0.g().to_bytes_be()
    }

    /// The standard size these parameters match, if any.
    #[must_use]
    pub fn sizes(&self) -> Option<ParameterSizes> {
        ParameterSizes::from_bits(self.0.p().bits(), self.0.q().bits())
    }

    /// Export as `Dss-Parms` DER.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if DER encoding fails.
    pub fn to_der(&self) -> Result<Vec<u8>, KeyError> {
        self.0.to_der().map_err(KeyError::encode)
    }

    /// Import `Dss-Parms` DER.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Decode` for malformed DER or parameters that fail
    /// the checks of [`DomainParameters::from_components`].
    pub fn from_der(der: &[u8]) -> Result<Self, KeyError> {
        Self::checked(Components::from_der(der)?)
    }

    /// Export as a `DSA PARAMETERS` PEM block.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::Encode` if DER encoding fails.
    pub fn to_pem(&self) -> Result<String, KeyError> {
        Ok(pem::encode(PARAMETERS_LABEL, &self.to_der()?))
    }

    /// Import a `DSA PARAMETERS` PEM block.
    ///
    /// # Errors
    ///
    /// Returns `KeyError::UnexpectedLabel` for another label and
    /// `KeyError::Decode` for malformed content.
    pub fn from_pem(text: &str) -> Result<Self, KeyError> {
        let block = pem::decode(text, &[PARAMETERS_LABEL])?;
        Self::from_der(block.der())
    }

    pub(crate) fn components(&self) -> &Components {
        &self.0
    }

    pub(crate) fn from_inner(components: Components) -> Self {
        Self(components)
    }

    /// Wrap decoded components once `(L, N)` is a standard size, `q` divides
    /// `p - 1` and `g` has order `q` modulo `p`.
    pub(crate) fn checked(components: Components) -> Result<Self, KeyError> {
        let (p, q, g) = (components.p(), components.q(), components.g());
        let (l, n) = (p.bits(), q.bits());
        if ParameterSizes::from_bits(l, n).is_none() {
            return Err(KeyError::Decode(format!(
                "non-standard DSA parameter sizes L{l}N{n}"
            )));
        }

        let zero = BigUint::from(0u8);
        let one = BigUint::from(1u8);
        if (p - &one) % q != zero {
            return Err(KeyError::Decode("DSA q does not divide p - 1".into()));
        }
        if *g <= one || g >= p || g.modpow(q, p) != one {
            return Err(KeyError::Decode("DSA generator is not of order q".into()));
        }
        Ok(Self(components))
    }
}

impl std::fmt::Debug for DomainParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sizes() {
            Some(sizes) => write!(f, "DomainParameters({sizes})"),
            None => write!(
                f,
                "DomainParameters(L{}N{})",
                self.0.p().bits(),
                self.0.q().bits()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../tests/fixtures/dsa_2048_256.params.pem");

    #[test]
    fn test_sizes_parse_and_display() {
        assert_eq!(
            "L2048N256".parse::<ParameterSizes>().unwrap(),
            ParameterSizes::L2048N256
        );
        assert_eq!(
            "3072/256".parse::<ParameterSizes>().unwrap(),
            ParameterSizes::L3072N256
        );
        assert_eq!(
            "2048-224".parse::<ParameterSizes>().unwrap(),
            ParameterSizes::L2048N224
        );
        assert!("L4096N256".parse::<ParameterSizes>().is_err());
        assert!("garbage".parse::<ParameterSizes>().is_err());
        assert_eq!(ParameterSizes::L3072N256.to_string(), "L3072N256");
    }

    #[test]
    fn test_default_is_not_weak() {
        assert_eq!(ParameterSizes::default(), ParameterSizes::L2048N256);
        assert!(!ParameterSizes::default().is_weak());
        assert!(ParameterSizes::L1024N160.is_weak());
    }

    #[test]
    fn test_parameters_pem_roundtrip() {
        let params = DomainParameters::from_pem(FIXTURE).unwrap();
        assert_eq!(params.sizes(), Some(ParameterSizes::L2048N256));
        assert_eq!(params.p().len(), 256);
        assert_eq!(params.q().len(), 32);

        let text = params.to_pem().unwrap();
        assert_eq!(DomainParameters::from_pem(&text).unwrap(), params);
    }

    #[test]
    fn test_parameters_wrong_label() {
        let text = FIXTURE.replace("DSA PARAMETERS", "EC PARAMETERS");
        assert!(DomainParameters::from_pem(&text)
            .unwrap_err()
            .is_type_mismatch());
    }

    #[test]
    fn test_from_components_rejects_garbage() {
        assert!(DomainParameters::from_components(&[1], &[1], &[0]).is_err());

        let params = DomainParameters::from_pem(FIXTURE).unwrap();
        let rebuilt =
            DomainParameters::from_components(&params.p(), &params.q(), &params.g()).unwrap();
        assert_eq!(rebuilt, params);
    }

    #[test]
    fn test_from_components_checks_group_structure() {
        let small = DomainParameters::from_components(&[7], &[2], &[6]).unwrap_err();
        assert!(small.to_string().contains("non-standard"), "{small}");

        let params = DomainParameters::from_pem(FIXTURE).unwrap();
        let p = BigUint::from_bytes_be(&params.p());
        let q = BigUint::from_bytes_be(&params.q());

        let not_a_divisor = (&q - BigUint::from(2u8)).to_bytes_be();
        let err = DomainParameters::from_components(&params.p(), &not_a_divisor, &params.g())
            .unwrap_err();
        assert!(err.to_string().contains("does not divide"), "{err}");

        let order_two = (&p - BigUint::from(1u8)).to_bytes_be();
        for g in [vec![1], order_two, params.p()] {
            let err = DomainParameters::from_components(&params.p(), &params.q(), &g).unwrap_err();
            assert!(err.is_decode(), "{err}");
        }
    }

    #[test]
    fn test_generate_small_parameters() {
        let params = DomainParameters::generate(ParameterSizes::L1024N160).unwrap();
        assert_eq!(params.sizes(), Some(ParameterSizes::L1024N160));
    }
}
