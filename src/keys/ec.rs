use crate::algorithm::AlgorithmId;
use crate::error::{Error, Result};

use der::asn1::{BitStringRef, ObjectIdentifier, OctetStringRef};
use der::{Decode, Sequence};

const P256_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7");
const P384_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");
const P521_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.35");

/// ECDSA curve identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcdsaCurve {
    /// P-256 (secp256r1) curve
    P256,
    /// P-384 (secp384r1) curve
    P384,
    /// P-521 (secp521r1) curve
    P521,
}

impl EcdsaCurve {
    /// Curve mandated for an ECDSA algorithm, `None` for other families
    pub const fn for_algorithm(algorithm: AlgorithmId) -> Option<Self> {
        match algorithm {
            AlgorithmId::ES256 => Some(EcdsaCurve::P256),
            AlgorithmId::ES384 => Some(EcdsaCurve::P384),
            AlgorithmId::ES512 => Some(EcdsaCurve::P521),
            _ => None,
        }
    }

    /// NIST curve name
    pub const fn name(&self) -> &'static str {
        match self {
            EcdsaCurve::P256 => "P-256",
            EcdsaCurve::P384 => "P-384",
            EcdsaCurve::P521 => "P-521",
        }
    }

    fn from_oid(oid: &ObjectIdentifier) -> Option<Self> {
        [
            (P256_OID, EcdsaCurve::P256),
            (P384_OID, EcdsaCurve::P384),
            (P521_OID, EcdsaCurve::P521),
        ]
        .into_iter()
        .find_map(|(known, curve)| (known == *oid).then_some(curve))
    }
}

impl std::fmt::Display for EcdsaCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// SEC1 private key structure for DER decoding
///
/// Represents ECPrivateKey as defined in RFC 5915:
/// ECPrivateKey ::= SEQUENCE {
///     version        INTEGER { ecPrivkeyVer1(1) },
///     privateKey     OCTET STRING,
///     parameters [0] ECParameters {{ NamedCurve }} OPTIONAL,
///     publicKey  [1] BIT STRING OPTIONAL
/// }
#[derive(Sequence)]
struct EcPrivateKey<'a> {
    version: u8,
    private_key: OctetStringRef<'a>,
    #[asn1(context_specific = "0", optional = "true")]
    parameters: Option<ObjectIdentifier>,
    #[allow(dead_code)]
    #[asn1(context_specific = "1", optional = "true")]
    public_key: Option<BitStringRef<'a>>,
}

/// Identify the named curve of a DER-encoded SEC1 private key
pub(crate) fn sec1_curve(der: &[u8]) -> Result<EcdsaCurve> {
    let key = EcPrivateKey::from_der(der).map_err(|e| {
        tracing::debug!("rejected EC private key structure: {e}");
        Error::KeyInvalid(format!("expected SEC1 EC private key: {e}"))
    })?;

    if key.version != 1 || key.private_key.as_bytes().is_empty() {
        return Err(Error::KeyInvalid("malformed SEC1 EC private key".into()));
    }

    let oid = key
        .parameters
        .ok_or_else(|| Error::KeyInvalid("EC private key does not name its curve".into()))?;

    EcdsaCurve::from_oid(&oid)
        .ok_or_else(|| Error::KeyInvalid(format!("unsupported EC curve: {oid}")))
}
