use crate::algorithm::AlgorithmId;
use crate::algorithm::traits::algorithm_facade;
use crate::error::{Error, Result};
use crate::keys::{EcdsaCurve, decode_single_pem, sec1_curve};

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    self, EcdsaKeyPair, EcdsaSigningAlgorithm, EcdsaVerificationAlgorithm, KeyPair,
    UnparsedPublicKey,
};

algorithm_facade!(
    /// ES256 algorithm (ECDSA with P-256 and SHA-256)
    ES256,
    EcdsaEngine,
    AlgorithmId::ES256
);

algorithm_facade!(
    /// ES384 algorithm (ECDSA with P-384 and SHA-384)
    ES384,
    EcdsaEngine,
    AlgorithmId::ES384
);

algorithm_facade!(
    /// ES512 algorithm (ECDSA with P-521 and SHA-512)
    ES512,
    EcdsaEngine,
    AlgorithmId::ES512
);

/// ECDSA engine shared by the ES* facades
///
/// Signatures are ASN.1 DER encoded `ECDSA-Sig-Value` structures.
struct EcdsaEngine {
    algorithm: AlgorithmId,
    curve: EcdsaCurve,
    key_pair: EcdsaKeyPair,
    public_key: Vec<u8>,
    verification: &'static EcdsaVerificationAlgorithm,
}

impl EcdsaEngine {
    fn new(algorithm: AlgorithmId, key: &[u8]) -> Result<Self> {
        let required = EcdsaCurve::for_algorithm(algorithm)
            .ok_or_else(|| Error::AlgorithmUnsupported(algorithm.to_string()))?;

        let block = decode_single_pem(key)?;
        let actual = sec1_curve(block.contents())?;

        // Strength is checked here, never at sign/verify time
        if actual != required {
            tracing::debug!(
                algorithm = algorithm.as_str(),
                expected = required.name(),
                actual = actual.name(),
                "EC private key curve does not match algorithm"
            );
            return Err(Error::CurveMismatch {
                algorithm: algorithm.to_string(),
                expected: required.to_string(),
                actual: actual.to_string(),
            });
        }

        let (signing, verification) = curve_algorithms(required);
        let key_pair = EcdsaKeyPair::from_private_key_der(signing, block.contents()).map_err(|e| {
            tracing::debug!(curve = required.name(), "rejected EC private key: {e}");
            Error::KeyInvalid(format!("expected SEC1 EC private key: {e}"))
        })?;
        let public_key = key_pair.public_key().as_ref().to_vec();

        Ok(Self {
            algorithm,
            curve: required,
            key_pair,
            public_key,
            verification,
        })
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let rng = SystemRandom::new();

        self.key_pair
            .sign(&rng, data)
            .map(|signature| signature.as_ref().to_vec())
            .map_err(|_| Error::Crypto(format!("{} signing failed", self.algorithm)))
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        UnparsedPublicKey::new(self.verification, &self.public_key)
            .verify(data, signature)
            .map_err(|_| Error::SignatureInvalid)
    }

    fn name(&self) -> &'static str {
        self.algorithm.as_str()
    }
}

impl std::fmt::Debug for EcdsaEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcdsaEngine")
            .field("algorithm", &self.algorithm)
            .field("curve", &self.curve)
            .finish_non_exhaustive()
    }
}

fn curve_algorithms(
    curve: EcdsaCurve,
) -> (
    &'static EcdsaSigningAlgorithm,
    &'static EcdsaVerificationAlgorithm,
) {
    match curve {
        EcdsaCurve::P256 => (
            &signature::ECDSA_P256_SHA256_ASN1_SIGNING,
            &signature::ECDSA_P256_SHA256_ASN1,
        ),
        EcdsaCurve::P384 => (
            &signature::ECDSA_P384_SHA384_ASN1_SIGNING,
            &signature::ECDSA_P384_SHA384_ASN1,
        ),
        EcdsaCurve::P521 => (
            &signature::ECDSA_P521_SHA512_ASN1_SIGNING,
            &signature::ECDSA_P521_SHA512_ASN1,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::Algorithm;

    const P256_PEM: &[u8] = include_bytes!("../../tests/fixtures/ec_p256.pem");
    const P256_ALT_PEM: &[u8] = include_bytes!("../../tests/fixtures/ec_p256_alt.pem");
    const P384_PEM: &[u8] = include_bytes!("../../tests/fixtures/ec_p384.pem");
    const P521_PEM: &[u8] = include_bytes!("../../tests/fixtures/ec_p521.pem");
    const RSA_PEM: &[u8] = include_bytes!("../../tests/fixtures/rsa_2048.pem");

    const SIGNING_INPUT: &[u8] =
        b"eyJhbGciOiJFUzI1NiIsInR5cCI6Imp3dCJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

    #[test]
    fn test_es256_valid_signature() {
        let algorithm = ES256::new(P256_PEM).unwrap();
        let signature = algorithm.sign(SIGNING_INPUT).unwrap();

        // DER SEQUENCE tag
        assert_eq!(signature[0], 0x30);
        assert!(algorithm.verify(SIGNING_INPUT, &signature).is_ok());
    }

    #[test]
    fn test_es384_valid_signature() {
        let algorithm = ES384::new(P384_PEM).unwrap();
        let signature = algorithm.sign(SIGNING_INPUT).unwrap();
        assert!(algorithm.verify(SIGNING_INPUT, &signature).is_ok());
    }

    #[test]
    fn test_es512_valid_signature() {
        let algorithm = ES512::new(P521_PEM).unwrap();
        let signature = algorithm.sign(SIGNING_INPUT).unwrap();
        assert!(algorithm.verify(SIGNING_INPUT, &signature).is_ok());
    }

    #[test]
    fn test_es256_uses_fresh_nonce() {
        let algorithm = ES256::new(P256_PEM).unwrap();
        let first = algorithm.sign(SIGNING_INPUT).unwrap();
        let second = algorithm.sign(SIGNING_INPUT).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_es256_invalid_signature() {
        let algorithm = ES256::new(P256_PEM).unwrap();
        let result = algorithm.verify(SIGNING_INPUT, b"wrong_signature");
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_es256_wrong_key() {
        let signature = ES256::new(P256_PEM).unwrap().sign(SIGNING_INPUT).unwrap();
        let result = ES256::new(P256_ALT_PEM)
            .unwrap()
            .verify(SIGNING_INPUT, &signature);
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_es256_wrong_data() {
        let algorithm = ES256::new(P256_PEM).unwrap();
        let signature = algorithm.sign(SIGNING_INPUT).unwrap();
        let result = algorithm.verify(b"tampered", &signature);
        assert!(matches!(result, Err(Error::SignatureInvalid)));
    }

    #[test]
    fn test_wrong_curve_rejected_at_construction() {
        let cases: [(&[u8], fn(&[u8]) -> Result<()>); 6] = [
            (P256_PEM, |k| ES384::new(k).map(drop)),
            (P256_PEM, |k| ES512::new(k).map(drop)),
            (P384_PEM, |k| ES256::new(k).map(drop)),
            (P384_PEM, |k| ES512::new(k).map(drop)),
            (P521_PEM, |k| ES256::new(k).map(drop)),
            (P521_PEM, |k| ES384::new(k).map(drop)),
        ];

        for (key, construct) in cases {
            assert!(matches!(construct(key), Err(Error::CurveMismatch { .. })));
        }
    }

    #[test]
    fn test_curve_mismatch_names_both_curves() {
        let err = ES384::new(P256_PEM).unwrap_err();
        assert_eq!(
            err,
            Error::CurveMismatch {
                algorithm: "ES384".into(),
                expected: "P-384".into(),
                actual: "P-256".into(),
            }
        );
    }

    #[test]
    fn test_missing_key() {
        assert!(matches!(ES256::new(b""), Err(Error::KeyMissing)));
    }

    #[test]
    fn test_rsa_key_rejected() {
        assert!(matches!(ES256::new(RSA_PEM), Err(Error::KeyInvalid(_))));
    }

    #[test]
    fn test_multiple_pem_blocks() {
        let doubled = [P256_PEM, P256_ALT_PEM].concat();
        assert!(matches!(
            ES256::new(doubled),
            Err(Error::KeyMultiplePemBlocks)
        ));
    }

    #[test]
    fn test_names() {
        assert_eq!(ES256::new(P256_PEM).unwrap().name(), "ES256");
        assert_eq!(ES384::new(P384_PEM).unwrap().name(), "ES384");
        assert_eq!(ES512::new(P521_PEM).unwrap().name(), "ES512");
    }
}
