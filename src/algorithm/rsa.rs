use crate::algorithm::traits::algorithm_facade;
use crate::algorithm::{AlgorithmId, HashAlgorithm};
use crate::error::{Error, Result};
use crate::keys::rsa_key_pair_from_pem;

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{
    self, KeyPair, RsaEncoding, RsaKeyPair, UnparsedPublicKey, VerificationAlgorithm,
};

algorithm_facade!(
    /// RS256 algorithm (RSASSA-PKCS1-v1_5 with SHA-256)
    RS256,
    RsaPkcs1Engine,
    AlgorithmId::RS256
);

algorithm_facade!(
    /// RS384 algorithm (RSASSA-PKCS1-v1_5 with SHA-384)
    RS384,
    RsaPkcs1Engine,
    AlgorithmId::RS384
);

algorithm_facade!(
    /// RS512 algorithm (RSASSA-PKCS1-v1_5 with SHA-512)
    RS512,
    RsaPkcs1Engine,
    AlgorithmId::RS512
);

/// RSASSA-PKCS1-v1_5 engine shared by the RS* facades
struct RsaPkcs1Engine {
    algorithm: AlgorithmId,
    key_pair: RsaKeyPair,
    public_key_der: Vec<u8>,
    encoding: &'static dyn RsaEncoding,
    verification: &'static dyn VerificationAlgorithm,
}

impl RsaPkcs1Engine {
    fn new(algorithm: AlgorithmId, key: &[u8]) -> Result<Self> {
        let key_pair = rsa_key_pair_from_pem(key)?;
        let public_key_der = key_pair.public_key().as_ref().to_vec();

        let (encoding, verification): (&'static dyn RsaEncoding, &'static dyn VerificationAlgorithm) =
            match algorithm.hash() {
                HashAlgorithm::Sha256 => (
                    &signature::RSA_PKCS1_SHA256,
                    &signature::RSA_PKCS1_2048_8192_SHA256,
                ),
                HashAlgorithm::Sha384 => (
                    &signature::RSA_PKCS1_SHA384,
                    &signature::RSA_PKCS1_2048_8192_SHA384,
                ),
                HashAlgorithm::Sha512 => (
                    &signature::RSA_PKCS1_SHA512,
                    &signature::RSA_PKCS1_2048_8192_SHA512,
                ),
            };

        Ok(Self {
            algorithm,
            key_pair,
            public_key_der,
            encoding,
            verification,
        })
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let rng = SystemRandom::new();
        let mut signature = vec![0u8; self.key_pair.public_modulus_len()];

        self.key_pair
            .sign(self.encoding, &rng, data, &mut signature)
            .map_err(|_| Error::Crypto(format!("{} signing failed", self.algorithm)))?;

        Ok(signature)
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        UnparsedPublicKey::new(self.verification, &self.public_key_der)
            .verify(data, signature)
            .map_err(|_| Error::SignatureInvalid)
    }

    fn name(&self) -> &'static str {
        self.algorithm.as_str()
    }
}

impl std::fmt::Debug for RsaPkcs1Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaPkcs1Engine")
            .field("algorithm", &self.algorithm)
            .field("modulus_bits", &(self.key_pair.public_modulus_len() * 8))
            .finish_non_exhaustive()
    }
}
