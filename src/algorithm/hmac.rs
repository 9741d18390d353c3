use crate::algorithm::traits::algorithm_facade;
use crate::algorithm::{AlgorithmId, HashAlgorithm};
use crate::error::{Error, Result};

use constant_time_eq::constant_time_eq;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

algorithm_facade!(
    /// HS256 algorithm (HMAC with SHA-256)
    HS256,
    HmacEngine,
    AlgorithmId::HS256
);

algorithm_facade!(
    /// HS384 algorithm (HMAC with SHA-384)
    HS384,
    HmacEngine,
    AlgorithmId::HS384
);

algorithm_facade!(
    /// HS512 algorithm (HMAC with SHA-512)
    HS512,
    HmacEngine,
    AlgorithmId::HS512
);

/// Symmetric MAC engine shared by the HS* facades
struct HmacEngine {
    algorithm: AlgorithmId,
    secret: Vec<u8>,
}

impl HmacEngine {
    fn new(algorithm: AlgorithmId, secret: &[u8]) -> Result<Self> {
        if secret.is_empty() {
            return Err(Error::SecretMissing);
        }

        Ok(Self {
            algorithm,
            secret: secret.to_vec(),
        })
    }

    /// Zero-length data counts as no data and is refused.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        if data.is_empty() {
            return Err(Error::DataMissing);
        }
        self.mac(data)
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        let expected_signature = self.mac(data)?;

        if signature.len() != expected_signature.len() {
            return Err(Error::SignatureInvalid);
        }

        if constant_time_eq(signature, &expected_signature) {
            Ok(())
        } else {
            Err(Error::SignatureInvalid)
        }
    }

    fn name(&self) -> &'static str {
        self.algorithm.as_str()
    }

    fn mac(&self, data: &[u8]) -> Result<Vec<u8>> {
        match self.algorithm.hash() {
            HashAlgorithm::Sha256 => compute_mac::<Hmac<Sha256>>(&self.secret, data),
            HashAlgorithm::Sha384 => compute_mac::<Hmac<Sha384>>(&self.secret, data),
            HashAlgorithm::Sha512 => compute_mac::<Hmac<Sha512>>(&self.secret, data),
        }
    }
}

impl std::fmt::Debug for HmacEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacEngine")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

fn compute_mac<M: Mac + KeyInit>(secret: &[u8], data: &[u8]) -> Result<Vec<u8>> {
    let mut mac =
        <M as KeyInit>::new_from_slice(secret).map_err(|e| Error::KeyInvalid(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
