use crate::algorithm::traits::algorithm_facade;
use crate::algorithm::{AlgorithmId, HashAlgorithm};
use crate::error::{Error, Result};
use crate::keys::rsa_key_pair_from_pem;

use aws_lc_rs::rand::SystemRandom;
use aws_lc_rs::signature::{self, KeyPair, RsaEncoding, RsaKeyPair};
use ::rsa::pkcs1::DecodeRsaPublicKey;
use ::rsa::pss::{Signature, VerifyingKey};
use ::rsa::signature::Verifier;
use ::rsa::traits::PublicKeyParts;
use ::rsa::{BigUint, RsaPublicKey, hazmat};
use sha2::digest::FixedOutputReset;
use sha2::{Digest, Sha256, Sha384, Sha512};

algorithm_facade!(
    /// PS256 algorithm (RSASSA-PSS with SHA-256 and MGF1 with SHA-256)
    PS256,
    RsaPssEngine,
    AlgorithmId::PS256
);

algorithm_facade!(
    /// PS384 algorithm (RSASSA-PSS with SHA-384 and MGF1 with SHA-384)
    PS384,
    RsaPssEngine,
    AlgorithmId::PS384
);

algorithm_facade!(
    /// PS512 algorithm (RSASSA-PSS with SHA-512 and MGF1 with SHA-512)
    PS512,
    RsaPssEngine,
    AlgorithmId::PS512
);

/// PSS parameters fixed at construction
///
/// The salt length is automatic. Signing emits a digest-length salt, and
/// verification recovers the salt length from the encoded message, so any
/// length from zero up to `k - hLen - 2` is accepted.
#[derive(Clone, Copy)]
struct PssParameters {
    hash: HashAlgorithm,
    encoding: &'static dyn RsaEncoding,
}

impl PssParameters {
    fn for_hash(hash: HashAlgorithm) -> Self {
        let encoding: &'static dyn RsaEncoding = match hash {
            HashAlgorithm::Sha256 => &signature::RSA_PSS_SHA256,
            HashAlgorithm::Sha384 => &signature::RSA_PSS_SHA384,
            HashAlgorithm::Sha512 => &signature::RSA_PSS_SHA512,
        };
        Self { hash, encoding }
    }
}

/// RSASSA-PSS engine shared by the PS* facades
struct RsaPssEngine {
    algorithm: AlgorithmId,
    key_pair: RsaKeyPair,
    public_key: RsaPublicKey,
    parameters: PssParameters,
}

impl RsaPssEngine {
    fn new(algorithm: AlgorithmId, key: &[u8]) -> Result<Self> {
        let key_pair = rsa_key_pair_from_pem(key)?;
        let public_key = RsaPublicKey::from_pkcs1_der(key_pair.public_key().as_ref())
            .map_err(|e| Error::KeyInvalid(format!("unusable RSA public key: {e}")))?;

        Ok(Self {
            algorithm,
            key_pair,
            public_key,
            parameters: PssParameters::for_hash(algorithm.hash()),
        })
    }

    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let rng = SystemRandom::new();
        let mut signature = vec![0u8; self.key_pair.public_modulus_len()];

        self.key_pair
            .sign(self.parameters.encoding, &rng, data, &mut signature)
            .map_err(|_| Error::Crypto(format!("{} signing failed", self.algorithm)))?;

        Ok(signature)
    }

    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()> {
        match self.parameters.hash {
            HashAlgorithm::Sha256 => verify_pss::<Sha256>(&self.public_key, data, signature),
            HashAlgorithm::Sha384 => verify_pss::<Sha384>(&self.public_key, data, signature),
            HashAlgorithm::Sha512 => verify_pss::<Sha512>(&self.public_key, data, signature),
        }
    }

    fn name(&self) -> &'static str {
        self.algorithm.as_str()
    }
}

impl std::fmt::Debug for RsaPssEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsaPssEngine")
            .field("algorithm", &self.algorithm)
            .field("modulus_bits", &(self.key_pair.public_modulus_len() * 8))
            .finish_non_exhaustive()
    }
}

fn verify_pss<D>(public_key: &RsaPublicKey, data: &[u8], signature: &[u8]) -> Result<()>
where
    D: Digest + FixedOutputReset,
{
    let salt_len = recover_salt_len::<D>(public_key, signature).ok_or(Error::SignatureInvalid)?;
    let signature = Signature::try_from(signature).map_err(|_| Error::SignatureInvalid)?;

    VerifyingKey::<D>::new_with_salt_len(public_key.clone(), salt_len)
        .verify(data, &signature)
        .map_err(|_| Error::SignatureInvalid)
}

/// Salt length of an EMSA-PSS encoded signature (RFC 8017 section 9.1.2)
///
/// Only the length is recovered here; the hash comparison happens in
/// [`verify_pss`].
fn recover_salt_len<D: Digest>(public_key: &RsaPublicKey, signature: &[u8]) -> Option<usize> {
    if signature.len() != public_key.size() {
        return None;
    }

    let s = BigUint::from_bytes_be(signature);
    if &s >= public_key.n() {
        return None;
    }
    let m = hazmat::rsa_encrypt(public_key, &s).ok()?.to_bytes_be();

    let em_bits = public_key.n().bits() - 1;
    let em_len = em_bits.div_ceil(8);
    let h_len = <D as Digest>::output_size();
    if m.len() > em_len || em_len < h_len + 2 {
        return None;
    }

    let mut em = vec![0u8; em_len];
    em[em_len - m.len()..].copy_from_slice(&m);
    if em[em_len - 1] != 0xbc {
        return None;
    }

    let (db, rest) = em.split_at_mut(em_len - h_len - 1);
    mgf1_xor::<D>(db, &rest[..h_len]);
    db[0] &= 0xff >> (8 * em_len - em_bits);

    // DB = PS (zeros) || 0x01 || salt
    let separator = db.iter().position(|&b| b != 0)?;
    (db[separator] == 0x01).then(|| db.len() - separator - 1)
}

fn mgf1_xor<D: Digest>(out: &mut [u8], seed: &[u8]) {
    for (counter, chunk) in (0u32..).zip(out.chunks_mut(<D as Digest>::output_size())) {
        let mask = D::new()
            .chain_update(seed)
            .chain_update(counter.to_be_bytes())
            .finalize();
        chunk
            .iter_mut()
            .zip(mask.iter())
            .for_each(|(byte, mask)| *byte ^= mask);
    }
}
