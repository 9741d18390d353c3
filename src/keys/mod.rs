//! Private key loading
//!
//! Asymmetric algorithms take their key as exactly one PEM block:
//! - RSA keys in PKCS#1 form (`RSA PRIVATE KEY`)
//! - EC keys in SEC1 form (`EC PRIVATE KEY`)
//!
//! Loading is a fallible factory: it yields either a fully parsed key pair or
//! an error, never a partially constructed key.

#[cfg(feature = "ecdsa")]
mod ec;

#[cfg(feature = "rsa")]
mod rsa;

#[cfg(feature = "ecdsa")]
pub use ec::EcdsaCurve;

#[cfg(feature = "ecdsa")]
pub(crate) use ec::sec1_curve;

#[cfg(feature = "rsa")]
pub(crate) use self::rsa::rsa_key_pair_from_pem;

use crate::error::{Error, Result};

/// Decode `key` as exactly one PEM block
#[cfg_attr(not(any(feature = "rsa", feature = "ecdsa")), allow(dead_code))]
pub(crate) fn decode_single_pem(key: &[u8]) -> Result<pem::Pem> {
    if key.is_empty() {
        return Err(Error::KeyMissing);
    }

    let mut blocks = pem::parse_many(key).map_err(|e| Error::KeyInvalidPem(e.to_string()))?;
    match blocks.len() {
        0 => Err(Error::KeyInvalidPem("no PEM block found".into())),
        1 => Ok(blocks.remove(0)),
        _ => Err(Error::KeyMultiplePemBlocks),
    }
}
