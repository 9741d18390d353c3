use crate::error::{Error, Result};
use crate::keys::decode_single_pem;

use aws_lc_rs::signature::RsaKeyPair;

/// Load a PKCS#1 RSA private key from a single PEM block
///
/// Moduli below 2048 bits are rejected.
pub(crate) fn rsa_key_pair_from_pem(key: &[u8]) -> Result<RsaKeyPair> {
    let block = decode_single_pem(key)?;

    RsaKeyPair::from_der(block.contents()).map_err(|e| {
        tracing::debug!(tag = block.tag(), "rejected RSA private key: {e}");
        Error::KeyInvalid(format!("expected PKCS#1 RSA private key: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_pkcs1_key() {
        let key_pair = rsa_key_pair_from_pem(include_bytes!("../../tests/fixtures/rsa_2048.pem"));
        assert!(key_pair.is_ok());
        assert_eq!(key_pair.unwrap().public_modulus_len(), 256);
    }

    #[test]
    fn test_reject_pkcs8_key() {
        let result = rsa_key_pair_from_pem(include_bytes!("../../tests/fixtures/rsa_2048_pkcs8.pem"));
        assert!(matches!(result, Err(Error::KeyInvalid(_))));
    }

    #[test]
    fn test_reject_1024_bit_key() {
        let result = rsa_key_pair_from_pem(include_bytes!("../../tests/fixtures/rsa_1024.pem"));
        assert!(matches!(result, Err(Error::KeyInvalid(_))));
    }

    #[test]
    fn test_reject_ec_key() {
        let result = rsa_key_pair_from_pem(include_bytes!("../../tests/fixtures/ec_p256.pem"));
        assert!(matches!(result, Err(Error::KeyInvalid(_))));
    }
}
