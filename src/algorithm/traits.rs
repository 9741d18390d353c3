use crate::algorithm::AlgorithmId;
use crate::error::{Error, Result};

/// Core algorithm trait that all JWT signature algorithms implement
///
/// A facade binds one signature engine to one fixed hash and one registry
/// name. Facades never mutate after construction, so a single instance can be
/// shared across threads for any number of concurrent sign and verify calls.
pub trait Algorithm {
    /// Sign `data` and return the raw signature bytes
    ///
    /// HMAC signatures are deterministic. RSA-PSS and ECDSA draw fresh
    /// randomness (salt, nonce) on every call.
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Verify a raw signature over `data`
    fn verify(&self, data: &[u8], signature: &[u8]) -> Result<()>;

    /// The algorithm identifier (e.g., "HS256", "ES384")
    fn name(&self) -> &'static str;
}

/// Type alias for boxed algorithm trait objects
pub type SigningAlgorithm = Box<dyn Algorithm + Send + Sync>;

/// Build the facade for `algorithm` from its key material
///
/// `key` is the shared secret for HMAC algorithms and a single PEM block for
/// every asymmetric algorithm.
#[allow(unreachable_patterns)]
pub fn from_id(algorithm: AlgorithmId, key: &[u8]) -> Result<SigningAlgorithm> {
    use crate::algorithm::hmac;

    match algorithm {
        AlgorithmId::HS256 => Ok(Box::new(hmac::HS256::new(key)?)),
        AlgorithmId::HS384 => Ok(Box::new(hmac::HS384::new(key)?)),
        AlgorithmId::HS512 => Ok(Box::new(hmac::HS512::new(key)?)),

        #[cfg(feature = "rsa")]
        AlgorithmId::RS256 => Ok(Box::new(super::rsa::RS256::new(key)?)),
        #[cfg(feature = "rsa")]
        AlgorithmId::RS384 => Ok(Box::new(super::rsa::RS384::new(key)?)),
        #[cfg(feature = "rsa")]
        AlgorithmId::RS512 => Ok(Box::new(super::rsa::RS512::new(key)?)),

        #[cfg(feature = "rsa")]
        AlgorithmId::PS256 => Ok(Box::new(super::rsa_pss::PS256::new(key)?)),
        #[cfg(feature = "rsa")]
        AlgorithmId::PS384 => Ok(Box::new(super::rsa_pss::PS384::new(key)?)),
        #[cfg(feature = "rsa")]
        AlgorithmId::PS512 => Ok(Box::new(super::rsa_pss::PS512::new(key)?)),

        #[cfg(feature = "ecdsa")]
        AlgorithmId::ES256 => Ok(Box::new(super::ecdsa::ES256::new(key)?)),
        #[cfg(feature = "ecdsa")]
        AlgorithmId::ES384 => Ok(Box::new(super::ecdsa::ES384::new(key)?)),
        #[cfg(feature = "ecdsa")]
        AlgorithmId::ES512 => Ok(Box::new(super::ecdsa::ES512::new(key)?)),

        other => Err(Error::AlgorithmUnsupported(other.to_string())),
    }
}

/// Declare a named facade over a signature engine
///
/// The engine type must provide `new(AlgorithmId, &[u8])`, `sign`, `verify`
/// and `name`.
macro_rules! algorithm_facade {
    ($(#[$meta:meta])* $name:ident, $engine:ty, $id:expr) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            engine: $engine,
        }

        impl $name {
            #[doc = concat!("Create a new ", stringify!($name), " algorithm from its key material")]
            pub fn new(key: impl AsRef<[u8]>) -> $crate::error::Result<Self> {
                Ok(Self {
                    engine: <$engine>::new($id, key.as_ref())?,
                })
            }
        }

        impl $crate::algorithm::Algorithm for $name {
            fn sign(&self, data: &[u8]) -> $crate::error::Result<Vec<u8>> {
                self.engine.sign(data)
            }

            fn verify(&self, data: &[u8], signature: &[u8]) -> $crate::error::Result<()> {
                self.engine.verify(data, signature)
            }

            fn name(&self) -> &'static str {
                self.engine.name()
            }
        }
    };
}

pub(crate) use algorithm_facade;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::ALGORITHMS;

    #[test]
    fn test_from_id_hmac() {
        for id in [AlgorithmId::HS256, AlgorithmId::HS384, AlgorithmId::HS512] {
            let algorithm = from_id(id, b"secret").unwrap();
            assert_eq!(algorithm.name(), id.as_str());
        }
    }

    #[test]
    fn test_from_id_rejects_empty_key() {
        for id in ALGORITHMS {
            assert!(from_id(id, b"").is_err(), "{id} accepted an empty key");
        }
    }

    #[cfg(feature = "rsa")]
    #[test]
    fn test_from_id_rsa() {
        let pem = include_bytes!("../../tests/fixtures/rsa_2048.pem");
        for id in [
            AlgorithmId::RS256,
            AlgorithmId::RS384,
            AlgorithmId::RS512,
            AlgorithmId::PS256,
            AlgorithmId::PS384,
            AlgorithmId::PS512,
        ] {
            let algorithm = from_id(id, pem).unwrap();
            assert_eq!(algorithm.name(), id.as_str());
        }
    }

    #[cfg(feature = "ecdsa")]
    #[test]
    fn test_from_id_ecdsa() {
        let algorithm =
            from_id(AlgorithmId::ES256, include_bytes!("../../tests/fixtures/ec_p256.pem")).unwrap();
        assert_eq!(algorithm.name(), "ES256");

        let result = from_id(
            AlgorithmId::ES512,
            include_bytes!("../../tests/fixtures/ec_p256.pem"),
        );
        assert!(matches!(result, Err(Error::CurveMismatch { .. })));
    }
}
