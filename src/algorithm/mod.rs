//! Algorithm registry and signature engines
//!
//! Every algorithm facade implements the [`Algorithm`] contract. The facades
//! are grouped by family, one module per signature engine:
//!
//! - [`hmac`]: HS256, HS384, HS512 (always enabled)
//! - [`rsa`]: RS256, RS384, RS512 (`rsa` feature)
//! - [`rsa_pss`]: PS256, PS384, PS512 (`rsa` feature)
//! - [`ecdsa`]: ES256, ES384, ES512 (`ecdsa` feature)

mod traits;

pub mod hmac;

#[cfg(feature = "rsa")]
pub mod rsa;

#[cfg(feature = "rsa")]
pub mod rsa_pss;

#[cfg(feature = "ecdsa")]
pub mod ecdsa;

pub use traits::{Algorithm, SigningAlgorithm, from_id};

use crate::error::{Error, Result};
use crate::limits::MAX_ALG_LENGTH;

/// Algorithm identifier as carried in the JWT `alg` header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlgorithmId {
    /// ECDSA with P-256 and SHA-256
    ES256,
    /// ECDSA with P-384 and SHA-384
    ES384,
    /// ECDSA with P-521 and SHA-512
    ES512,
    /// HMAC with SHA-256
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    HS512,
    /// RSASSA-PSS with SHA-256
    PS256,
    /// RSASSA-PSS with SHA-384
    PS384,
    /// RSASSA-PSS with SHA-512
    PS512,
    /// RSASSA-PKCS1-v1_5 with SHA-256
    RS256,
    /// RSASSA-PKCS1-v1_5 with SHA-384
    RS384,
    /// RSASSA-PKCS1-v1_5 with SHA-512
    RS512,
}

/// The fixed registry of recognized algorithms
pub const ALGORITHMS: [AlgorithmId; 12] = [
    AlgorithmId::ES256,
    AlgorithmId::ES384,
    AlgorithmId::ES512,
    AlgorithmId::HS256,
    AlgorithmId::HS384,
    AlgorithmId::HS512,
    AlgorithmId::PS256,
    AlgorithmId::PS384,
    AlgorithmId::PS512,
    AlgorithmId::RS256,
    AlgorithmId::RS384,
    AlgorithmId::RS512,
];

/// Signature scheme family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmFamily {
    Hmac,
    RsaPkcs1,
    RsaPss,
    Ecdsa,
}

/// SHA-2 digest bound to an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl AlgorithmId {
    /// Look up a registry entry by its exact, case-sensitive name
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self> {
        if s.len() > MAX_ALG_LENGTH {
            return Err(Error::AlgorithmInvalid(format!(
                "algorithm string too long: {} bytes (maximum: {} bytes)",
                s.len(),
                MAX_ALG_LENGTH
            )));
        }

        ALGORITHMS
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| Error::AlgorithmInvalid(s.into()))
    }

    /// Convert to string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlgorithmId::ES256 => "ES256",
            AlgorithmId::ES384 => "ES384",
            AlgorithmId::ES512 => "ES512",
            AlgorithmId::HS256 => "HS256",
            AlgorithmId::HS384 => "HS384",
            AlgorithmId::HS512 => "HS512",
            AlgorithmId::PS256 => "PS256",
            AlgorithmId::PS384 => "PS384",
            AlgorithmId::PS512 => "PS512",
            AlgorithmId::RS256 => "RS256",
            AlgorithmId::RS384 => "RS384",
            AlgorithmId::RS512 => "RS512",
        }
    }

    /// Signature scheme family
    pub const fn family(&self) -> AlgorithmFamily {
        match self {
            AlgorithmId::ES256 | AlgorithmId::ES384 | AlgorithmId::ES512 => AlgorithmFamily::Ecdsa,
            AlgorithmId::HS256 | AlgorithmId::HS384 | AlgorithmId::HS512 => AlgorithmFamily::Hmac,
            AlgorithmId::PS256 | AlgorithmId::PS384 | AlgorithmId::PS512 => AlgorithmFamily::RsaPss,
            AlgorithmId::RS256 | AlgorithmId::RS384 | AlgorithmId::RS512 => {
                AlgorithmFamily::RsaPkcs1
            }
        }
    }

    /// Digest bound to this algorithm
    pub const fn hash(&self) -> HashAlgorithm {
        match self {
            AlgorithmId::ES256 | AlgorithmId::HS256 | AlgorithmId::PS256 | AlgorithmId::RS256 => {
                HashAlgorithm::Sha256
            }
            AlgorithmId::ES384 | AlgorithmId::HS384 | AlgorithmId::PS384 | AlgorithmId::RS384 => {
                HashAlgorithm::Sha384
            }
            AlgorithmId::ES512 | AlgorithmId::HS512 | AlgorithmId::PS512 | AlgorithmId::RS512 => {
                HashAlgorithm::Sha512
            }
        }
    }

    /// Check if algorithm is HMAC-based (symmetric)
    pub fn is_symmetric(&self) -> bool {
        self.family() == AlgorithmFamily::Hmac
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for AlgorithmId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
