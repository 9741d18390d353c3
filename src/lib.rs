//! # jwtmint - Issue and Verify Compact, Signed JWTs
//!
//! > Twelve signature algorithms behind one small contract.
//!
//! **jwtmint** encodes a set of claims into a self-contained JSON Web Token, signs it with a
//! chosen algorithm, and later re-parses and re-verifies that string against the same algorithm.
//!
//! ## Overview
//!
//! Every algorithm is a named facade (`HS256`, `RS384`, `ES512`, ...) that binds one signature
//! engine to one fixed hash and one registry name. All facades implement the [`Algorithm`]
//! contract (`sign`, `verify`, `name`), so [`create`] and [`parse`] never care which family
//! they are talking to.
//!
//! Parsing is strict. The header `alg` must be one of the twelve registered names and must equal
//! the name of the algorithm you pass in, which rules out algorithm confusion (including
//! `"none"`). The payload is only JSON-decoded after the signature has been verified, so an
//! unverified payload never reaches the caller.
//!
//! ## Quick Start
//!
//! ```ignore
//! use jwtmint::*;
//!
//! let algorithm = HS256::new(b"your-256-bit-secret")?;
//!
//! let mut claims = Claims::new()
//!     .with_subject("user-42")
//!     .with_expires(now + 3600);
//! let token_str = create(&mut claims, &algorithm)?;
//!
//! let token = parse(&token_str, &algorithm)?;
//! assert!(!token.is_expired());
//! println!("Subject: {}", token.claims().subject);
//! ```
//!
//! ## Algorithm Support
//!
//! - **HMAC** (always enabled): HS256, HS384, HS512
//! - **RSA PKCS#1 v1.5** (with `rsa` feature): RS256, RS384, RS512
//! - **RSA-PSS** (with `rsa` feature): PS256, PS384, PS512
//! - **ECDSA** (with `ecdsa` feature): ES256 (P-256), ES384 (P-384), ES512 (P-521)
//!
//! HMAC facades take the shared secret. Asymmetric facades take exactly one PEM block: a PKCS#1
//! `RSA PRIVATE KEY` or a SEC1 `EC PRIVATE KEY`. An EC key on the wrong curve for the requested
//! strength is rejected at construction with [`Error::CurveMismatch`].
//!
//! When the algorithm is only known at runtime, use [`from_id`]:
//!
//! ```ignore
//! let algorithm = from_id(AlgorithmId::from_str("ES384")?, &pem_bytes)?;
//! let token = parse(&token_str, algorithm.as_ref())?;
//! ```
//!
//! ## Features
//!
//! - **`rsa`** (default): RS* and PS* facades
//! - **`ecdsa`** (default): ES* facades
//! - **`all-algorithms`**: Enable all asymmetric algorithms (RSA + ECDSA)
//!
//! ## Security
//!
//! ### Algorithm Confusion Prevention
//!
//! A token is only ever verified by the algorithm you hand to [`parse`]. A token declaring
//! `HS384` is rejected by an `HS256` instance before any signature check runs.
//!
//! ### Timing Attack Protection
//!
//! HMAC signature verification uses constant-time comparison via the [`constant_time_eq`](https://crates.io/crates/constant_time_eq)
//! crate.
//!
//! ### Input Bounds
//!
//! Token length and the decoded size of every segment are bounded before decoding.
//!
//! ## References
//!
//! - [RFC 7515](https://datatracker.ietf.org/doc/html/rfc7515) - JSON Web Signature (JWS)
//! - [RFC 7518](https://datatracker.ietf.org/doc/html/rfc7518) - JSON Web Algorithms (JWA)
//! - [RFC 7519](https://datatracker.ietf.org/doc/html/rfc7519) - JSON Web Token (JWT)

// Core modules
pub mod error;
pub(crate) mod limits;
pub mod utils;

// Algorithm system
pub mod algorithm;
pub mod keys;

// Data model
pub mod claims;
pub mod token;

// Create / Parse
pub mod codec;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use codec::{TokenBuilder, create, parse};

pub use algorithm::hmac::{HS256, HS384, HS512};
pub use algorithm::{
    ALGORITHMS, Algorithm, AlgorithmFamily, AlgorithmId, HashAlgorithm, SigningAlgorithm, from_id,
};

#[cfg(feature = "rsa")]
pub use algorithm::rsa::{RS256, RS384, RS512};
#[cfg(feature = "rsa")]
pub use algorithm::rsa_pss::{PS256, PS384, PS512};

#[cfg(feature = "ecdsa")]
pub use algorithm::ecdsa::{ES256, ES384, ES512};
#[cfg(feature = "ecdsa")]
pub use keys::EcdsaCurve;

pub use claims::Claims;
pub use error::{Error, ErrorKind, Result};
pub use token::{Header, Token};

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_full_flow_hmac() {
        use hmac::{Hmac, Mac};
        use sha2::Sha256;

        // Token assembled by hand, verified through the public API
        let header = r#"{"alg":"HS256","typ":"jwt"}"#;
        let payload = r#"{"iss":"https://example.com","sub":"user123","exp":4102444800,"jti":"x"}"#;

        let header_b64 = utils::base64url::encode(header);
        let payload_b64 = utils::base64url::encode(payload);
        let signing_input = format!("{header_b64}.{payload_b64}");

        let secret = b"my-secret-key";
        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(secret).unwrap();
        mac.update(signing_input.as_bytes());
        let signature_b64 = utils::base64url::encode_bytes(&mac.finalize().into_bytes());

        let token_str = format!("{signing_input}.{signature_b64}");
        let token = parse(&token_str, &HS256::new(secret).unwrap()).expect("Parse failed");

        assert_eq!(token.claims().issuer, "https://example.com");
        assert_eq!(token.claims().subject, "user123");
        assert_eq!(token.claims().issued_at, 0);
        assert!(token.claims().raw_value("jti").is_some());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_none_algorithm_rejected() {
        let header = r#"{"alg":"none"}"#;
        let payload = r#"{"iss":"test"}"#;
        let token_str = format!(
            "{}.{}.",
            utils::base64url::encode(header),
            utils::base64url::encode(payload),
        );

        let result = parse(&token_str, &HS256::new(b"secret").unwrap());
        assert_eq!(result.unwrap_err(), Error::AlgorithmInvalid("none".into()));
    }

    #[test]
    fn test_dynamic_algorithm() {
        let algorithm = from_id(AlgorithmId::HS512, b"secret").unwrap();
        let token_str = create(&mut Claims::new(), algorithm.as_ref()).unwrap();
        let token = parse(&token_str, algorithm.as_ref()).unwrap();
        assert_eq!(token.algorithm(), AlgorithmId::HS512);
    }

    #[test]
    #[cfg(not(any(feature = "rsa", feature = "ecdsa")))]
    fn test_hmac_only_build() {
        assert!(from_id(AlgorithmId::HS256, b"secret").is_ok());
        assert!(matches!(
            from_id(AlgorithmId::PS256, b"secret"),
            Err(Error::AlgorithmUnsupported(_))
        ));
        assert!(matches!(
            from_id(AlgorithmId::ES512, b"secret"),
            Err(Error::AlgorithmUnsupported(_))
        ));
    }
}
