//! Compact serialization: [`create`] and [`parse`]
//!
//! ```text
//! base64url(header_json) "." base64url(payload_json) "." base64url(signature)
//! ```

use crate::algorithm::{Algorithm, AlgorithmId};
use crate::claims::Claims;
use crate::error::{Error, Result};
use crate::limits::{
    MAX_DECODED_HEADER_SIZE, MAX_DECODED_PAYLOAD_SIZE, MAX_DECODED_SIGNATURE_SIZE,
    MAX_TOKEN_LENGTH,
};
use crate::token::{Header, Token};
use crate::utils::{base64url, time};

/// Sign `claims` with `algorithm` and return the compact token
///
/// `claims.issued_at` is stamped with the current time before encoding,
/// replacing whatever the caller set. The stamp stays on `claims` so the
/// caller can see the value that was signed.
///
/// A failure from the algorithm's `sign` is wrapped in
/// [`Error::SigningFailed`].
pub fn create<A>(claims: &mut Claims, algorithm: &A) -> Result<String>
where
    A: Algorithm + ?Sized,
{
    let header = Header::new(algorithm.name());
    let header_b64 = base64url::encode(&header.to_json());

    claims.issued_at = time::now();
    let payload_b64 = base64url::encode(&claims.to_json());

    let signing_input = format!("{header_b64}.{payload_b64}");
    let signature = algorithm
        .sign(signing_input.as_bytes())
        .map_err(|e| Error::SigningFailed(Box::new(e)))?;

    tracing::debug!(algorithm = algorithm.name(), "created token");

    Ok(format!(
        "{signing_input}.{}",
        base64url::encode_bytes(&signature)
    ))
}

/// Parse and verify a compact token against the algorithm expected to have
/// produced it
///
/// The header `alg` must be a registered algorithm name and must equal
/// `algorithm.name()` exactly. The payload JSON is only decoded after the
/// signature has been verified.
///
/// Expiry is not checked here; see [`Token::is_expired`].
pub fn parse<A>(token: &str, algorithm: &A) -> Result<Token>
where
    A: Algorithm + ?Sized,
{
    if token.len() > MAX_TOKEN_LENGTH {
        return Err(Error::TokenTooLarge {
            size: token.len(),
            max: MAX_TOKEN_LENGTH,
        });
    }

    let mut segments = token.split('.');
    let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(Error::FormatInvalid);
    };

    let header_json = base64url::decode_string(header_b64, MAX_DECODED_HEADER_SIZE)?;
    let header = Header::from_json(&header_json)?;
    let algorithm_id = expected_algorithm(&header, algorithm.name())?;

    let payload = base64url::decode_bytes(payload_b64, MAX_DECODED_PAYLOAD_SIZE)?;
    let signature = base64url::decode_bytes(signature_b64, MAX_DECODED_SIGNATURE_SIZE)?;

    let signing_input = &token[..header_b64.len() + 1 + payload_b64.len()];
    if let Err(e) = algorithm.verify(signing_input.as_bytes(), &signature) {
        tracing::debug!(algorithm = algorithm.name(), error = %e, "token signature rejected");
        return Err(Error::SignatureInvalid);
    }

    let payload_json = String::from_utf8(payload)
        .map_err(|e| Error::FormatInvalidJson(format!("Payload is not UTF-8: {e}")))?;
    let claims = Claims::from_json(&payload_json)?;

    Ok(Token::new(header, claims, signature, algorithm_id))
}

/// The header names a registered algorithm and it is the one we verify with.
fn expected_algorithm(header: &Header, expected: &str) -> Result<AlgorithmId> {
    let id = match AlgorithmId::from_str(&header.alg) {
        Ok(id) if id.as_str() == expected => id,
        _ => {
            tracing::debug!(
                expected,
                "token algorithm is unregistered or does not match"
            );
            return Err(Error::AlgorithmInvalid(header.alg.clone()));
        }
    };
    Ok(id)
}

/// Builder for [`create`] with an optional algorithm
///
/// Useful when the algorithm is chosen at runtime and may be absent.
///
/// # Examples
///
/// ```ignore
/// let algorithm = from_id(AlgorithmId::HS256, b"secret")?;
/// let token = TokenBuilder::new(Claims::new().with_subject("alice"))
///     .algorithm(algorithm.as_ref())
///     .build()?;
/// ```
pub struct TokenBuilder<'a> {
    claims: Claims,
    algorithm: Option<&'a dyn Algorithm>,
}

impl<'a> TokenBuilder<'a> {
    pub fn new(claims: Claims) -> Self {
        Self {
            claims,
            algorithm: None,
        }
    }

    /// Set the signing algorithm
    pub fn algorithm(mut self, algorithm: &'a dyn Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Claims as they will be (or were) signed
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Create the token, failing with [`Error::AlgorithmMissing`] when no
    /// algorithm was set
    pub fn build(&mut self) -> Result<String> {
        let algorithm = self.algorithm.ok_or(Error::AlgorithmMissing)?;
        create(&mut self.claims, algorithm)
    }
}
