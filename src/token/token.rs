//! The trusted token returned by [`parse`](crate::parse)

use crate::algorithm::AlgorithmId;
use crate::claims::Claims;
use crate::token::Header;
use crate::utils::time;

/// A JWT whose algorithm identity and signature have been verified
///
/// Only [`parse`](crate::parse) produces a `Token`, and only after the
/// signature check passed. It is immutable and is never serialized back to a
/// string.
///
/// Time-based claims are not enforced during parsing. Call
/// [`is_expired`](Token::is_expired) explicitly.
///
/// # Examples
///
/// ```ignore
/// use jwtmint::*;
///
/// let token = parse(&token_str, &HS256::new(b"secret")?)?;
/// if token.is_expired() {
///     return Err("token expired".into());
/// }
/// println!("Subject: {}", token.claims().subject);
/// ```
#[derive(Debug, Clone)]
pub struct Token {
    header: Header,
    claims: Claims,
    signature: Vec<u8>,
    algorithm: AlgorithmId,
}

impl Token {
    pub(crate) fn new(
        header: Header,
        claims: Claims,
        signature: Vec<u8>,
        algorithm: AlgorithmId,
    ) -> Self {
        Self {
            header,
            claims,
            signature,
            algorithm,
        }
    }

    /// Get the token header
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Get all claims
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Raw signature bytes
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The verified algorithm
    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// Whether `exp` lies strictly before the current time
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(time::now())
    }

    /// Whether `exp` lies strictly before `now` (seconds since the Unix epoch)
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.claims.expires < now
    }
}
