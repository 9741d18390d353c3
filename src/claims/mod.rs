use miniserde::json::{Object, Value};
use miniserde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Standard JWT claims as defined in RFC 7519 Section 4.1
///
/// Integer timestamps are seconds since the Unix epoch. Absent fields are
/// zero or empty; there is no separate "unset" state.
///
/// `raw` captures every field of a decoded payload, recognized or not. It is
/// only filled by [`parse`](crate::parse) and is never written back out.
///
/// # Examples
///
/// ```ignore
/// use jwtmint::*;
///
/// let mut claims = Claims::new()
///     .with_subject("user-42")
///     .with_issuer("https://auth.example.com")
///     .with_expires(now + 3600);
///
/// let token = create(&mut claims, &HS256::new(b"secret")?)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Claims {
    /// Expiration Time (exp)
    pub expires: i64,

    /// Issued At (iat), overwritten on every create
    pub issued_at: i64,

    /// Not Before (nbf), carried but never enforced
    pub not_before: i64,

    /// Subject (sub)
    pub subject: String,

    /// Audience (aud)
    pub audience: String,

    /// Issuer (iss)
    pub issuer: String,

    raw: Object,
}

impl Claims {
    /// Empty claims
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_expires(mut self, expires: i64) -> Self {
        self.expires = expires;
        self
    }

    pub fn with_not_before(mut self, not_before: i64) -> Self {
        self.not_before = not_before;
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Every field of the decoded payload, including unrecognized ones
    pub fn raw(&self) -> &Object {
        &self.raw
    }

    /// A single field of the decoded payload by its JSON name
    pub fn raw_value(&self, name: &str) -> Option<&Value> {
        self.raw.get(name)
    }

    /// Serialize the standard fields to payload JSON
    pub(crate) fn to_json(&self) -> String {
        miniserde::json::to_string(&ClaimsOut {
            expires: self.expires,
            issued_at: self.issued_at,
            not_before: self.not_before,
            subject: self.subject.clone(),
            audience: self.audience.clone(),
            issuer: self.issuer.clone(),
        })
    }

    /// Decode payload JSON into typed claims plus the raw field map
    pub(crate) fn from_json(json: &str) -> Result<Self> {
        let typed: ClaimsIn = miniserde::json::from_str(json)
            .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse claims: {e}")))?;
        let raw: Object = miniserde::json::from_str(json)
            .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse claims: {e}")))?;

        Ok(Self {
            expires: typed.expires.unwrap_or_default(),
            issued_at: typed.issued_at.unwrap_or_default(),
            not_before: typed.not_before.unwrap_or_default(),
            subject: typed.subject.unwrap_or_default(),
            audience: typed.audience.unwrap_or_default(),
            issuer: typed.issuer.unwrap_or_default(),
            raw,
        })
    }
}

#[derive(Serialize)]
struct ClaimsOut {
    #[serde(rename = "exp")]
    expires: i64,
    #[serde(rename = "iat")]
    issued_at: i64,
    #[serde(rename = "nbf")]
    not_before: i64,
    #[serde(rename = "sub")]
    subject: String,
    #[serde(rename = "aud")]
    audience: String,
    #[serde(rename = "iss")]
    issuer: String,
}

#[derive(Deserialize)]
struct ClaimsIn {
    #[serde(rename = "exp")]
    expires: Option<i64>,
    #[serde(rename = "iat")]
    issued_at: Option<i64>,
    #[serde(rename = "nbf")]
    not_before: Option<i64>,
    #[serde(rename = "sub")]
    subject: Option<String>,
    #[serde(rename = "aud")]
    audience: Option<String>,
    #[serde(rename = "iss")]
    issuer: Option<String>,
}
