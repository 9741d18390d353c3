//! Errors for jwtmint

use thiserror::Error;

/// Broad failure category of an [`Error`]
///
/// Lets callers branch on "the caller set something up wrong" versus "the token
/// is not trustworthy" without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Key, secret or algorithm setup is unusable
    Configuration,
    /// Malformed PEM, base64, JSON or token layout
    Format,
    /// Data handed to an operation is unusable
    Input,
    /// Token failed algorithm identity or signature checks
    Trust,
    /// Signing failed while creating a token
    Signing,
}

/// jwtmint Errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Key is empty")]
    KeyMissing,

    #[error("Secret can't be empty")]
    SecretMissing,

    #[error("Algorithm can't be absent")]
    AlgorithmMissing,

    #[error("Multiple PEM blocks per key are not supported")]
    KeyMultiplePemBlocks,

    #[error("JWT algorithm '{algorithm}' does not match private key. Want: {expected}. Have: {actual}")]
    CurveMismatch {
        algorithm: String,
        expected: String,
        actual: String,
    },

    #[error("Algorithm '{0}' is not supported or not enabled")]
    AlgorithmUnsupported(String),

    // ============================================================================
    // Format Errors
    // ============================================================================
    #[error("Token too large: {size} bytes (maximum: {max} bytes)")]
    TokenTooLarge { size: usize, max: usize },

    #[error("Invalid JWT format: expected three parts separated by '.'")]
    FormatInvalid,

    #[error("Base64URL decoding failed: {0}")]
    FormatInvalidBase64(String),

    #[error("JSON parsing failed: {0}")]
    FormatInvalidJson(String),

    #[error("Could not parse private key from PEM: {0}")]
    KeyInvalidPem(String),

    #[error("Invalid private key: {0}")]
    KeyInvalid(String),

    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("Data to be signed can't be empty")]
    DataMissing,

    // ============================================================================
    // Trust Errors
    // ============================================================================
    #[error("Invalid JWT algorithm: '{0}'")]
    AlgorithmInvalid(String),

    #[error("Invalid signature")]
    SignatureInvalid,

    // ============================================================================
    // Signing Errors
    // ============================================================================
    #[error("Signature primitive failed: {0}")]
    Crypto(String),

    #[error("Failed to sign token: {0}")]
    SigningFailed(#[source] Box<Error>),
}

impl Error {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::KeyMissing
            | Error::SecretMissing
            | Error::AlgorithmMissing
            | Error::KeyMultiplePemBlocks
            | Error::CurveMismatch { .. }
            | Error::AlgorithmUnsupported(_) => ErrorKind::Configuration,

            Error::TokenTooLarge { .. }
            | Error::FormatInvalid
            | Error::FormatInvalidBase64(_)
            | Error::FormatInvalidJson(_)
            | Error::KeyInvalidPem(_)
            | Error::KeyInvalid(_) => ErrorKind::Format,

            Error::DataMissing => ErrorKind::Input,

            Error::AlgorithmInvalid(_) | Error::SignatureInvalid => ErrorKind::Trust,

            Error::Crypto(_) | Error::SigningFailed(_) => ErrorKind::Signing,
        }
    }
}

/// Result type alias for jwtmint operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(Error::SecretMissing.kind(), ErrorKind::Configuration);
        assert_eq!(
            Error::CurveMismatch {
                algorithm: "ES384".into(),
                expected: "P-384".into(),
                actual: "P-256".into(),
            }
            .kind(),
            ErrorKind::Configuration
        );
        assert_eq!(Error::FormatInvalid.kind(), ErrorKind::Format);
        assert_eq!(Error::KeyInvalidPem("x".into()).kind(), ErrorKind::Format);
        assert_eq!(Error::DataMissing.kind(), ErrorKind::Input);
        assert_eq!(Error::SignatureInvalid.kind(), ErrorKind::Trust);
        assert_eq!(
            Error::AlgorithmInvalid("none".into()).kind(),
            ErrorKind::Trust
        );
        assert_eq!(
            Error::SigningFailed(Box::new(Error::DataMissing)).kind(),
            ErrorKind::Signing
        );
    }

    #[test]
    fn test_curve_mismatch_names_both_curves() {
        let err = Error::CurveMismatch {
            algorithm: "ES384".into(),
            expected: "P-384".into(),
            actual: "P-256".into(),
        };
        let message = err.to_string();
        assert!(message.contains("P-384"));
        assert!(message.contains("P-256"));
    }

    #[test]
    fn test_signing_failed_wraps_source() {
        let err = Error::SigningFailed(Box::new(Error::DataMissing));
        assert_eq!(
            err.to_string(),
            "Failed to sign token: Data to be signed can't be empty"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
