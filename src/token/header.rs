use miniserde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fixed `typ` literal written on creation
pub const TOKEN_TYPE: &str = "jwt";

/// JWT header structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Algorithm used for signing
    pub alg: String,

    /// Token type, always "jwt" on creation
    pub typ: String,
}

impl Header {
    /// Header for a token signed by the algorithm named `alg`
    pub fn new(alg: impl Into<String>) -> Self {
        Self {
            alg: alg.into(),
            typ: TOKEN_TYPE.to_string(),
        }
    }

    pub(crate) fn to_json(&self) -> String {
        miniserde::json::to_string(self)
    }

    /// Missing or null `alg` and `typ` decode as empty. An empty `alg` is
    /// later rejected as an invalid algorithm, not as malformed JSON.
    pub(crate) fn from_json(json: &str) -> Result<Self> {
        let wire: HeaderIn = miniserde::json::from_str(json)
            .map_err(|e| Error::FormatInvalidJson(format!("Failed to parse header: {e}")))?;

        Ok(Self {
            alg: wire.alg.unwrap_or_default(),
            typ: wire.typ.unwrap_or_default(),
        })
    }
}

#[derive(Deserialize)]
struct HeaderIn {
    alg: Option<String>,
    typ: Option<String>,
}
