//! Error types for the library layer.

use std::fmt;

/// Errors produced by input validation, wrapping upstream API errors.
#[derive(Debug)]
pub enum CaseLawError {
    /// An error from the underlying API crate (e.g. an ordinal out of range).
    Api(caselaw_api::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
}

impl fmt::Display for CaseLawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for CaseLawError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<caselaw_api::Error> for CaseLawError {
    fn from(e: caselaw_api::Error) -> Self {
        Self::Api(e)
    }
}
