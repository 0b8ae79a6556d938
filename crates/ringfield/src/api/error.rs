//! Error types for Ringfield.
//!
//! Only configuration can fail. Everything at frame time degrades to a
//! stalled or empty field instead of an error.

use std::fmt;

/// Errors produced while building or validating a field.
#[derive(Debug)]
pub enum FieldError {
    /// A tunable is outside its valid range.
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
    /// More particles requested than the pairwise pass is sized for.
    TooManyParticles { requested: usize, max: usize },
    /// Configuration JSON failed to parse.
    Json(serde_json::Error),
}

impl FieldError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        FieldError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::InvalidConfig { field, reason } => {
                write!(f, "Invalid field config `{}`: {}", field, reason)
            }
            FieldError::TooManyParticles { requested, max } => write!(
                f,
                "Requested {} particles, but at most {} are supported",
                requested, max
            ),
            FieldError::Json(e) => write!(f, "Failed to parse field config: {}", e),
        }
    }
}

impl std::error::Error for FieldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FieldError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FieldError {
    fn from(e: serde_json::Error) -> Self {
        FieldError::Json(e)
    }
}
