//! Errors for unit lookup and conversion
//!
//! Conversion itself is a pure computation, so the only failure on that path
//! is naming a unit the registry does not know. The other variants belong to
//! the edges: building a registry and validating user input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNSUPPORTED_UNIT: &str = "UNSUPPORTED_UNIT";
    pub const INVALID_VALUE: &str = "INVALID_VALUE";
    pub const INVALID_REGISTRY: &str = "INVALID_REGISTRY";
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RulerError {
    /// A unit label that is not in the registry
    #[error("Unit not supported: {0}")]
    UnsupportedUnit(String),

    /// A value the caller refuses to convert (negative or not finite)
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A unit table that breaks the factor invariant
    #[error("Invalid unit registry: {0}")]
    InvalidRegistry(String),
}

impl RulerError {
    pub fn unsupported_unit(label: impl Into<String>) -> Self {
        RulerError::UnsupportedUnit(label.into())
    }

    pub fn invalid_value(details: impl Into<String>) -> Self {
        RulerError::InvalidValue(details.into())
    }

    pub fn invalid_registry(details: impl Into<String>) -> Self {
        RulerError::InvalidRegistry(details.into())
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            RulerError::UnsupportedUnit(_) => codes::UNSUPPORTED_UNIT,
            RulerError::InvalidValue(_) => codes::INVALID_VALUE,
            RulerError::InvalidRegistry(_) => codes::INVALID_REGISTRY,
        }
    }

    /// Hint for fixing the error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            RulerError::UnsupportedUnit(_) => Some("Use list_units to see the available units"),
            RulerError::InvalidValue(_) => {
                Some("Provide a finite value greater than or equal to 0")
            }
            RulerError::InvalidRegistry(_) => None,
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        ErrorPayload {
            code: self.code().to_string(),
            message: self.to_string(),
            suggestion: self.suggestion().map(str::to_string),
        }
    }
}

/// Structured error sent to tool clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<RulerError> for ErrorPayload {
    fn from(err: RulerError) -> Self {
        err.to_payload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_unit_message() {
        let err = RulerError::unsupported_unit("Parsec");
        assert_eq!(err.to_string(), "Unit not supported: Parsec");
        assert_eq!(err.code(), codes::UNSUPPORTED_UNIT);
    }

    #[test]
    fn test_payload_carries_suggestion() {
        let payload = RulerError::invalid_value("-1 is negative").to_payload();
        assert_eq!(payload.code, "INVALID_VALUE");
        assert_eq!(payload.message, "Invalid value: -1 is negative");
        assert!(payload.suggestion.is_some());
    }

    #[test]
    fn test_payload_skips_missing_suggestion() {
        let payload: ErrorPayload = RulerError::invalid_registry("duplicate label").into();
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["code"], "INVALID_REGISTRY");
        assert!(json.get("suggestion").is_none());
    }
}
