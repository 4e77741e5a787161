//! Error types for registry operations.
//!
//! Failures are never fatal: every operation returns a structured
//! [`RegistryError`] that callers can match on or serialize for display.

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

/// A single field-level validation failure.
///
/// Create requests are validated structurally before any other processing;
/// every invalid field produces one entry, so a bad URL never hides a bad
/// validity period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors returned by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// One or more request fields failed structural validation.
    #[error("validation failed for {} field(s)", errors.len())]
    Validation { errors: Vec<FieldError> },

    /// The concurrent-active-link quota is full.
    ///
    /// Only reachable after validation passed; freeing a slot (expiry or
    /// deletion) makes creation possible again.
    #[error("maximum of {limit} concurrent active links reached")]
    CapacityExceeded { active: usize, limit: usize },

    /// A user-supplied custom code collides with a currently-active record.
    #[error("short code '{code}' is already taken")]
    CodeTaken { code: String },

    /// Random code generation kept colliding until the attempt bound.
    #[error("unable to generate a unique short code after {attempts} attempts")]
    CodeExhausted { attempts: usize },

    /// No matching record for a resolve or remove.
    #[error("{message}")]
    NotFound { message: String, details: Value },
}

impl RegistryError {
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable error code, used by the audit log and CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::CapacityExceeded { .. } => "capacity_exceeded",
            Self::CodeTaken { .. } => "code_taken",
            Self::CodeExhausted { .. } => "code_generation_exhausted",
            Self::NotFound { .. } => "not_found",
        }
    }

    /// Structured payload describing the failure.
    pub fn details(&self) -> Value {
        match self {
            Self::Validation { errors } => json!({ "fields": errors }),
            Self::CapacityExceeded { active, limit } => {
                json!({ "active": active, "limit": limit })
            }
            Self::CodeTaken { code } => json!({ "code": code }),
            Self::CodeExhausted { attempts } => json!({ "attempts": attempts }),
            Self::NotFound { details, .. } => details.clone(),
        }
    }
}

impl From<validator::ValidationErrors> for RegistryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .and_then(|e| e.message.as_ref())
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("invalid value for '{field}'"));
                FieldError::new(field.to_string(), message)
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        Self::Validation { errors: fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_stable_per_variant() {
        let err = RegistryError::CapacityExceeded {
            active: 5,
            limit: 5,
        };
        assert_eq!(err.kind(), "capacity_exceeded");

        let err = RegistryError::not_found("gone", json!({ "code": "abc123" }));
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_validation_details_list_every_field() {
        let err = RegistryError::Validation {
            errors: vec![
                FieldError::new("original_url", "must be a valid URL"),
                FieldError::new("validity_minutes", "must be between 1 and 1440"),
            ],
        };

        let details = err.details();
        let fields = details["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["field"], "original_url");
    }

    #[test]
    fn test_display_messages() {
        let err = RegistryError::CodeTaken {
            code: "promo1".to_string(),
        };
        assert!(err.to_string().contains("promo1"));

        let err = RegistryError::CodeExhausted { attempts: 10 };
        assert!(err.to_string().contains("10 attempts"));
    }
}
