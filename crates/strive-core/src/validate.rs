//! Field validation for inbound records

use thiserror::Error;

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Name of the offending field as it appears in payloads
    pub field: &'static str,
    /// Human-readable description of the problem
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Require a text field to be present and non-blank.
pub fn require_text(field: &'static str, value: Option<&str>) -> Result<String, ValidationError> {
    match value {
        None => Err(ValidationError::new(field, "This field is required.")),
        Some(s) if s.trim().is_empty() => {
            Err(ValidationError::new(field, "This field may not be blank."))
        }
        Some(s) => Ok(s.to_string()),
    }
}

/// Check that a value looks like an email address.
///
/// Deliberately loose: one `@`, a non-empty local part, a dotted domain,
/// no whitespace. Anything stricter rejects real addresses.
pub fn check_email(field: &'static str, value: &str) -> Option<ValidationError> {
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    let ok = !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace);
    if ok {
        None
    } else {
        Some(ValidationError::new(field, "Enter a valid email address."))
    }
}

/// Check that a duration is a usable number of minutes.
pub fn check_duration(field: &'static str, value: f64) -> Option<ValidationError> {
    if !value.is_finite() {
        Some(ValidationError::new(field, "A valid number is required."))
    } else if value < 0.0 {
        Some(ValidationError::new(field, "Duration must not be negative."))
    } else {
        None
    }
}
