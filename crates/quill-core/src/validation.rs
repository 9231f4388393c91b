//! Validation utilities.

use crate::QuillError;
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `QuillError` on failure.
    fn validate_request(&self) -> Result<(), QuillError> {
        self.validate().map_err(validation_errors_to_quill_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to `QuillError`.
///
/// Field errors are flattened into one message, sorted by field name so the
/// output is stable.
#[must_use]
pub fn validation_errors_to_quill_error(errors: ValidationErrors) -> QuillError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{field}: {message}")
            })
        })
        .collect();
    messages.sort();

    QuillError::Validation(messages.join("; "))
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }
}
