//! Request payloads accepted by the JSON API.
//!
//! Each form is decoded with serde, checked with `validator` and converted
//! into the domain input it describes.

use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod articles;
pub mod associations;
pub mod videos;

/// Reasons a request payload cannot be turned into a domain input.
#[derive(Debug, Error)]
pub enum FormError {
    /// The body is not JSON of the expected shape.
    #[error("malformed payload: {0}")]
    Decode(String),
    /// A validation rule was violated.
    #[error("payload validation failed: {0}")]
    Validation(String),
    /// A value could not be converted into its domain type.
    #[error("payload contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<serde_json::Error> for FormError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decode(value.to_string())
    }
}

impl From<ValidationErrors> for FormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(describe(&value))
    }
}

/// Render field errors as `field: reason`, sorted by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let reasons = errors
                .iter()
                .map(|e| e.message.as_deref().unwrap_or(&*e.code).to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{field}: {reasons}")
        })
        .collect::<Vec<_>>();
    fields.sort();
    fields.join("; ")
}

impl From<TypeConstraintError> for FormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

/// Decode a JSON request body into a form.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, FormError> {
    Ok(serde_json::from_slice(body)?)
}
