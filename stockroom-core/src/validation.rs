use serde::Serialize;

use crate::error::HttpError;

// ── Error types ────────────────────────────────────────────

/// A field-level validation error.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// Container for validation errors, used as the payload of `HttpError::Validation`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

impl ValidationErrorResponse {
    /// A response holding a single field error.
    pub fn single(
        field: impl Into<String>,
        message: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            errors: vec![FieldError {
                field: field.into(),
                message: message.into(),
                code: code.into(),
            }],
        }
    }

    /// Whether the named field has at least one error.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

impl From<ValidationErrorResponse> for HttpError {
    fn from(resp: ValidationErrorResponse) -> Self {
        HttpError::Validation(resp)
    }
}

// ── garde bridge ───────────────────────────────────────────

/// Run `garde` validation on a value and convert a failing report into
/// field errors.
pub fn validate<T>(value: &T) -> Result<(), ValidationErrorResponse>
where
    T: garde::Validate,
    T::Context: Default,
{
    value.validate().map_err(|report| convert_garde_report(&report))
}

pub fn convert_garde_report(report: &garde::Report) -> ValidationErrorResponse {
    let errors = report
        .iter()
        .map(|(path, error)| {
            let field = {
                let s = path.to_string();
                if s.is_empty() { "value".to_string() } else { s }
            };
            FieldError {
                field,
                message: error.message().to_string(),
                code: "validation".to_string(),
            }
        })
        .collect();
    ValidationErrorResponse { errors }
}

// Re-export garde::Validate for convenience.
pub use garde::Validate;
