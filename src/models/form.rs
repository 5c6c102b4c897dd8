//! Form submission helpers: trimming, field errors and rejected submissions

use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// A single validation message attached to a form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
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

/// A submission that failed validation, kept so the form can be shown again
#[derive(Debug, Clone)]
pub struct Rejected<F> {
    pub form: F,
    pub errors: Vec<FieldError>,
}

impl<F> Rejected<F> {
    pub fn new(form: F, errors: Vec<FieldError>) -> Self {
        Self { form, errors }
    }
}

/// Flatten `validator` output into one message per failing field.
///
/// Fields listed in `order` come first, in that order, so forms always show
/// their errors top to bottom.
pub fn field_errors(errors: &ValidationErrors, order: &[&str]) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", e.code));
                FieldError::new(field.to_string(), message)
            })
        })
        .collect();

    out.sort_by_key(|e| {
        order
            .iter()
            .position(|f| *f == e.field)
            .unwrap_or(order.len())
    });
    out
}

/// Trim surrounding whitespace in place
pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

pub fn has_error(errors: &[FieldError], field: &str) -> bool {
    errors.iter().any(|e| e.field == field)
}
