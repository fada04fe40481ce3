//! Field-scoped validation and conflict errors.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A validation or conflict error attached to one named input field.
///
/// Returned inside success-shaped envelopes instead of being thrown, so
/// clients can render inline form errors next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Name of the input field the error applies to.
    #[schema(example = "username")]
    pub field: String,
    /// Human-readable message suitable for inline rendering.
    #[schema(example = "username requires at least 2 characters")]
    pub message: String,
}

impl FieldError {
    /// Build a field error from a field name and message.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
