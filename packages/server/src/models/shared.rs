use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

/// `{ "data": ... }` envelope for single-record reads and creates.
#[derive(Serialize, utoipa::ToSchema)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Envelope for paginated list responses.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    /// Total number of matching records across all pages.
    #[schema(example = 47)]
    pub total: u64,
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Number of items per page.
    #[schema(example = 20)]
    pub limit: u64,
}

/// Result of a mutation that returns no record.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Category updated successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result of a disable toggle that also reports the resulting visibility.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StatusMessageResponse {
    /// `active` or `inactive`.
    #[schema(example = "inactive")]
    pub status: &'static str,
    #[schema(example = "Product disabled successfully")]
    pub message: String,
}

/// Result of an image change.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ImageResponse {
    #[schema(example = "Image updated successfully")]
    pub message: String,
    /// Public URL now stored on the record.
    #[schema(example = "https://cdn.example.com/categories/0192f1c8a1b27c3d9e0f112233445566.png")]
    pub url: String,
}

/// State of a record after its disabled flag was toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledState {
    Disabled,
    Enabled,
}

impl DisabledState {
    pub fn is_disabled(self) -> bool {
        self == DisabledState::Disabled
    }

    /// `inactive` for disabled records, `active` otherwise.
    pub fn status(self) -> &'static str {
        match self {
            DisabledState::Disabled => "inactive",
            DisabledState::Enabled => "active",
        }
    }

    /// e.g. "Category disabled successfully".
    pub fn message(self, entity: &str) -> String {
        match self {
            DisabledState::Disabled => format!("{entity} disabled successfully"),
            DisabledState::Enabled => format!("{entity} enabled successfully"),
        }
    }
}

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Serde helper for PATCH semantics on nullable fields.
///
/// * JSON field absent  => `None`          (don't update)
/// * JSON field = null  => `Some(None)`    (set to NULL)
/// * JSON field = value => `Some(Some(v))` (set to value)
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

/// Keep a proposed value only if it differs from the current one.
pub fn changed<T: PartialEq>(current: &T, proposed: Option<T>) -> Option<T> {
    proposed.filter(|value| value != current)
}

/// Validate a trimmed, required text field of bounded length.
pub fn validate_required_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    let value = value.trim();
    if value.is_empty() || value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be 1-{max} characters"
        )));
    }
    Ok(())
}

/// Validate an optional text field of bounded length.
pub fn validate_max_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate a non-negative decimal that fits a `numeric(precision, scale)` column.
pub fn validate_decimal(
    field: &str,
    value: Decimal,
    precision: u32,
    scale: u32,
) -> Result<(), AppError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::Validation(format!("{field} must not be negative")));
    }
    if value.normalize().scale() > scale {
        return Err(AppError::Validation(format!(
            "{field} must have at most {scale} decimal places"
        )));
    }
    let limit = Decimal::from(10u64.pow(precision - scale));
    if value >= limit {
        return Err(AppError::Validation(format!(
            "{field} must be less than {limit}"
        )));
    }
    Ok(())
}
