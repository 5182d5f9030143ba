use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::category;
use crate::error::AppError;

use super::shared::{validate_max_text, validate_required_text};

pub const NAME_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 510;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateCategoryRequest {
    #[schema(example = "Shoes")]
    pub name: String,
    #[schema(example = "Footwear")]
    pub description: String,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct CategoryResponse {
    #[schema(example = "0192f1c8a1b27c3d9e0f112233445566")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Set while the category is disabled.
    pub disabled_at: Option<DateTime<Utc>>,
}

impl From<category::Model> for CategoryResponse {
    fn from(m: category::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            image: m.image,
            created_at: m.created_at,
            updated_at: m.updated_at,
            disabled_at: m.disabled_at,
        }
    }
}

/// Query parameters for listing categories.
///
/// Numeric parameters are parsed leniently: anything that is not a positive
/// integer falls back to the default.
#[derive(Deserialize, Default, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryListQuery {
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
    /// Page number (default 1).
    pub page: Option<String>,
    /// Items per page (default 20, max 100).
    pub limit: Option<String>,
    /// One of `updated_at` (default), `created_at`, `name`.
    pub order_by: Option<String>,
    /// `asc` or `desc` (default).
    pub order_dir: Option<String>,
}

pub fn validate_create_category(req: &CreateCategoryRequest) -> Result<(), AppError> {
    validate_required_text("Name", &req.name, NAME_MAX_LEN)?;
    validate_max_text("Description", &req.description, DESCRIPTION_MAX_LEN)?;
    Ok(())
}

pub fn validate_update_category(req: &UpdateCategoryRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_required_text("Name", name, NAME_MAX_LEN)?;
    }
    if let Some(ref description) = req.description {
        validate_max_text("Description", description, DESCRIPTION_MAX_LEN)?;
    }
    Ok(())
}
