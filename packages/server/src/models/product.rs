use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::entity::product;
use crate::error::AppError;

use super::shared::{double_option, validate_decimal, validate_max_text, validate_required_text};

pub const NAME_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 510;
pub const SKU_MAX_LEN: usize = 100;
pub const DIMENSIONS_MAX_LEN: usize = 100;

/// `numeric(10, 2)`
const PRICE_PRECISION: (u32, u32) = (10, 2);
/// `numeric(10, 3)`
const WEIGHT_PRECISION: (u32, u32) = (10, 3);

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Trail Runner")]
    pub name: String,
    pub description: String,
    #[schema(value_type = f64, example = 89.99)]
    pub price: Decimal,
    #[schema(example = 12)]
    pub stock_quantity: i32,
    pub category_id: String,
    #[schema(example = "TR-001")]
    pub sku: String,
    /// In kilograms.
    #[schema(value_type = Option<f64>)]
    pub weight: Option<Decimal>,
    #[schema(example = "30x20x12 cm")]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

/// Partial product update. `weight` and `dimensions` may be sent as `null`
/// to clear them.
#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub category_id: Option<String>,
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<f64>)]
    pub weight: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub dimensions: Option<Option<String>>,
    pub is_featured: Option<bool>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64, example = 89.99)]
    pub price: Decimal,
    pub stock_quantity: i32,
    pub category_id: String,
    /// Display name of the owning category.
    pub category_name: Option<String>,
    pub sku: String,
    #[serde(serialize_with = "rust_decimal::serde::float_option::serialize")]
    #[schema(value_type = Option<f64>)]
    pub weight: Option<Decimal>,
    pub dimensions: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub disabled_at: Option<DateTime<Utc>>,
}

impl ProductResponse {
    pub fn new(m: product::Model, category_name: Option<String>) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            image: m.image,
            price: m.price,
            stock_quantity: m.stock_quantity,
            category_id: m.category_id,
            category_name,
            sku: m.sku,
            weight: m.weight,
            dimensions: m.dimensions,
            is_featured: m.is_featured,
            created_at: m.created_at,
            updated_at: m.updated_at,
            disabled_at: m.disabled_at,
        }
    }
}

/// Query parameters for listing products.
#[derive(Deserialize, Default, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductListQuery {
    /// Case-insensitive substring matched against name and description.
    pub search: Option<String>,
    /// Page number (default 1).
    pub page: Option<String>,
    /// Items per page (default 20, max 100).
    pub limit: Option<String>,
    /// One of `updated_at` (default), `created_at`, `name`, `price`,
    /// `stock_quantity`, `sku`.
    pub order_by: Option<String>,
    /// `asc` or `desc` (default).
    pub order_dir: Option<String>,
    /// `active` (not disabled) or `inactive` (disabled).
    pub status: Option<String>,
}

/// Visibility filter for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductStatus {
    Active,
    Inactive,
}

impl ProductStatus {
    /// Parse the `status` query parameter. Absent or blank means no filter.
    pub fn parse(raw: Option<&str>) -> Result<Option<Self>, AppError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some("active") => Ok(Some(ProductStatus::Active)),
            Some("inactive") => Ok(Some(ProductStatus::Inactive)),
            Some(_) => Err(AppError::Validation("Invalid status value".into())),
        }
    }
}

fn validate_price(price: Decimal) -> Result<(), AppError> {
    validate_decimal("Price", price, PRICE_PRECISION.0, PRICE_PRECISION.1)
}

fn validate_weight(weight: Decimal) -> Result<(), AppError> {
    validate_decimal("Weight", weight, WEIGHT_PRECISION.0, WEIGHT_PRECISION.1)
}

fn validate_stock(stock: i32) -> Result<(), AppError> {
    if stock < 0 {
        return Err(AppError::Validation(
            "Stock quantity must not be negative".into(),
        ));
    }
    Ok(())
}

fn validate_category_id(category_id: &str) -> Result<(), AppError> {
    if category_id.trim().is_empty() {
        return Err(AppError::Validation("Category ID is required".into()));
    }
    Ok(())
}

pub fn validate_create_product(req: &CreateProductRequest) -> Result<(), AppError> {
    validate_required_text("Name", &req.name, NAME_MAX_LEN)?;
    validate_max_text("Description", &req.description, DESCRIPTION_MAX_LEN)?;
    validate_price(req.price)?;
    validate_stock(req.stock_quantity)?;
    validate_category_id(&req.category_id)?;
    validate_required_text("SKU", &req.sku, SKU_MAX_LEN)?;
    if let Some(weight) = req.weight {
        validate_weight(weight)?;
    }
    if let Some(ref dimensions) = req.dimensions {
        validate_max_text("Dimensions", dimensions, DIMENSIONS_MAX_LEN)?;
    }
    Ok(())
}

pub fn validate_update_product(req: &UpdateProductRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_required_text("Name", name, NAME_MAX_LEN)?;
    }
    if let Some(ref description) = req.description {
        validate_max_text("Description", description, DESCRIPTION_MAX_LEN)?;
    }
    if let Some(price) = req.price {
        validate_price(price)?;
    }
    if let Some(stock) = req.stock_quantity {
        validate_stock(stock)?;
    }
    if let Some(ref category_id) = req.category_id {
        validate_category_id(category_id)?;
    }
    if let Some(ref sku) = req.sku {
        validate_required_text("SKU", sku, SKU_MAX_LEN)?;
    }
    if let Some(Some(weight)) = req.weight {
        validate_weight(weight)?;
    }
    if let Some(Some(ref dimensions)) = req.dimensions {
        validate_max_text("Dimensions", dimensions, DIMENSIONS_MAX_LEN)?;
    }
    Ok(())
}
