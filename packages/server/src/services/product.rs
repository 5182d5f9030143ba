use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entity::{category, product};
use crate::error::AppError;
use crate::models::product::{CreateProductRequest, ProductStatus, UpdateProductRequest};
use crate::models::shared::{DisabledState, changed};
use crate::utils::id::new_id;

use super::listing::{ListParams, search_condition};
use super::map_constraint_err;

pub const SORT_COLUMNS: &str = "created_at, updated_at, name, price, stock_quantity, sku";

const CONFLICT: &str = "Product name or SKU already exists";

/// Resolve an `order_by` value against the sortable product columns.
pub fn sort_column(raw: &str) -> Option<product::Column> {
    match raw {
        "created_at" => Some(product::Column::CreatedAt),
        "updated_at" => Some(product::Column::UpdatedAt),
        "name" => Some(product::Column::Name),
        "price" => Some(product::Column::Price),
        "stock_quantity" => Some(product::Column::StockQuantity),
        "sku" => Some(product::Column::Sku),
        _ => None,
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Product not found".into())
}

/// A product together with its category's display name.
pub type ProductWithCategory = (product::Model, Option<String>);

pub struct ProductService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> ProductService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Fetch a live category and hold a shared lock on it so it cannot be
    /// deleted before the referencing write commits.
    async fn require_category(&self, id: &str) -> Result<category::Model, AppError> {
        category::Entity::find_by_id(id)
            .filter(category::Column::DeletedAt.is_null())
            .lock(LockType::Share)
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::Validation("Category does not exist".into()))
    }

    pub async fn create(
        &self,
        req: CreateProductRequest,
        default_image: &str,
    ) -> Result<ProductWithCategory, AppError> {
        let category = self.require_category(req.category_id.trim()).await?;

        let model = product::ActiveModel {
            id: Set(new_id()),
            created_at: Set(Utc::now()),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description.trim().to_string()),
            image: Set(default_image.to_string()),
            price: Set(req.price),
            stock_quantity: Set(req.stock_quantity),
            category_id: Set(category.id),
            sku: Set(req.sku.trim().to_string()),
            weight: Set(req.weight),
            dimensions: Set(req.dimensions.map(|d| d.trim().to_string())),
            is_featured: Set(req.is_featured),
            ..Default::default()
        };

        let model = model
            .insert(self.conn)
            .await
            .map_err(|e| map_constraint_err(e, CONFLICT))?;

        Ok((model, Some(category.name)))
    }

    /// One page of non-deleted products, each with its category name, plus
    /// the total match count.
    pub async fn list(
        &self,
        params: &ListParams<product::Column>,
        status: Option<ProductStatus>,
    ) -> Result<(Vec<ProductWithCategory>, u64), AppError> {
        let mut query = product::Entity::find().filter(product::Column::DeletedAt.is_null());

        if let Some(ref term) = params.search {
            query = query.filter(search_condition(
                [
                    (product::Entity, product::Column::Name),
                    (product::Entity, product::Column::Description),
                ],
                term,
            ));
        }

        match status {
            Some(ProductStatus::Active) => {
                query = query.filter(product::Column::DisabledAt.is_null());
            }
            Some(ProductStatus::Inactive) => {
                query = query.filter(product::Column::DisabledAt.is_not_null());
            }
            None => {}
        }

        let total = query.clone().count(self.conn).await?;

        let rows = query
            .find_also_related(category::Entity)
            .order_by(params.order_by, params.order_dir.clone())
            .order_by(product::Column::Id, Order::Asc)
            .offset(params.offset())
            .limit(params.limit)
            .all(self.conn)
            .await?;

        let items = rows
            .into_iter()
            .map(|(p, c)| (p, c.map(|c| c.name)))
            .collect();

        Ok((items, total))
    }

    /// Fetch a non-deleted product with its category name.
    pub async fn find(&self, id: &str) -> Result<ProductWithCategory, AppError> {
        let (model, category) = product::Entity::find_by_id(id)
            .filter(product::Column::DeletedAt.is_null())
            .find_also_related(category::Entity)
            .one(self.conn)
            .await?
            .ok_or_else(not_found)?;

        Ok((model, category.map(|c| c.name)))
    }

    /// Fetch a non-deleted product with a `FOR UPDATE` row lock.
    async fn find_for_update(&self, id: &str) -> Result<product::Model, AppError> {
        product::Entity::find_by_id(id)
            .filter(product::Column::DeletedAt.is_null())
            .lock(LockType::Update)
            .one(self.conn)
            .await?
            .ok_or_else(not_found)
    }

    /// Apply the fields of `req` that differ from the stored values.
    ///
    /// Run inside a transaction so the row lock covers the comparison.
    pub async fn edit(
        &self,
        id: &str,
        req: UpdateProductRequest,
    ) -> Result<product::Model, AppError> {
        let current = self.find_for_update(id).await?;
        let mut active: product::ActiveModel = current.clone().into();

        if let Some(name) = changed(&current.name, req.name.map(|s| s.trim().to_string())) {
            active.name = Set(name);
        }
        if let Some(description) = changed(
            &current.description,
            req.description.map(|s| s.trim().to_string()),
        ) {
            active.description = Set(description);
        }
        if let Some(price) = changed(&current.price, req.price) {
            active.price = Set(price);
        }
        if let Some(stock) = changed(&current.stock_quantity, req.stock_quantity) {
            active.stock_quantity = Set(stock);
        }
        if let Some(category_id) = changed(
            &current.category_id,
            req.category_id.map(|s| s.trim().to_string()),
        ) {
            self.require_category(&category_id).await?;
            active.category_id = Set(category_id);
        }
        if let Some(sku) = changed(&current.sku, req.sku.map(|s| s.trim().to_string())) {
            active.sku = Set(sku);
        }
        if let Some(weight) = changed(&current.weight, req.weight) {
            active.weight = Set(weight);
        }
        if let Some(dimensions) = changed(
            &current.dimensions,
            req.dimensions.map(|d| d.map(|s| s.trim().to_string())),
        ) {
            active.dimensions = Set(dimensions);
        }
        if let Some(featured) = changed(&current.is_featured, req.is_featured) {
            active.is_featured = Set(featured);
        }

        if !active.is_changed() {
            return Err(AppError::Validation("No fields to update".into()));
        }
        active.updated_at = Set(Some(Utc::now()));

        active
            .update(self.conn)
            .await
            .map_err(|e| map_constraint_err(e, CONFLICT))
    }

    /// Soft-delete a product.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = product::Entity::update_many()
            .col_expr(product::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(product::Column::Id.eq(id))
            .filter(product::Column::DeletedAt.is_null())
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    /// Flip the disabled marker and report the resulting state.
    pub async fn toggle_disabled(&self, id: &str) -> Result<DisabledState, AppError> {
        let current = self.find_for_update(id).await?;

        let now = Utc::now();
        let (disabled_at, state) = match current.disabled_at {
            None => (Some(now), DisabledState::Disabled),
            Some(_) => (None, DisabledState::Enabled),
        };

        product::Entity::update_many()
            .col_expr(product::Column::DisabledAt, Expr::value(disabled_at))
            .col_expr(product::Column::UpdatedAt, Expr::value(now))
            .filter(product::Column::Id.eq(current.id))
            .exec(self.conn)
            .await?;

        Ok(state)
    }

    /// Point a non-deleted product at a new image URL.
    pub async fn set_image(&self, id: &str, url: &str) -> Result<(), AppError> {
        let result = product::Entity::update_many()
            .col_expr(product::Column::Image, Expr::value(url))
            .col_expr(product::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(product::Column::Id.eq(id))
            .filter(product::Column::DeletedAt.is_null())
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
