use chrono::Utc;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::entity::{category, product};
use crate::error::AppError;
use crate::models::category::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::models::shared::{DisabledState, changed};
use crate::utils::id::new_id;

use super::listing::{ListParams, search_condition};
use super::map_constraint_err;

pub const SORT_COLUMNS: &str = "created_at, updated_at, name";

/// Resolve an `order_by` value against the sortable category columns.
pub fn sort_column(raw: &str) -> Option<category::Column> {
    match raw {
        "created_at" => Some(category::Column::CreatedAt),
        "updated_at" => Some(category::Column::UpdatedAt),
        "name" => Some(category::Column::Name),
        _ => None,
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Category not found".into())
}

pub struct CategoryService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> CategoryService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    pub async fn create(
        &self,
        req: CreateCategoryRequest,
        default_image: &str,
    ) -> Result<category::Model, AppError> {
        let model = category::ActiveModel {
            id: Set(new_id()),
            created_at: Set(Utc::now()),
            name: Set(req.name.trim().to_string()),
            description: Set(req.description.trim().to_string()),
            image: Set(default_image.to_string()),
            ..Default::default()
        };

        model
            .insert(self.conn)
            .await
            .map_err(|e| map_constraint_err(e, "Category already exists"))
    }

    /// One page of non-deleted categories plus the total match count.
    pub async fn list(
        &self,
        params: &ListParams<category::Column>,
    ) -> Result<(Vec<category::Model>, u64), AppError> {
        let mut query = category::Entity::find().filter(category::Column::DeletedAt.is_null());

        if let Some(ref term) = params.search {
            query = query.filter(search_condition(
                [category::Column::Name, category::Column::Description],
                term,
            ));
        }

        let total = query.clone().count(self.conn).await?;

        let items = query
            .order_by(params.order_by, params.order_dir.clone())
            .order_by(category::Column::Id, Order::Asc)
            .offset(params.offset())
            .limit(params.limit)
            .all(self.conn)
            .await?;

        Ok((items, total))
    }

    /// Fetch a non-deleted category.
    pub async fn find(&self, id: &str) -> Result<category::Model, AppError> {
        category::Entity::find_by_id(id)
            .filter(category::Column::DeletedAt.is_null())
            .one(self.conn)
            .await?
            .ok_or_else(not_found)
    }

    /// Fetch a non-deleted category with a `FOR UPDATE` row lock.
    async fn find_for_update(&self, id: &str) -> Result<category::Model, AppError> {
        category::Entity::find_by_id(id)
            .filter(category::Column::DeletedAt.is_null())
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
        req: UpdateCategoryRequest,
    ) -> Result<category::Model, AppError> {
        let current = self.find_for_update(id).await?;

        let name = changed(&current.name, req.name.map(|s| s.trim().to_string()));
        let description = changed(
            &current.description,
            req.description.map(|s| s.trim().to_string()),
        );
        if name.is_none() && description.is_none() {
            return Err(AppError::Validation("No fields to update".into()));
        }

        let mut active: category::ActiveModel = current.into();
        if let Some(name) = name {
            active.name = Set(name);
        }
        if let Some(description) = description {
            active.description = Set(description);
        }
        active.updated_at = Set(Some(Utc::now()));

        active
            .update(self.conn)
            .await
            .map_err(|e| map_constraint_err(e, "Category name already exists"))
    }

    /// Soft-delete a category that no live product references.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let current = self.find_for_update(id).await?;

        let in_use = product::Entity::find()
            .filter(product::Column::CategoryId.eq(current.id.as_str()))
            .filter(product::Column::DeletedAt.is_null())
            .count(self.conn)
            .await?;
        if in_use > 0 {
            return Err(AppError::Conflict(
                "Category still has products and cannot be deleted".into(),
            ));
        }

        category::Entity::update_many()
            .col_expr(category::Column::DeletedAt, Expr::value(Utc::now()))
            .filter(category::Column::Id.eq(current.id))
            .exec(self.conn)
            .await?;

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

        category::Entity::update_many()
            .col_expr(category::Column::DisabledAt, Expr::value(disabled_at))
            .col_expr(category::Column::UpdatedAt, Expr::value(now))
            .filter(category::Column::Id.eq(current.id))
            .exec(self.conn)
            .await?;

        Ok(state)
    }

    /// Point a non-deleted category at a new image URL.
    pub async fn set_image(&self, id: &str, url: &str) -> Result<(), AppError> {
        let result = category::Entity::update_many()
            .col_expr(category::Column::Image, Expr::value(url))
            .col_expr(category::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(category::Column::Id.eq(id))
            .filter(category::Column::DeletedAt.is_null())
            .exec(self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(not_found());
        }
        Ok(())
    }
}
