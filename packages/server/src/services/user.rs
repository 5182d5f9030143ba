use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use crate::entity::user;
use crate::error::AppError;
use crate::models::user::CreateUserRequest;
use crate::utils::hash::hash_password;
use crate::utils::id::new_id;

use super::map_constraint_err;

pub struct UserService<'a, C: ConnectionTrait> {
    conn: &'a C,
}

impl<'a, C: ConnectionTrait> UserService<'a, C> {
    pub fn new(conn: &'a C) -> Self {
        Self { conn }
    }

    /// Create a user, storing only an Argon2id hash of the password.
    pub async fn create(
        &self,
        req: CreateUserRequest,
        default_image: &str,
    ) -> Result<user::Model, AppError> {
        let password_hash = hash_password(&req.password)
            .map_err(|e| AppError::Internal(format!("Password hash error: {e}")))?;

        let model = user::ActiveModel {
            id: Set(new_id()),
            created_at: Set(Utc::now()),
            name: Set(req.name.trim().to_string()),
            email: Set(req.email.trim().to_lowercase()),
            image: Set(default_image.to_string()),
            password_hash: Set(password_hash),
            ..Default::default()
        };

        model.insert(self.conn).await.map_err(|e| {
            tracing::debug!("User insert rejected: {e}");
            map_constraint_err(e, "User name or email already exists")
        })
    }

    /// Fetch a non-deleted user.
    pub async fn find(&self, id: &str) -> Result<user::Model, AppError> {
        user::Entity::find_by_id(id)
            .filter(user::Column::DeletedAt.is_null())
            .one(self.conn)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }
}
