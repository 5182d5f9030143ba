pub mod category;
pub mod image;
pub mod listing;
pub mod product;
pub mod user;

use sea_orm::{DbErr, SqlErr};

use crate::error::AppError;

/// Translate a constraint violation into the matching client error, passing
/// other database errors through as internal failures.
pub(crate) fn map_constraint_err(err: DbErr, conflict: &str) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(conflict.into()),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            AppError::Validation("Category does not exist".into())
        }
        _ => err.into(),
    }
}
