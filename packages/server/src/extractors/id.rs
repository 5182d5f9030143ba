use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::error::AppError;

/// `?id=` query parameter identifying the record a request targets.
#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    /// Record identifier.
    pub id: Option<String>,
}

/// The non-empty `id` query parameter. Rejects with 400 when it is absent.
pub struct RequiredId(pub String);

impl<S> FromRequestParts<S> for RequiredId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<IdQuery>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        match query.id.map(|id| id.trim().to_string()) {
            Some(id) if !id.is_empty() => Ok(RequiredId(id)),
            _ => Err(AppError::Validation("ID parameter is required".into())),
        }
    }
}
