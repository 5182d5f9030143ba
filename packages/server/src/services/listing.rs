use sea_orm::Order;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Condition, Func, IntoColumnRef, LikeExpr};

use crate::error::AppError;
use crate::models::shared::escape_like;

pub const DEFAULT_LIMIT: u64 = 20;
pub const MAX_LIMIT: u64 = 100;
/// Largest page whose offset still fits a Postgres `bigint`.
pub const MAX_PAGE: u64 = i64::MAX as u64 / MAX_LIMIT;

/// Normalized pagination, search and ordering for a list query.
#[derive(Debug, Clone, PartialEq)]
pub struct ListParams<C> {
    pub page: u64,
    pub limit: u64,
    /// Trimmed, non-empty search term.
    pub search: Option<String>,
    pub order_by: C,
    pub order_dir: Order,
}

impl<C> ListParams<C> {
    /// Build list parameters from raw query strings.
    ///
    /// `page` below 1 or unparsable becomes 1, and is capped at [`MAX_PAGE`].
    /// `limit` below 1 or unparsable
    /// becomes [`DEFAULT_LIMIT`], and is capped at [`MAX_LIMIT`]. `order_dir`
    /// is `asc` case-insensitively, anything else sorts descending.
    /// `sort_column` resolves `order_by` against the caller's allow-list.
    pub fn parse(
        page: Option<&str>,
        limit: Option<&str>,
        search: Option<&str>,
        order_by: Option<&str>,
        order_dir: Option<&str>,
        sort_column: impl FnOnce(&str) -> Option<C>,
        allowed: &str,
    ) -> Result<Self, AppError> {
        let order_by = match order_by.map(str::trim).filter(|s| !s.is_empty()) {
            None => "updated_at",
            Some(raw) => raw,
        };
        let order_by = sort_column(order_by).ok_or_else(|| {
            AppError::Validation(format!("order_by must be one of: {allowed}"))
        })?;

        Ok(Self {
            page: positive(page).unwrap_or(1).min(MAX_PAGE),
            limit: positive(limit).unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT),
            search: search
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            order_by,
            order_dir: sort_direction(order_dir),
        })
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

fn positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
        .map(|v| v as u64)
}

fn sort_direction(raw: Option<&str>) -> Order {
    match raw {
        Some(dir) if dir.trim().eq_ignore_ascii_case("asc") => Order::Asc,
        _ => Order::Desc,
    }
}

/// Case-insensitive substring match of `term` against any of `columns`.
pub fn search_condition<C, I>(columns: I, term: &str) -> Condition
where
    C: IntoColumnRef,
    I: IntoIterator<Item = C>,
{
    use sea_orm::ExprTrait;

    let pattern = format!("%{}%", escape_like(term).to_lowercase());
    columns.into_iter().fold(Condition::any(), |cond, col| {
        cond.add(
            Expr::expr(Func::lower(Expr::col(col)))
                .like(LikeExpr::new(pattern.clone()).escape('\\')),
        )
    })
}
