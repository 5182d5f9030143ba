use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    /// UUIDv7 in simple (32 hex chars) form.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
    pub disabled_at: Option<DateTimeUtc>,
    /// Soft-delete marker. Rows with this set are invisible to every read.
    pub deleted_at: Option<DateTimeUtc>,

    /// Unique among non-deleted rows (partial index, see `database::ensure_indexes`).
    pub name: String,
    pub description: String,
    pub image: String,

    #[sea_orm(has_many)]
    pub products: HasMany<super::product::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
