use std::time::Duration;

use sea_orm::sea_query::{Index, PostgresQueryBuilder};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::entity::product;

pub async fn init_db(db_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());

    // Set connection pool options
    opt.max_connections(100)
        .min_connections(5)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .idle_timeout(Duration::from_secs(8))
        .max_lifetime(Duration::from_secs(8))
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;
    db.get_schema_registry("catalog_server::entity::*")
        .sync(&db)
        .await?;

    Ok(db)
}

/// Ensure required database indexes exist.
///
/// Schema-sync only knows plain unique columns. Category names are unique
/// among non-deleted rows only, which needs a partial index; a violation of
/// it is how a name collision is detected.
pub async fn ensure_indexes<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    db.execute_unprepared(
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_category_name_active \
         ON category (name) WHERE deleted_at IS NULL",
    )
    .await?;
    info!("Ensured index idx_category_name_active exists");

    // Listing products of a category and the delete guard both filter on it.
    let stmt = Index::create()
        .if_not_exists()
        .name("idx_product_category")
        .table(product::Entity)
        .col(product::Column::CategoryId)
        .to_string(PostgresQueryBuilder);

    match db.execute_unprepared(&stmt).await {
        Ok(_) => info!("Ensured index idx_product_category exists"),
        Err(e) => tracing::warn!("Failed to create index idx_product_category: {}", e),
    }

    Ok(())
}
