//! # Database Migrations
//!
//! SQL migrations embedded from `migrations/sqlite/` at compile time.
//!
//! ```text
//! migrations/sqlite/
//! ├── 001_catalog.sql         # products
//! └── 002_sales_history.sql   # append-only dispatch log
//! ```
//!
//! Never edit an applied migration; add the next numbered file instead.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending migrations. Safe to call on every start.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}
