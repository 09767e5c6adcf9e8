//! # Database State
//!
//! Opens the catalog database named by the configuration.

use std::path::Path;

use dispatch_db::{Database, DbConfig, DbResult};
use tracing::info;

/// Wrapper around the [`Database`] handle.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Opens (creating if needed) the database file and applies migrations.
    pub async fn open(path: &Path) -> DbResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| dispatch_db::DbError::ConnectionFailed(e.to_string()))?;
        }

        let db = Database::new(DbConfig::new(path)).await?;
        info!(path = %path.display(), "Database ready");
        Ok(DbState { db })
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
