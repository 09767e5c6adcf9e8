//! Shared fixtures for command tests.

use std::path::{Path, PathBuf};

use dispatch_db::repository::product::new_product;
use dispatch_db::{Database, DbConfig};

use crate::state::AppConfig;

pub fn test_config() -> AppConfig {
    config_for("http://127.0.0.1:8000", Path::new("."))
}

pub fn config_for(base_url: &str, output_dir: &Path) -> AppConfig {
    AppConfig {
        invoice_api_url: base_url.trim_end_matches('/').to_string(),
        default_state_code: "37".to_string(),
        hsn_sac: "998313".to_string(),
        database_path: PathBuf::from(":memory:"),
        output_dir: output_dir.to_path_buf(),
        currency_symbol: "₹".to_string(),
    }
}

/// In-memory catalog with two products.
///
/// `APEX-20L`: DP ₹100, 10% bill, 5% cash, 18% GST, 20 L, 12 in stock.
/// `TRAC-4L`: DP ₹500, no discounts, 18% GST, 4 L, 40 in stock.
pub async fn catalog() -> Database {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    db.products()
        .insert(&new_product("APEX-20L", "Apex Ultima 20L", 10_000, 20_000, 1000, 500, 1800, 12))
        .await
        .unwrap();
    db.products()
        .insert(&new_product("TRAC-4L", "Tractor Emulsion 4L", 50_000, 4_000, 0, 0, 1800, 40))
        .await
        .unwrap();
    db
}
