//! # Product Repository
//!
//! Catalog lookups. Products are reference data: the terminal reads them,
//! only the seed binary writes them, and dispatching does not touch stock.
//!
//! ## Lookup
//! ```text
//! operator types "apex"
//!      │
//!      ▼
//! sku LIKE '%apex%' OR name LIKE '%apex%'   (ASCII case-insensitive)
//!      │
//!      ▼
//! active products ordered by name
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dispatch_core::Product;

const PRODUCT_COLUMNS: &str = r#"
    id,
    sku,
    name,
    dp_paise,
    ml_per_unit,
    bill_discount_bps,
    cash_discount_bps,
    gst_bps,
    stock,
    is_active,
    created_at,
    updated_at
"#;

/// Repository for the product catalog.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Searches active products by SKU or name fragment.
    ///
    /// An empty query lists active products.
    pub async fn search(&self, query: &str, limit: u32) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, limit = %limit, "Searching products");

        if query.is_empty() {
            return self.list_active(limit).await;
        }

        let pattern = format!("%{}%", escape_like(query));
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE is_active = 1
               AND (sku LIKE ?1 ESCAPE '\\' OR name LIKE ?1 ESCAPE '\\')
             ORDER BY name
             LIMIT ?2"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(pattern)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Lists active products sorted by name.
    pub async fn list_active(&self, limit: u32) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE is_active = 1
             ORDER BY name
             LIMIT ?1"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Gets a product by SKU, ignoring ASCII case.
    pub async fn get_by_sku(&self, sku: &str) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE sku = ?1 COLLATE NOCASE");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(sku.trim())
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Like [`get_by_sku`](Self::get_by_sku) but a missing SKU is an error.
    pub async fn require_by_sku(&self, sku: &str) -> DbResult<Product> {
        self.get_by_sku(sku)
            .await?
            .ok_or_else(|| DbError::not_found("Product", sku.trim()))
    }

    /// Inserts a new product after validating its catalog fields.
    ///
    /// A duplicate SKU surfaces as [`DbError::UniqueViolation`].
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        product.validate()?;

        debug!(sku = %product.sku, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, sku, name, dp_paise, ml_per_unit,
                bill_discount_bps, cash_discount_bps, gst_bps,
                stock, is_active, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&product.id)
        .bind(&product.sku)
        .bind(&product.name)
        .bind(product.dp_paise)
        .bind(product.ml_per_unit)
        .bind(product.bill_discount_bps)
        .bind(product.cash_discount_bps)
        .bind(product.gst_bps)
        .bind(product.stock)
        .bind(product.is_active)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &product.sku),
            other => other,
        })?;

        Ok(product.clone())
    }

    /// Counts all products, active or not.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Generates a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

/// Builds an active product stamped with the current time.
#[allow(clippy::too_many_arguments)]
pub fn new_product(
    sku: &str,
    name: &str,
    dp_paise: i64,
    ml_per_unit: i64,
    bill_discount_bps: u32,
    cash_discount_bps: u32,
    gst_bps: u32,
    stock: i64,
) -> Product {
    let now = Utc::now();
    Product {
        id: generate_product_id(),
        sku: sku.to_string(),
        name: name.to_string(),
        dp_paise,
        ml_per_unit,
        bill_discount_bps,
        cash_discount_bps,
        gst_bps,
        stock,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        repo.insert(&new_product("APEX-20L", "Apex Ultima 20L", 10_000, 20_000, 1000, 500, 1800, 12))
            .await
            .unwrap();
        repo.insert(&new_product("TRAC-4L", "Tractor Emulsion 4L", 1_850_00, 4_000, 800, 300, 1800, 40))
            .await
            .unwrap();

        let mut retired = new_product("OLD_1L", "Apex Discontinued 1L", 500_00, 1_000, 0, 0, 1800, 5);
        retired.is_active = false;
        repo.insert(&retired).await.unwrap();

        db
    }

    #[tokio::test]
    async fn test_get_by_sku_ignores_case() {
        let db = seeded().await;
        let product = db.products().get_by_sku(" apex-20l ").await.unwrap().unwrap();
        assert_eq!(product.name, "Apex Ultima 20L");
        assert_eq!(product.bill_discount_bps, 1000);
        assert_eq!(product.stock, 12);

        assert!(db.products().get_by_sku("NOPE").await.unwrap().is_none());
        assert!(matches!(
            db.products().require_by_sku("NOPE").await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_negative_stock_rejected() {
        let db = seeded().await;
        let bad = new_product("NEG-1L", "Negative", 100, 1_000, 0, 0, 1800, -1);
        let err = db.products().insert(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(_)));

        // The table refuses it too.
        let raw = sqlx::query("UPDATE products SET stock = -5 WHERE sku = 'TRAC-4L'")
            .execute(db.pool())
            .await;
        assert!(raw.is_err());
        let trac = db.products().require_by_sku("TRAC-4L").await.unwrap();
        assert_eq!(trac.stock, 40);
    }

    #[tokio::test]
    async fn test_search_skips_inactive() {
        let db = seeded().await;

        let hits = db.products().search("apex", 10).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].sku, "APEX-20L");

        let all = db.products().search("", 10).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(db.products().count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let db = seeded().await;
        assert!(db.products().search("%", 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_sku_rejected() {
        let db = seeded().await;
        let dup = new_product("APEX-20L", "Another", 100, 1_000, 0, 0, 1800, 1);
        let err = db.products().insert(&dup).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_invalid_product_rejected() {
        let db = seeded().await;
        let bad = new_product("BAD-1", "Bad", 100, 0, 0, 0, 1800, 1);
        let err = db.products().insert(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::Invalid(_)));
    }
}
