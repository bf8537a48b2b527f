//! # Product Repository
//!
//! Database operations for the inventory (`productos` table).
//!
//! ## Key Operations
//! - Dashboard listing (ordered for category grouping)
//! - Case-insensitive name search (price lookup screen)
//! - CRUD + low-stock query
//!
//! ## Hard Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Why Delete Is Safe Here                              │
//! │                                                                         │
//! │  ventas stores a NAME SNAPSHOT, not a product foreign key:             │
//! │                                                                         │
//! │  productos                     ventas                                   │
//! │  ┌────┬──────────┐            ┌────┬──────────────┬─────┐              │
//! │  │ id │ name     │            │ id │ product_name │ ... │              │
//! │  │ 7  │ Lapicera │──deleted──►│ 42 │ "Lapicera"   │ ... │ ← intact     │
//! │  └────┴──────────┘            └────┴──────────────┴─────┘              │
//! │                                                                         │
//! │  Deleting row 7 leaves sale 42 readable forever.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use mostrador_core::{NewProduct, Product, ProductUpdate};

const PRODUCT_COLUMNS: &str = "id, name, category, stock, min_stock, price_cents, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Dashboard listing
/// let products = repo.list_all().await?;
///
/// // Price lookup
/// let matches = repo.search_by_name("lapi").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, ordered for category grouping.
    ///
    /// ## Ordering
    /// `category, name` so the dashboard can fold the flat list into one
    /// section per category without re-sorting.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM productos ORDER BY category, name"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM productos WHERE id = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Searches products by name substring, case-insensitive.
    ///
    /// ## Behavior
    /// - `"lapi"` matches "Lapicera", "LAPIZ", ...
    /// - An empty query matches everything (the price lookup screen shows
    ///   the full catalogue when the field is left blank)
    ///
    /// ## Arguments
    /// * `query` - Search term (can be partial or empty)
    pub async fn search_by_name(&self, query: &str) -> DbResult<Vec<Product>> {
        let query = query.trim();

        debug!(query = %query, "Searching products by name");

        // LIKE is case-insensitive for ASCII in SQLite; the pattern
        // %% (empty query) matches every row.
        let pattern = format!("%{}%", query);

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM productos WHERE name LIKE ?1 ORDER BY category, name"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Inserts a new product and returns the stored row.
    ///
    /// Duplicate name+category pairs are allowed: each insert is a distinct
    /// stock line with its own id.
    pub async fn insert(&self, new: &NewProduct) -> DbResult<Product> {
        debug!(name = %new.name, category = %new.category, "Inserting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO productos (name, category, stock, min_stock, price_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&new.name)
        .bind(&new.category)
        .bind(new.stock)
        .bind(new.min_stock)
        .bind(new.price_cents)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        Ok(Product {
            id,
            name: new.name.clone(),
            category: new.category.clone(),
            stock: new.stock,
            min_stock: new.min_stock,
            price_cents: new.price_cents,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overwrites a product's editable fields (name, price, stock, min_stock).
    ///
    /// Category is not editable after creation.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: i64, update: &ProductUpdate) -> DbResult<()> {
        debug!(id = %id, "Updating product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE productos SET
                name = ?2,
                price_cents = ?3,
                stock = ?4,
                min_stock = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&update.name)
        .bind(update.price_cents)
        .bind(update.stock)
        .bind(update.min_stock)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Deletes a product row. Sale history is untouched (name snapshot).
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM productos WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Lists products at or below their reorder threshold.
    ///
    /// The boundary counts: `stock <= min_stock`.
    pub async fn low_stock(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM productos WHERE stock <= min_stock ORDER BY category, name"
        );

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(products)
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM productos")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn pen(stock: i64, min_stock: i64) -> NewProduct {
        NewProduct {
            name: "Lapicera".to_string(),
            category: "Libreria".to_string(),
            stock,
            min_stock,
            price_cents: 200,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let repo = db.products();

        let inserted = repo.insert(&pen(10, 5)).await.unwrap();
        assert!(inserted.id > 0);

        let fetched = repo.get_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Lapicera");
        assert_eq!(fetched.stock, 10);
        assert_eq!(fetched.min_stock, 5);
        assert_eq!(fetched.price_cents, 200);
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        assert!(db.products().get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_names_are_distinct_rows() {
        let db = test_db().await;
        let repo = db.products();

        let a = repo.insert(&pen(10, 5)).await.unwrap();
        let b = repo.insert(&pen(3, 5)).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_search_case_insensitive_and_empty() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&pen(10, 5)).await.unwrap();
        repo.insert(&NewProduct {
            name: "Cuaderno".to_string(),
            category: "Libreria".to_string(),
            stock: 4,
            min_stock: 2,
            price_cents: 1500,
        })
        .await
        .unwrap();

        let hits = repo.search_by_name("LAPI").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Lapicera");

        // Empty query lists everything
        let all = repo.search_by_name("").await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let db = test_db().await;
        let repo = db.products();

        let p = repo.insert(&pen(10, 5)).await.unwrap();

        repo.update(
            p.id,
            &ProductUpdate {
                name: "Lapicera Gel".to_string(),
                price_cents: 350,
                stock: 8,
                min_stock: 3,
            },
        )
        .await
        .unwrap();

        let updated = repo.get_by_id(p.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Lapicera Gel");
        assert_eq!(updated.price_cents, 350);
        assert_eq!(updated.stock, 8);
        assert_eq!(updated.min_stock, 3);
        // Category stays as created
        assert_eq!(updated.category, "Libreria");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = test_db().await;
        let err = db
            .products()
            .update(
                999,
                &ProductUpdate {
                    name: "x".to_string(),
                    price_cents: 1,
                    stock: 1,
                    min_stock: 1,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let repo = db.products();

        let p = repo.insert(&pen(10, 5)).await.unwrap();
        repo.delete(p.id).await.unwrap();

        assert!(repo.get_by_id(p.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(p.id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_low_stock_boundary() {
        let db = test_db().await;
        let repo = db.products();

        repo.insert(&pen(5, 5)).await.unwrap(); // at threshold → low
        repo.insert(&NewProduct {
            name: "Cuaderno".to_string(),
            category: "Libreria".to_string(),
            stock: 6,
            min_stock: 5,
            price_cents: 1500,
        })
        .await
        .unwrap(); // above threshold → fine

        let low = repo.low_stock().await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Lapicera");
    }
}
