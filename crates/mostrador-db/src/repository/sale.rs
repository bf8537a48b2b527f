//! # Sale Repository
//!
//! The inventory ledger: the only write path that turns stock into sales.
//!
//! ## The Sell Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Atomic Sell (single transaction)                     │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  SELECT product ──► missing? ──► ROLLBACK, NotFound                    │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  stock < qty? ──► ROLLBACK, InsufficientStock (nothing written)        │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  UPDATE productos SET stock = stock - qty                              │
//! │         WHERE id = ? AND stock >= qty   ← guarded decrement            │
//! │    │                                                                    │
//! │    ├── 0 rows? a concurrent seller won the race; re-read and reject    │
//! │    ▼                                                                    │
//! │  INSERT INTO ventas (name snapshot, qty, qty × price)                  │
//! │    │                                                                    │
//! │    ▼                                                                    │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Either both writes land or neither does. Stock can never go           │
//! │  negative: the WHERE guard is the compare-and-swap.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use mostrador_core::{Product, Sale, SellOutcome};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Sells `quantity` units of a product, atomically.
    ///
    /// ## Behavior
    /// - Decrements stock and appends a sale row in one transaction
    /// - The sale snapshots the product name and today's unit price
    /// - Insufficient stock rejects the whole request (no partial sale)
    ///
    /// ## Arguments
    /// * `product_id` - Product to sell
    /// * `quantity` - Units requested, must be > 0 (validated by caller)
    ///
    /// ## Returns
    /// * `Ok(SellOutcome::Completed(sale))` - Sale recorded
    /// * `Ok(SellOutcome::InsufficientStock { .. })` - Rejected, nothing written
    /// * `Err(DbError::NotFound)` - No such product
    pub async fn sell(&self, product_id: i64, quantity: i64) -> DbResult<SellOutcome> {
        debug!(product_id = %product_id, quantity = %quantity, "Starting sell transaction");

        let mut tx = self.pool.begin().await?;

        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, category, stock, min_stock, price_cents, created_at, updated_at
             FROM productos WHERE id = ?1",
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Product", product_id))?;

        if product.stock < quantity {
            debug!(
                product = %product.name,
                available = %product.stock,
                requested = %quantity,
                "Sale rejected: insufficient stock"
            );
            return Ok(SellOutcome::InsufficientStock {
                product_name: product.name,
                available: product.stock,
                requested: quantity,
            });
        }

        let now = Utc::now();

        // Guarded decrement: the stock >= qty clause re-checks under the
        // write lock, so a concurrent seller can never push stock negative.
        let updated = sqlx::query(
            "UPDATE productos SET stock = stock - ?2, updated_at = ?3
             WHERE id = ?1 AND stock >= ?2",
        )
        .bind(product_id)
        .bind(quantity)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // A concurrent sale drained the stock between our read and the
            // guarded update. Re-read and reject with the fresh count.
            warn!(product_id = %product_id, "Lost sell race, re-reading stock");

            let available: i64 =
                sqlx::query_scalar("SELECT stock FROM productos WHERE id = ?1")
                    .bind(product_id)
                    .fetch_optional(&mut *tx)
                    .await?
                    .ok_or_else(|| DbError::not_found("Product", product_id))?;

            return Ok(SellOutcome::InsufficientStock {
                product_name: product.name,
                available,
                requested: quantity,
            });
        }

        let total_cents = product.price_cents * quantity;

        let inserted = sqlx::query(
            "INSERT INTO ventas (product_name, quantity, total_cents, created_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&product.name)
        .bind(quantity)
        .bind(total_cents)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let sale_id = inserted.last_insert_rowid();

        tx.commit().await?;

        info!(
            sale_id = %sale_id,
            product = %product.name,
            quantity = %quantity,
            total_cents = %total_cents,
            "Sale completed"
        );

        Ok(SellOutcome::Completed(Sale {
            id: sale_id,
            product_name: product.name,
            quantity,
            total_cents,
            created_at: now,
        }))
    }

    /// Lists the sales recorded on a given calendar day.
    ///
    /// ## Arguments
    /// * `date` - Day in `YYYY-MM-DD` form
    pub async fn list_for_date(&self, date: &str) -> DbResult<Vec<Sale>> {
        let sales = sqlx::query_as::<_, Sale>(
            "SELECT id, product_name, quantity, total_cents, created_at
             FROM ventas WHERE date(created_at) = ?1 ORDER BY created_at",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        debug!(date = %date, count = sales.len(), "Listed sales for date");
        Ok(sales)
    }

    /// Counts total sales (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM ventas")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
