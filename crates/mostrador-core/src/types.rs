//! # Domain Types
//!
//! Core domain types used throughout Mostrador.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │  ServiceCharge  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  id (i64)       │       │
//! │  │  name/category  │   │  product_name   │   │  label          │       │
//! │  │  stock          │   │  (snapshot!)    │   │  amount_cents   │       │
//! │  │  min_stock      │   │  quantity       │   │  created_at     │       │
//! │  │  price_cents    │   │  total_cents    │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │      User       │   │   SellOutcome   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  username       │   │  Completed      │                             │
//! │  │  password_hash  │   │  Insufficient-  │                             │
//! │  │  (argon2id)     │   │  Stock          │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A `Sale` records the product *name* as it was at sale time, not a foreign
//! key. Deleting a product never corrupts sale history; the audit trail wins
//! over referential integrity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// An inventory line: quantity on hand plus a reorder threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (SQLite rowid). The companion mobile client
    /// addresses products by this number, so it stays an integer.
    pub id: i64,

    /// Display name shown on the dashboard and snapshotted into sales.
    pub name: String,

    /// Free-form category used to group the dashboard into sections.
    pub category: String,

    /// Current stock level. Never negative (enforced by CHECK constraint
    /// and the ledger's guarded decrement).
    pub stock: i64,

    /// Reorder threshold; at or below it the product is flagged low-stock.
    pub min_stock: i64,

    /// Unit price in cents (smallest currency unit).
    pub price_cents: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated (edit or sale decrement).
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether this product should raise a low-stock alert.
    ///
    /// ## Rule
    /// `stock <= min_stock` — the boundary counts as low, so a product
    /// sitting exactly at its threshold is already flagged.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }

    /// Checks whether a sale of `quantity` units can be accepted.
    #[inline]
    pub fn can_sell(&self, quantity: i64) -> bool {
        quantity > 0 && self.stock >= quantity
    }
}

/// Fields for creating a product (AddProduct operation).
///
/// Duplicate name+category pairs are allowed on purpose: two rows with the
/// same name are treated as distinct stock lines.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub stock: i64,
    pub min_stock: i64,
    pub price_cents: i64,
}

/// Fields for editing a product (EditProduct operation).
///
/// The edit is an unconditional overwrite of these four fields; category is
/// fixed at creation and not part of the edit form.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub name: String,
    pub price_cents: i64,
    pub stock: i64,
    pub min_stock: i64,
}

// =============================================================================
// Sale
// =============================================================================

/// An immutable record of a completed stock-reducing transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,

    /// Product name at time of sale (frozen; no foreign key by design).
    pub product_name: String,

    /// Units sold, always > 0.
    pub quantity: i64,

    /// quantity × unit price at sale time, in cents.
    pub total_cents: i64,

    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Returns the sale total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Sell Outcome
// =============================================================================

/// The result of asking the inventory ledger to sell.
///
/// ## Decision Rule
/// ```text
/// stock >= quantity  →  Completed(sale)        (decrement + sale row, atomic)
/// stock <  quantity  →  InsufficientStock      (no mutation at all)
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SellOutcome {
    /// Sale accepted: stock was decremented and a sale row appended.
    Completed(Sale),

    /// Sale rejected: requested more than is on hand. Nothing was written.
    InsufficientStock {
        product_name: String,
        available: i64,
        requested: i64,
    },
}

impl SellOutcome {
    /// True when the sale went through.
    pub fn is_completed(&self) -> bool {
        matches!(self, SellOutcome::Completed(_))
    }
}

// =============================================================================
// Service Charge
// =============================================================================

/// An immutable record of revenue not tied to inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ServiceCharge {
    pub id: i64,

    /// Free-form type label ("photocopies", "lamination", ...).
    pub label: String,

    /// Charged amount in cents, never negative.
    pub amount_cents: i64,

    pub created_at: DateTime<Utc>,
}

impl ServiceCharge {
    /// Returns the charged amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// User
// =============================================================================

/// A login credential row.
///
/// ## Security Note
/// `password_hash` is an argon2id PHC string; plaintext never reaches
/// storage.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i64, min_stock: i64) -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            name: "Pen".to_string(),
            category: "Stationery".to_string(),
            stock,
            min_stock,
            price_cents: 200,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_low_stock_boundary() {
        // At the threshold counts as low
        assert!(product(5, 5).is_low_stock());
        assert!(product(3, 5).is_low_stock());
        assert!(product(0, 5).is_low_stock());
        assert!(!product(6, 5).is_low_stock());
    }

    #[test]
    fn test_can_sell() {
        let p = product(10, 5);
        assert!(p.can_sell(1));
        assert!(p.can_sell(10));
        assert!(!p.can_sell(11));
        assert!(!p.can_sell(0));
        assert!(!p.can_sell(-3));
    }

    #[test]
    fn test_sell_outcome_flags() {
        let rejected = SellOutcome::InsufficientStock {
            product_name: "Pen".to_string(),
            available: 7,
            requested: 20,
        };
        assert!(!rejected.is_completed());
    }

    #[test]
    fn test_sale_total() {
        let sale = Sale {
            id: 1,
            product_name: "Pen".to_string(),
            quantity: 3,
            total_cents: 600,
            created_at: Utc::now(),
        };
        assert_eq!(sale.total(), Money::from_cents(600));
    }
}
