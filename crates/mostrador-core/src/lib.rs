//! # mostrador-core: Pure Business Logic for Mostrador
//!
//! This crate is the **heart** of Mostrador, a small retail inventory and
//! point-of-sale system. It contains all business logic as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Mostrador Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  HTTP Handlers (apps/server)                    │   │
//! │  │    /agregar, /vender, /historial, /api/productos, ...          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ mostrador-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  report   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  Daily    │  │   rules   │  │   │
//! │  │   │   Sale    │  │  parsing  │  │  Summary  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  mostrador-db (Database Layer)                  │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, ServiceCharge, User)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`report`] - Daily sales/services aggregation
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use mostrador_core::Money` instead of
// `use mostrador_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use report::DailySummary;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum-stock threshold applied when a product is created without one.
///
/// ## Why 5?
/// The add-product short form omits the threshold; 5 units is the house
/// default for reorder warnings.
pub const DEFAULT_MIN_STOCK: i64 = 5;

/// Maximum quantity accepted for a single sale.
///
/// ## Business Reason
/// Prevents accidental over-selling (e.g., typing 1000 instead of 10).
pub const MAX_SALE_QUANTITY: i64 = 999;
