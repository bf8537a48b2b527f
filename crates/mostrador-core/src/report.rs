//! # Daily Reporting
//!
//! Pure aggregation of a day's sales and service charges into a summary.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Daily Summary Flow                                  │
//! │                                                                         │
//! │  GET /historial?fecha=2026-08-29                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SaleRepository::list_for_date ──────┐                                 │
//! │  ServiceRepository::list_for_date ───┤  (fetch, no math)               │
//! │       │                              │                                  │
//! │       ▼                              ▼                                  │
//! │  DailySummary::build(date, sales, services)  ← THIS MODULE (pure)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  { total_sales, total_services, grand_total } as JSON                  │
//! │                                                                         │
//! │  Invariant: grand_total == total_sales + total_services, always,       │
//! │  including days with zero rows (all totals 0).                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use serde::Serialize;

use crate::money::Money;
use crate::types::{Sale, ServiceCharge};

// =============================================================================
// Daily Summary
// =============================================================================

/// A day's sales and services with their totals. Pure read, no mutation.
#[derive(Debug, Clone, Serialize)]
pub struct DailySummary {
    /// The calendar date being summarized.
    pub date: NaiveDate,

    /// All sales whose timestamp falls on `date`.
    pub sales: Vec<Sale>,

    /// All service charges whose timestamp falls on `date`.
    pub services: Vec<ServiceCharge>,

    /// Σ sale.total for the day, in cents.
    pub total_sales: Money,

    /// Σ service.amount for the day, in cents.
    pub total_services: Money,

    /// total_sales + total_services.
    pub grand_total: Money,
}

impl DailySummary {
    /// Builds a summary from already-fetched rows.
    ///
    /// The repositories are responsible for the date filtering; this
    /// function only does the arithmetic, so it is trivially testable.
    pub fn build(date: NaiveDate, sales: Vec<Sale>, services: Vec<ServiceCharge>) -> Self {
        let total_sales: Money = sales.iter().map(Sale::total).sum();
        let total_services: Money = services.iter().map(ServiceCharge::amount).sum();
        let grand_total = total_sales + total_services;

        DailySummary {
            date,
            sales,
            services,
            total_sales,
            total_services,
            grand_total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sale(total_cents: i64) -> Sale {
        Sale {
            id: 0,
            product_name: "Pen".to_string(),
            quantity: 1,
            total_cents,
            created_at: Utc::now(),
        }
    }

    fn service(amount_cents: i64) -> ServiceCharge {
        ServiceCharge {
            id: 0,
            label: "photocopies".to_string(),
            amount_cents,
            created_at: Utc::now(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    #[test]
    fn test_empty_day_is_all_zeros() {
        let summary = DailySummary::build(date(), vec![], vec![]);

        assert!(summary.total_sales.is_zero());
        assert!(summary.total_services.is_zero());
        assert!(summary.grand_total.is_zero());
    }

    #[test]
    fn test_grand_total_is_sum_of_parts() {
        let summary = DailySummary::build(
            date(),
            vec![sale(600), sale(250)],
            vec![service(100), service(75)],
        );

        assert_eq!(summary.total_sales.cents(), 850);
        assert_eq!(summary.total_services.cents(), 175);
        assert_eq!(summary.grand_total.cents(), 1025);
        assert_eq!(
            summary.grand_total,
            summary.total_sales + summary.total_services
        );
    }

    #[test]
    fn test_sales_only_day() {
        let summary = DailySummary::build(date(), vec![sale(600)], vec![]);

        assert_eq!(summary.total_sales.cents(), 600);
        assert!(summary.total_services.is_zero());
        assert_eq!(summary.grand_total.cents(), 600);
    }
}
