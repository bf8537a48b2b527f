//! # Service Charge Repository
//!
//! Append-only operations for ad-hoc service revenue (`servicios` table).
//!
//! Services (photocopies, laminations, top-ups) earn money without touching
//! inventory, so this repository never reads or writes `productos`.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use mostrador_core::ServiceCharge;

/// Repository for service charge database operations.
#[derive(Debug, Clone)]
pub struct ServiceRepository {
    pool: SqlitePool,
}

impl ServiceRepository {
    /// Creates a new ServiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ServiceRepository { pool }
    }

    /// Records a service charge and returns the stored row.
    ///
    /// ## Arguments
    /// * `label` - Free-form service type ("fotocopias", "plastificado", ...)
    /// * `amount_cents` - Charged amount, already validated non-negative
    pub async fn insert(&self, label: &str, amount_cents: i64) -> DbResult<ServiceCharge> {
        let now = Utc::now();

        let result = sqlx::query(
            "INSERT INTO servicios (label, amount_cents, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(label)
        .bind(amount_cents)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        info!(id = %id, label = %label, amount_cents = %amount_cents, "Service charge recorded");

        Ok(ServiceCharge {
            id,
            label: label.to_string(),
            amount_cents,
            created_at: now,
        })
    }

    /// Lists the service charges recorded on a given calendar day.
    ///
    /// ## Arguments
    /// * `date` - Day in `YYYY-MM-DD` form
    pub async fn list_for_date(&self, date: &str) -> DbResult<Vec<ServiceCharge>> {
        let services = sqlx::query_as::<_, ServiceCharge>(
            "SELECT id, label, amount_cents, created_at
             FROM servicios WHERE date(created_at) = ?1 ORDER BY created_at",
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        debug!(date = %date, count = services.len(), "Listed service charges for date");
        Ok(services)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_insert_and_list_for_today() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.services();

        let charge = repo.insert("fotocopias", 150).await.unwrap();
        assert!(charge.id > 0);
        assert_eq!(charge.label, "fotocopias");
        assert_eq!(charge.amount_cents, 150);

        let today = Utc::now().format("%Y-%m-%d").to_string();
        let listed = repo.list_for_date(&today).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].label, "fotocopias");

        assert!(repo.list_for_date("1999-01-01").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_amount_is_allowed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let charge = db.services().insert("ajuste", 0).await.unwrap();
        assert_eq!(charge.amount_cents, 0);
    }
}
