//! Daily history: sales + services + totals for one calendar day.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use mostrador_core::DailySummary;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Day to summarize, `YYYY-MM-DD`. Defaults to today.
    pub fecha: Option<String>,
}

/// GET /historial?fecha=YYYY-MM-DD — the daily summary.
///
/// A day with no activity returns empty lists and all-zero totals, never an
/// error. `grand_total` always equals `total_sales + total_services`.
pub async fn history(
    _user: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<DailySummary>, ApiError> {
    let date = resolve_date(query.fecha.as_deref())?;

    let summary = summarize(&state, date).await?;
    Ok(Json(summary))
}

/// Parses the `fecha` parameter, defaulting to today (UTC).
pub(crate) fn resolve_date(fecha: Option<&str>) -> Result<NaiveDate, ApiError> {
    match fecha {
        Some(raw) if !raw.trim().is_empty() => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| ApiError::validation("Valor inválido para fecha")),
        _ => Ok(Utc::now().date_naive()),
    }
}

/// Fetches both ledgers for `date` and folds them into a summary.
pub(crate) async fn summarize(state: &AppState, date: NaiveDate) -> Result<DailySummary, ApiError> {
    let day = date.format("%Y-%m-%d").to_string();

    let sales = state.db.sales().list_for_date(&day).await?;
    let services = state.db.services().list_for_date(&day).await?;

    Ok(DailySummary::build(date, sales, services))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_date() {
        let date = resolve_date(Some("2024-03-09")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());

        // Empty and missing both mean "today"
        assert_eq!(resolve_date(None).unwrap(), Utc::now().date_naive());
        assert_eq!(resolve_date(Some("")).unwrap(), Utc::now().date_naive());

        // Garbage is a 400, not a panic or a silent "today"
        assert!(resolve_date(Some("ayer")).is_err());
        assert!(resolve_date(Some("09/03/2024")).is_err());
    }
}
