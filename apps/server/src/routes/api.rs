//! Read-only JSON API for the companion mobile client.
//!
//! These two endpoints are unauthenticated by explicit policy: the mobile
//! client has no session mechanism, and both are pure read projections.

use axum::extract::{Query, State};
use axum::Json;

use mostrador_core::{Product, Sale};

use crate::error::ApiError;
use crate::routes::reports::{resolve_date, HistoryQuery};
use crate::AppState;

/// GET /api/productos — the full catalogue as a JSON array.
pub async fn products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.db.products().list_all().await?;
    Ok(Json(products))
}

/// GET /api/historial — sales for one day (default: today) as a JSON array.
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Sale>>, ApiError> {
    let date = resolve_date(query.fecha.as_deref())?;
    let day = date.format("%Y-%m-%d").to_string();

    let sales = state.db.sales().list_for_date(&day).await?;
    Ok(Json(sales))
}
