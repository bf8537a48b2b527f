//! The sell route: the only endpoint that turns stock into revenue.

use axum::extract::State;
use axum::{Form, Json};
use serde::Deserialize;
use tracing::info;

use mostrador_core::validation::validate_quantity;
use mostrador_core::{Sale, SellOutcome};

use crate::auth::CurrentUser;
use crate::error::{ApiError, ErrorCode};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SellForm {
    /// Product id, integer string
    pub id: String,
    /// Units to sell, integer string
    #[serde(rename = "cantidad")]
    pub quantity: String,
}

/// POST /vender — atomic sale.
///
/// ## Outcomes
/// - 200 + the recorded sale (name snapshot, quantity, total)
/// - 409 when stock is short, naming how many units remain; nothing written
/// - 404 for an unknown product id
pub async fn sell(
    user: CurrentUser,
    State(state): State<AppState>,
    Form(form): Form<SellForm>,
) -> Result<Json<Sale>, ApiError> {
    let product_id = form
        .id
        .trim()
        .parse::<i64>()
        .map_err(|_| ApiError::validation("Valor inválido para id"))?;

    let quantity = form
        .quantity
        .trim()
        .parse::<i64>()
        .map_err(|_| ApiError::validation("Valor inválido para cantidad"))?;
    validate_quantity(quantity)?;

    match state.db.sales().sell(product_id, quantity).await? {
        SellOutcome::Completed(sale) => {
            info!(
                username = %user.username,
                product = %sale.product_name,
                quantity = %sale.quantity,
                total_cents = %sale.total_cents,
                "Sale recorded"
            );
            Ok(Json(sale))
        }
        SellOutcome::InsufficientStock {
            product_name,
            available,
            ..
        } => Err(ApiError::new(
            ErrorCode::InsufficientStock,
            format!(
                "No hay suficiente stock de {}. Quedan {} unidades",
                product_name, available
            ),
        )),
    }
}
