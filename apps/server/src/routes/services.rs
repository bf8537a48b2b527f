//! Service charge route: revenue with no inventory behind it.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Form, Json};
use serde::Deserialize;
use tracing::info;

use mostrador_core::validation::{validate_service_amount, validate_service_label};
use mostrador_core::{Money, ServiceCharge};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ServiceForm {
    /// Service type label ("fotocopias", "plastificado", ...)
    #[serde(rename = "tipo")]
    pub label: String,
    /// Charged amount, decimal string ("150.00")
    #[serde(rename = "monto")]
    pub amount: String,
}

/// POST /registrar_servicio — append a service charge.
///
/// Services count toward the daily grand total alongside sales but never
/// touch product stock.
pub async fn register_service(
    user: CurrentUser,
    State(state): State<AppState>,
    Form(form): Form<ServiceForm>,
) -> Result<(StatusCode, Json<ServiceCharge>), ApiError> {
    let label = form.label.trim();
    validate_service_label(label)?;

    let amount = Money::parse(form.amount.trim())
        .map_err(|_| ApiError::validation("Valor inválido para monto"))?;
    validate_service_amount(amount)?;

    let charge = state.db.services().insert(label, amount.cents()).await?;

    info!(
        username = %user.username,
        label = %charge.label,
        amount_cents = %charge.amount_cents,
        "Service charge recorded"
    );

    Ok((StatusCode::CREATED, Json(charge)))
}
