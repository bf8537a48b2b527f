//! Inventory routes: dashboard, add, edit, delete, price lookup.
//!
//! Numeric form fields arrive as strings (that is what HTML forms and the
//! mobile client send) and are parsed explicitly, so one malformed field
//! aborts only its own operation with a 400.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use mostrador_core::validation::{
    validate_min_stock, validate_price, validate_product_name, validate_stock,
};
use mostrador_core::{Money, NewProduct, Product, ProductUpdate, DEFAULT_MIN_STOCK};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

// =============================================================================
// Form Parsing Helpers
// =============================================================================

/// Parses an integer form field, naming the field in the 400 message.
fn parse_int(field: &str, value: &str) -> Result<i64, ApiError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| ApiError::validation(format!("Valor inválido para {}", field)))
}

/// Parses a decimal money field ("12.50") into cents.
fn parse_money(field: &str, value: &str) -> Result<Money, ApiError> {
    Money::parse(value.trim())
        .map_err(|_| ApiError::validation(format!("Valor inválido para {}", field)))
}

// =============================================================================
// Dashboard
// =============================================================================

/// Dashboard payload: the catalogue grouped by category, plus low-stock
/// alerts on the first render of each session.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// Products folded into one section per category, alphabetical.
    pub categorias: BTreeMap<String, Vec<Product>>,

    /// Low-stock alert lines; empty after the first render.
    pub alertas: Vec<String>,
}

/// GET / — the main screen.
///
/// Low-stock alerts fire at most once per session: the first authenticated
/// render includes them and flips the session flag; later renders return an
/// empty list until a fresh login.
pub async fn dashboard(
    user: CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let products = state.db.products().list_all().await?;

    let mut alertas = Vec::new();
    if state.sessions.take_low_stock_alert(&user.token) {
        for product in state.db.products().low_stock().await? {
            alertas.push(format!(
                "Stock bajo: {} (quedan {} unidades)",
                product.name, product.stock
            ));
        }
    }

    let mut categorias: BTreeMap<String, Vec<Product>> = BTreeMap::new();
    for product in products {
        categorias
            .entry(product.category.clone())
            .or_default()
            .push(product);
    }

    Ok(Json(DashboardResponse { categorias, alertas }))
}

// =============================================================================
// Add Product
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AddProductForm {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "categoria")]
    pub category: String,
    /// Initial stock, integer string
    pub stock: String,
    /// Unit price, decimal string ("12.50")
    #[serde(rename = "precio")]
    pub price: String,
    /// Reorder threshold; omitted on the short form
    #[serde(rename = "stock_minimo")]
    pub min_stock: Option<String>,
}

/// POST /agregar — create a product line.
///
/// Duplicate name+category pairs are accepted on purpose; each submit is a
/// distinct stock line.
pub async fn add_product(
    user: CurrentUser,
    State(state): State<AppState>,
    Form(form): Form<AddProductForm>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let name = form.name.trim();
    validate_product_name(name)?;

    let stock = parse_int("stock", &form.stock)?;
    validate_stock(stock)?;

    let price = parse_money("precio", &form.price)?;
    validate_price(price)?;

    let min_stock = match &form.min_stock {
        Some(raw) if !raw.trim().is_empty() => {
            let value = parse_int("stock_minimo", raw)?;
            validate_min_stock(value)?;
            value
        }
        _ => DEFAULT_MIN_STOCK,
    };

    let product = state
        .db
        .products()
        .insert(&NewProduct {
            name: name.to_string(),
            category: form.category.trim().to_string(),
            stock,
            min_stock,
            price_cents: price.cents(),
        })
        .await?;

    info!(
        username = %user.username,
        product = %product.name,
        id = %product.id,
        "Product added"
    );

    Ok((StatusCode::CREATED, Json(product)))
}

// =============================================================================
// Edit Product
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct EditProductForm {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio")]
    pub price: String,
    pub stock: String,
    #[serde(rename = "stock_minimo")]
    pub min_stock: String,
}

/// GET /editar/{id} — the product projection backing the edit form.
pub async fn edit_form(
    _user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id.to_string()))?;

    Ok(Json(product))
}

/// POST /editar/{id} — unconditional overwrite of the editable fields.
///
/// Category is fixed at creation and not part of the form.
pub async fn edit_product(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<EditProductForm>,
) -> Result<Json<Product>, ApiError> {
    let name = form.name.trim();
    validate_product_name(name)?;

    let stock = parse_int("stock", &form.stock)?;
    validate_stock(stock)?;

    let price = parse_money("precio", &form.price)?;
    validate_price(price)?;

    let min_stock = parse_int("stock_minimo", &form.min_stock)?;
    validate_min_stock(min_stock)?;

    state
        .db
        .products()
        .update(
            id,
            &ProductUpdate {
                name: name.to_string(),
                price_cents: price.cents(),
                stock,
                min_stock,
            },
        )
        .await?;

    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id.to_string()))?;

    info!(username = %user.username, id = %id, "Product edited");

    Ok(Json(product))
}

// =============================================================================
// Delete Product
// =============================================================================

/// GET /borrar/{id} — remove a product line, then back to the dashboard.
///
/// Sale history keeps its name snapshots; nothing else is touched.
pub async fn delete_product(
    user: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Redirect, ApiError> {
    state.db.products().delete(id).await?;

    info!(username = %user.username, id = %id, "Product deleted");

    Ok(Redirect::to("/"))
}

// =============================================================================
// Price Lookup
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(rename = "busqueda")]
    pub query: Option<String>,
}

/// GET /buscar_precio — the empty lookup screen (no results yet).
pub async fn price_lookup_page(_user: CurrentUser) -> Json<Vec<Product>> {
    Json(Vec::new())
}

/// POST /buscar_precio — case-insensitive substring search.
///
/// An empty query lists the whole catalogue.
pub async fn price_lookup(
    _user: CurrentUser,
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let query = form.query.unwrap_or_default();
    let products = state.db.products().search_by_name(&query).await?;
    Ok(Json(products))
}
