//! # HTTP Routes
//!
//! Route table and middleware stack.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Route Table                                   │
//! │                                                                         │
//! │  Public                       Session-gated                            │
//! │  ──────                       ─────────────                            │
//! │  GET/POST /login              GET  /            dashboard + alerts     │
//! │  GET/POST /registro           POST /agregar     add product            │
//! │  GET  /api/productos          POST /vender      atomic sale            │
//! │  GET  /api/historial          POST /registrar_servicio                 │
//! │                               GET/POST /editar/{id}                    │
//! │                               GET  /borrar/{id}                        │
//! │                               GET/POST /buscar_precio                  │
//! │                               GET  /historial   daily summary          │
//! │                               GET  /logout                             │
//! │                                                                         │
//! │  Layers (outermost last): TraceLayer → TimeoutLayer → CorsLayer        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Route paths and form field names stay Spanish: that is the wire surface
//! the companion mobile client speaks.

use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub mod api;
pub mod auth;
pub mod inventory;
pub mod reports;
pub mod sales;
pub mod services;

/// Builds the application router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    // The mobile client is served from a different origin
    let cors = CorsLayer::new().allow_methods(Any).allow_origin(Any);

    // new() is deprecated upstream; kept for the plain 408 it produces
    #[allow(deprecated)]
    let timeout = TimeoutLayer::new(Duration::from_secs(state.config.request_timeout_secs));

    Router::new()
        // Account routes (public)
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/registro", get(auth::register_page).post(auth::register))
        .route("/logout", get(auth::logout))
        // Inventory (session-gated via CurrentUser)
        .route("/", get(inventory::dashboard))
        .route("/agregar", post(inventory::add_product))
        .route(
            "/editar/{id}",
            get(inventory::edit_form).post(inventory::edit_product),
        )
        .route("/borrar/{id}", get(inventory::delete_product))
        .route(
            "/buscar_precio",
            get(inventory::price_lookup_page).post(inventory::price_lookup),
        )
        // Sales and services
        .route("/vender", post(sales::sell))
        .route("/registrar_servicio", post(services::register_service))
        .route("/historial", get(reports::history))
        // Read-only API for the mobile client (public by policy)
        .route("/api/productos", get(api::products))
        .route("/api/historial", get(api::history))
        .layer(TraceLayer::new_for_http())
        .layer(timeout)
        .layer(cors)
        .with_state(state)
}
