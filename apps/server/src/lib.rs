//! # Mostrador HTTP Server
//!
//! The I/O surface of Mostrador: an axum server exposing the inventory,
//! sales, service and account operations over HTTP.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        mostrador-server                                 │
//! │                                                                         │
//! │  Browser / mobile client                                               │
//! │       │ urlencoded forms in, JSON out                                  │
//! │       ▼                                                                 │
//! │  Router (routes/) ── TraceLayer · TimeoutLayer · CorsLayer             │
//! │       │                                                                 │
//! │       ├── CurrentUser extractor (auth.rs) ──► SessionStore             │
//! │       │         no session? 303 → /login        (session.rs)          │
//! │       ▼                                                                 │
//! │  AppState { Database, SessionStore, ServerConfig }                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  mostrador-db repositories ──► SQLite                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Environment configuration
//! - [`error`] - API error envelope (`ApiError` + `ErrorCode`)
//! - [`session`] - In-memory session store
//! - [`auth`] - `CurrentUser` extractor + password hashing
//! - [`routes`] - HTTP handlers

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod session;

use mostrador_db::Database;

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Shared application state, cloned into every handler.
///
/// All three fields are cheap to clone: the database wraps an Arc-backed
/// pool, the session store wraps an Arc'd map, and the config is small.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub sessions: SessionStore,
    pub config: ServerConfig,
}

impl AppState {
    pub fn new(db: Database, config: ServerConfig) -> Self {
        AppState {
            db,
            sessions: SessionStore::new(),
            config,
        }
    }
}
