//! # Repository Layer
//!
//! Typed database access, one repository per table family.
//!
//! ## Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP Handler                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::products() ──► ProductRepository (inventory CRUD)           │
//! │  Database::sales()    ──► SaleRepository    (sell + history)           │
//! │  Database::services() ──► ServiceRepository (service charges)          │
//! │  Database::users()    ──► UserRepository    (accounts)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sqlx runtime queries against SqlitePool                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories hold a pool clone only; construction is free and handlers
//! create them per request.

pub mod product;
pub mod sale;
pub mod service;
pub mod user;

pub use product::ProductRepository;
pub use sale::SaleRepository;
pub use service::ServiceRepository;
pub use user::UserRepository;
