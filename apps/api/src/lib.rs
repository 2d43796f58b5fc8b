//! # Stockroom API
//!
//! HTTP server for the product catalog.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Request Flow                                      │
//! │                                                                         │
//! │  HTTP request                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  axum router (routes module)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Deserialization + field validation (stockroom-core)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ProductRepository (stockroom-db, one transaction per request)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError / Json response with status code                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;

use stockroom_db::Database;

/// Shared application state.
///
/// Cheap to clone: the database handle wraps a reference-counted pool.
/// No other mutable state is shared between requests.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}
