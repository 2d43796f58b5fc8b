//! # stockroom-core: Pure Domain Logic for the Stockroom Catalog
//!
//! This crate is the heart of the catalog service. It contains the domain
//! types and rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Stockroom Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    POST /products, GET /products, PATCH /products/{id}, ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   price   │  │   query   │  │ validation│  │   │
//! │  │   │  Product  │  │   Price   │  │ SortField │  │   rules   │  │   │
//! │  │   │   Patch   │  │  (cents)  │  │ SortSpec  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-db (Database Layer)                   │   │
//! │  │              SQLite queries, migrations, repository             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, NewProduct, ProductPatch)
//! - [`price`] - Price type with integer-cents arithmetic (no floating point!)
//! - [`query`] - List query: search, filtering, sorting, pagination
//! - [`validation`] - Field validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no side effects
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: prices are cents (i64) to avoid float drift
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod price;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use price::Price;
pub use query::{ProductQuery, SortDirection, SortField, SortSpec};
pub use types::{NewProduct, Product, ProductPatch};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum SKU length in characters.
pub const SKU_MIN_LEN: usize = 2;

/// Maximum SKU length in characters.
pub const SKU_MAX_LEN: usize = 64;

/// Minimum product name length in characters.
pub const NAME_MIN_LEN: usize = 2;

/// Maximum product name length in characters.
pub const NAME_MAX_LEN: usize = 200;

/// Default page size for product listings.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Maximum page size for product listings.
///
/// Prevents unbounded result sets from a single request.
pub const MAX_PAGE_LIMIT: i64 = 100;
