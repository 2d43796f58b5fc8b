//! # Domain Types
//!
//! Core types for the product catalog.
//!
//! ## Dual-Key Identity Pattern
//! Every product has:
//! - `id`: i64, system-assigned by the database - immutable, used for lookups
//! - `sku`: business identifier - human-readable, unique, mutable

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::price::Price;

// =============================================================================
// Product
// =============================================================================

/// A catalog product as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier, assigned by the database.
    pub id: i64,

    /// Stock Keeping Unit - unique business identifier.
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Optional free-form description.
    pub description: Option<String>,

    /// Price in exact fixed-point cents.
    pub price: Price,

    /// Whether the product is currently in stock.
    pub in_stock: bool,

    /// When the product was created. Set once by the storage layer,
    /// never updated.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Creation Input
// =============================================================================

/// Payload for creating a product.
///
/// `id` and `created_at` are never accepted from the caller; they are
/// assigned by the system.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Price,
    /// Defaults to `true` when absent.
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

// =============================================================================
// Partial Update Input
// =============================================================================

/// Payload for partially updating a product.
///
/// ## Absent vs. Null
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  PATCH {"price": "9.99"}            → only price changes                │
/// │  PATCH {"description": null}        → description cleared               │
/// │  PATCH {}                           → nothing changes                   │
/// │                                                                         │
/// │  A plain Option<T> cannot tell "absent" from "null", so the nullable    │
/// │  description field uses Option<Option<String>>:                         │
/// │    None             field absent, leave untouched                       │
/// │    Some(None)       explicit null, clear the value                      │
/// │    Some(Some(v))    set to v                                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub sku: Option<String>,
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub price: Option<Price>,
    pub in_stock: Option<bool>,
}

/// Deserializes a present-but-possibly-null field into `Some(inner)`.
/// Combined with `#[serde(default)]`, an absent field stays `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer).map(Some)
}

impl ProductPatch {
    /// Returns true when no field was supplied.
    pub fn is_empty(&self) -> bool {
        self.sku.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.in_stock.is_none()
    }

    /// Applies only the supplied fields to `product`.
    ///
    /// `id` and `created_at` are never touched.
    pub fn apply(&self, product: &mut Product) {
        if let Some(sku) = &self.sku {
            product.sku = sku.clone();
        }
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
