//! # Product Handlers
//!
//! The five catalog operations: create, list, get-one, partial update,
//! delete. Each handler is a thin orchestration of
//! validation → uniqueness check → persistence call → response shaping;
//! everything interesting lives in stockroom-core and stockroom-db.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use stockroom_core::{NewProduct, Product, ProductPatch, ProductQuery, SortSpec};
use stockroom_core::validation::validate_page;
use stockroom_core::DEFAULT_PAGE_LIMIT;

use crate::error::ApiError;
use crate::AppState;

// =============================================================================
// Create
// =============================================================================

/// `POST /products` - creates a product.
///
/// 201 with the stored record; 409 when the SKU exists; 422 when the
/// payload is malformed or out of range.
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::validation(e.body_text()))?;
    input.validate()?;

    debug!(sku = %input.sku, "create_product");
    let product = state.db.products().create(&input).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

// =============================================================================
// List
// =============================================================================

/// Raw listing query parameters as they arrive on the wire.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Search by name or SKU.
    pub q: Option<String>,
    pub in_stock: Option<bool>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    /// Format: `field:asc|desc`.
    pub sort: Option<String>,
}

impl ListParams {
    /// Applies defaults and range checks, producing the resolved query.
    fn into_query(self) -> Result<ProductQuery, ApiError> {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        validate_page(skip, limit)?;

        let sort = match self.sort.as_deref() {
            Some(spec) => SortSpec::parse(spec),
            None => SortSpec::default(),
        };

        Ok(ProductQuery {
            q: self.q,
            in_stock: self.in_stock,
            skip,
            limit,
            sort,
        })
    }
}

/// `GET /products` - lists products with optional search, stock filter,
/// pagination, and sorting.
///
/// 200 with an array (possibly empty); 422 when query params are
/// malformed or out of range.
pub async fn list_products(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::validation(e.body_text()))?;
    let query = params.into_query()?;

    let products = state.db.products().list(&query).await?;
    Ok(Json(products))
}

// =============================================================================
// Get One
// =============================================================================

/// `GET /products/{id}` - fetches a single product.
///
/// 200 with the record; 404 when absent.
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .db
        .products()
        .get(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    Ok(Json(product))
}

// =============================================================================
// Partial Update
// =============================================================================

/// `PATCH /products/{id}` - applies only the supplied fields.
///
/// 200 with the updated record; 404 when absent; 409 when the new SKU
/// belongs to another product; 422 when a supplied field is invalid.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ProductPatch>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Json(patch) = payload.map_err(|e| ApiError::validation(e.body_text()))?;
    patch.validate()?;

    debug!(id, "update_product");
    let product = state.db.products().update(id, &patch).await?;

    Ok(Json(product))
}

// =============================================================================
// Delete
// =============================================================================

/// `DELETE /products/{id}` - permanently removes a product.
///
/// 204 with an empty body; 404 when absent.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    debug!(id, "delete_product");
    state.db.products().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
