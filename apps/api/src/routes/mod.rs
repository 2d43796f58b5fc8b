//! # HTTP Routes
//!
//! Binds the catalog operations to paths, methods, and status codes.

pub mod products;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info_span;
use uuid::Uuid;

use crate::AppState;

/// Builds the application router.
///
/// | Method | Path            | Success | Failure            |
/// |--------|-----------------|---------|--------------------|
/// | POST   | /products       | 201     | 409, 422           |
/// | GET    | /products       | 200     | 422                |
/// | GET    | /products/{id}  | 200     | 404                |
/// | PATCH  | /products/{id}  | 200     | 404, 409, 422      |
/// | DELETE | /products/{id}  | 204     | 404                |
/// | GET    | /health         | 200     | 500                |
pub fn router(state: AppState) -> Router {
    // Every request gets its own span with a fresh request id, so log
    // lines from concurrent requests can be told apart.
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        info_span!(
            "http_request",
            method = %request.method(),
            path = %request.uri().path(),
            request_id = %Uuid::new_v4(),
        )
    });

    Router::new()
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .patch(products::update_product)
                .delete(products::delete_product),
        )
        .route("/health", get(health))
        .layer(trace)
        .with_state(state)
}

/// Liveness probe: verifies a query can reach the database.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    if state.db.health_check().await {
        (StatusCode::OK, Json(json!({"status": "ok"})))
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"status": "unavailable"})),
        )
    }
}
