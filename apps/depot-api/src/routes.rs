//! Product endpoints.
//!
//! ## Route Map
//! ```text
//! GET    /health                liveness plus a store probe
//! GET    /products              all products, ordered by name
//! POST   /products              create, 201 with the new id
//! GET    /products/low-stock    low-stock report, ?minimum= overrides
//! GET    /products/{id}         one product or 404
//! PUT    /products/{id}         full replace, 204 or 404
//! DELETE /products/{id}         remove, 204 or 404
//! ```
//!
//! Handlers validate payloads before touching the store, so a rejected
//! request never acquires a connection.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;
use tower_http::trace::TraceLayer;

use depot_core::{validation, NewProduct, Product};

use crate::dto::{
    CreateProductRequest, IdResponse, LowStockParams, ProductResponse, UpdateProductRequest,
};
use crate::error::ApiError;
use crate::AppState;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(list_products).post(create_product))
        .route("/products/low-stock", get(low_stock))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - 200 while the store answers a probe
async fn health(State(state): State<Arc<AppState>>) -> (StatusCode, Json<serde_json::Value>) {
    if state.repo.provider().ping().await {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded" })),
        )
    }
}

/// GET /products - every product, ordered by name
async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.repo.get_all().await?;
    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// GET /products/low-stock - products at or below the threshold
async fn low_stock(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LowStockParams>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.repo.get_with_low_stock(params.minimum).await?;
    Ok(Json(
        products.into_iter().map(ProductResponse::from).collect(),
    ))
}

/// GET /products/{id} - one product or 404
async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .repo
        .get_by_id(id)
        .await?
        .ok_or(ApiError::NotFound { id })?;

    Ok(Json(ProductResponse::from(product)))
}

/// POST /products - create a product
async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<IdResponse>), ApiError> {
    validation::validate_product_name(&req.name)?;
    validation::validate_price_cents(req.price_cents)?;
    validation::validate_stock(req.stock)?;

    let draft = NewProduct::new(req.name, req.price_cents, req.stock);
    let id = state.repo.add(&draft).await?;

    Ok((StatusCode::CREATED, Json(IdResponse { id })))
}

/// PUT /products/{id} - replace name, price, and stock
async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<StatusCode, ApiError> {
    if req.id != id {
        return Err(ApiError::IdMismatch {
            path_id: id,
            body_id: req.id,
        });
    }

    validation::validate_product_name(&req.name)?;
    validation::validate_price_cents(req.price_cents)?;
    validation::validate_stock(req.stock)?;

    // created_at rides along for shape only; the update statement never
    // writes it.
    let product = Product {
        id,
        name: req.name,
        price_cents: req.price_cents,
        stock: req.stock,
        created_at: Utc::now(),
        category: None,
    };

    if state.repo.update(&product).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound { id })
    }
}

/// DELETE /products/{id} - remove a product
async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.repo.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound { id })
    }
}
