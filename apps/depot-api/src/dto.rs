//! Wire payloads for the product endpoints.
//!
//! Responses are camelCase, matching what browser clients expect. Money
//! travels twice: raw cents for arithmetic and a formatted string for
//! display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use depot_core::{Category, Product};

/// A product as served over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Record identifier.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Unit price formatted for display, e.g. `$12.50`.
    pub price: String,

    /// Units on hand.
    pub stock: i64,

    /// Whether any units are on hand.
    pub has_stock: bool,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Category, when the query attached one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        ProductResponse {
            id: p.id,
            price: p.price().to_string(),
            has_stock: p.has_stock(),
            name: p.name,
            price_cents: p.price_cents,
            stock: p.stock,
            created_at: p.created_at,
            category: p.category.map(CategoryResponse::from),
        }
    }
}

/// A category as served over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    /// Record identifier.
    pub id: i64,

    /// Display name.
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        CategoryResponse {
            id: c.id,
            name: c.name,
        }
    }
}

/// Payload for creating a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub price_cents: i64,

    /// Units on hand; new products default to none.
    #[serde(default)]
    pub stock: i64,
}

/// Payload for replacing a product. The id must match the path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    pub stock: i64,
}

/// Query parameters for the low-stock report.
#[derive(Debug, Deserialize)]
pub struct LowStockParams {
    pub minimum: Option<i64>,
}

/// Response for a successful insert.
#[derive(Debug, Serialize, Deserialize)]
pub struct IdResponse {
    pub id: i64,
}
