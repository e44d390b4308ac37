//! # Domain Types
//!
//! Core domain types for the Depot product service.
//!
//! ## Type Overview
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                              │
//! │                                                                  │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────┐   │
//! │  │    Product      │  │    Category     │  │   NewProduct    │   │
//! │  │  ─────────────  │  │  ─────────────  │  │  ─────────────  │   │
//! │  │  id (i64)       │  │  id (i64)       │  │  name           │   │
//! │  │  name           │  │  name           │  │  price_cents    │   │
//! │  │  price_cents    │  └─────────────────┘  │  stock          │   │
//! │  │  stock          │                       │  created_at     │   │
//! │  │  created_at     │   (no id: the store   │                 │   │
//! │  │  category (opt) │    assigns one)       │                 │   │
//! │  └─────────────────┘                       └─────────────────┘   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are store-assigned integers. A `NewProduct` is the id-less
//! draft accepted by the insert path; it cannot carry an id by construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category.
///
/// Categories are read-only from the product service's perspective: the
/// repository joins against them but never writes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier (store-assigned).
    pub id: i64,

    /// Display name.
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (store-assigned, stable for the record's lifetime).
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Units currently on hand.
    pub stock: i64,

    /// When the record was created. Set once at insert, never mutated.
    pub created_at: DateTime<Utc>,

    /// Owning category. `None` except on reads that join categories in.
    #[serde(default)]
    pub category: Option<Category>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether any units are on hand.
    ///
    /// Derived from `stock`; never stored.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::Utc;
    /// use depot_core::Product;
    ///
    /// let product = Product {
    ///     id: 1,
    ///     name: "Widget".to_string(),
    ///     price_cents: 999,
    ///     stock: 0,
    ///     created_at: Utc::now(),
    ///     category: None,
    /// };
    /// assert!(!product.has_stock());
    /// ```
    #[inline]
    pub fn has_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// New Product (insert draft)
// =============================================================================

/// An id-less product draft, accepted by the insert path.
///
/// The store assigns the id; the draft carries everything else. `created_at`
/// is captured when the draft is built and bound explicitly at insert time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    /// Display name.
    pub name: String,

    /// Price in cents.
    pub price_cents: i64,

    /// Initial units on hand.
    pub stock: i64,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewProduct {
    /// Creates a draft stamped with the current time.
    ///
    /// ## Example
    /// ```rust
    /// use depot_core::NewProduct;
    ///
    /// let draft = NewProduct::new("Widget", 999, 10);
    /// assert_eq!(draft.name, "Widget");
    /// assert_eq!(draft.price_cents, 999);
    /// ```
    pub fn new(name: impl Into<String>, price_cents: i64, stock: i64) -> Self {
        NewProduct {
            name: name.into(),
            price_cents,
            stock,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
