//! # depot-core: Pure Domain Model for Depot
//!
//! This crate contains the domain types and input validation for the Depot
//! product service. It has zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                        Depot Architecture                          │
//! │                                                                    │
//! │  ┌──────────────────────────────────────────────────────────────┐  │
//! │  │                  apps/depot-api (HTTP)                       │  │
//! │  │     GET /products ── POST /products ── /low-stock            │  │
//! │  └─────────────────────────────┬────────────────────────────────┘  │
//! │                                │                                   │
//! │  ┌─────────────────────────────▼────────────────────────────────┐  │
//! │  │                  depot-db (Data Access)                      │  │
//! │  │     catalog ── mapper ── provider ── repository              │  │
//! │  └─────────────────────────────┬────────────────────────────────┘  │
//! │                                │                                   │
//! │  ┌─────────────────────────────▼────────────────────────────────┐  │
//! │  │              ★ depot-core (THIS CRATE) ★                     │  │
//! │  │                                                              │  │
//! │  │   ┌───────────┐   ┌───────────┐   ┌───────────┐              │  │
//! │  │   │   types   │   │   money   │   │ validation│              │  │
//! │  │   │  Product  │   │   Money   │   │   rules   │              │  │
//! │  │   │  Category │   │  (cents)  │   │  checks   │              │  │
//! │  │   └───────────┘   └───────────┘   └───────────┘              │  │
//! │  │                                                              │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                          │  │
//! │  └──────────────────────────────────────────────────────────────┘  │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, NewProduct)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error type
//! - [`validation`] - Input validation rules

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use depot_core::Money` instead of
// `use depot_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::{Category, NewProduct, Product};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Stock threshold below which (inclusive) a product counts as low on stock.
///
/// The low-stock report takes an optional caller threshold; this value is the
/// single canonical default applied when the caller passes none, at every
/// layer that exposes the report.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Maximum length of a product name, in characters.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;
