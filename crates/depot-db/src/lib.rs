//! # depot-db: Data-Access Layer for Depot
//!
//! This crate provides store access for the Depot product service. It uses
//! SQLite through sqlx's async runtime API.
//!
//! ## Architecture Position
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                         Depot Data Flow                              │
//! │                                                                      │
//! │  HTTP handler (GET /products/{id})                                   │
//! │       │                                                              │
//! │       ▼                                                              │
//! │  ┌────────────────────────────────────────────────────────────────┐  │
//! │  │                     depot-db (THIS CRATE)                      │  │
//! │  │                                                                │  │
//! │  │   ┌────────────┐   ┌────────────┐   ┌────────────────────┐    │  │
//! │  │   │  catalog   │   │   mapper   │   │ ConnectionProvider │    │  │
//! │  │   │ fixed SQL  │   │ row→domain │   │   (provider.rs)    │    │  │
//! │  │   └──────┬─────┘   └──────┬─────┘   └─────────┬──────────┘    │  │
//! │  │          │                │                   │               │  │
//! │  │          └────────────┬───┴───────────────────┘               │  │
//! │  │                       ▼                                       │  │
//! │  │              ProductRepository                                │  │
//! │  │     one method per operation, scoped connection per call      │  │
//! │  └────────────────────────────────┬───────────────────────────────┘ │
//! │                                   │                                  │
//! │                                   ▼                                  │
//! │                           SQLite database                            │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`provider`] - Connection provider (pool creation, scoped acquisition)
//! - [`catalog`] - The fixed statement set, one entry per operation
//! - [`mapper`] - Declared column mapping, single rows and joined rows
//! - [`repository`] - The product repository
//! - [`schema`] - Idempotent schema bootstrap
//! - [`error`] - Startup and per-operation error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use depot_db::{ConnectionProvider, ProductRepository};
//!
//! let provider = ConnectionProvider::new("sqlite://depot.db?mode=rwc")?;
//! depot_db::ensure_schema(&provider).await?;
//!
//! let repo = ProductRepository::new(provider)?;
//! let products = repo.get_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod mapper;
pub mod provider;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use catalog::{Operation, Statement};
pub use error::{ConfigError, DbResult, RepositoryError};
pub use provider::ConnectionProvider;
pub use repository::ProductRepository;
pub use schema::ensure_schema;
