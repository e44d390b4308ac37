//! # Schema Bootstrap
//!
//! Embedded DDL for the product store, applied idempotently at startup.
//!
//! There is no migration tooling and no version tracking here: the schema
//! is a single `IF NOT EXISTS` script. The CHECK constraints are the
//! store-side backstop behind the input validation in depot-core; violating
//! them surfaces as a [`crate::error::RepositoryError`] on the offending
//! operation.

use tracing::info;

use crate::error::ConfigError;
use crate::provider::ConnectionProvider;

/// The product store schema.
///
/// `created_at` is stored as RFC 3339 text; the driver's chrono integration
/// reads and writes it directly. `category_id` is nullable: a product
/// without a category simply never appears in the joined fetch.
const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS categories (
    id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(name) > 0)
);

CREATE TABLE IF NOT EXISTS products (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT    NOT NULL CHECK (length(name) > 0),
    price_cents INTEGER NOT NULL CHECK (price_cents >= 0),
    stock       INTEGER NOT NULL CHECK (stock >= 0),
    created_at  TEXT    NOT NULL,
    category_id INTEGER REFERENCES categories(id)
);

CREATE INDEX IF NOT EXISTS idx_products_stock ON products(stock);
CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_id);
";

/// Applies the schema. Safe to run on every start.
pub async fn ensure_schema(provider: &ConnectionProvider) -> Result<(), ConfigError> {
    let mut conn = provider
        .acquire()
        .await
        .map_err(|e| ConfigError::Schema(e.to_string()))?;

    sqlx::raw_sql(SCHEMA)
        .execute(&mut *conn)
        .await
        .map_err(|e| ConfigError::Schema(e.to_string()))?;

    info!("product store schema ready");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bootstrap_is_idempotent() {
        let provider = ConnectionProvider::in_memory();
        ensure_schema(&provider).await.unwrap();
        ensure_schema(&provider).await.unwrap();
    }

    #[tokio::test]
    async fn test_check_constraints_reject_bad_rows() {
        let provider = ConnectionProvider::in_memory();
        ensure_schema(&provider).await.unwrap();

        let mut conn = provider.acquire().await.unwrap();
        let result = sqlx::query(
            "INSERT INTO products (name, price_cents, stock, created_at) \
             VALUES ('Bad', -1, 0, '2024-01-01T00:00:00Z')",
        )
        .execute(&mut *conn)
        .await;

        assert!(result.is_err());
    }
}
