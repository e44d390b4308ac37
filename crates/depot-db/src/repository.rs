//! # Product Repository
//!
//! The operation surface over the product store.
//!
//! ## Per-Operation Flow
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  repo.get_by_id(7)                                                   │
//! │       │                                                              │
//! │       ▼                                                              │
//! │  acquire connection ← scoped to this call, returned on drop          │
//! │       │                                                              │
//! │       ▼                                                              │
//! │  catalog::statement(GetById) ── bind(7) ── execute                   │
//! │       │                                                              │
//! │       ├── row ──► mapper::product_from_row ──► Ok(Some(product))     │
//! │       ├── no row ─────────────────────────────► Ok(None)             │
//! │       └── store failure ── error! ── wrap ────► Err(RepositoryError) │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Absence never errors: reads return `Option`, writes and the existence
//! check return `bool` driven by rows-affected. Only the store failing is
//! an error, and it is logged here, at the boundary, before the wrapped
//! error leaves the crate.

use sqlx::pool::PoolConnection;
use sqlx::Sqlite;
use tracing::{debug, error, info, warn};

use depot_core::{Money, NewProduct, Product, DEFAULT_LOW_STOCK_THRESHOLD};

use crate::catalog::{self, Operation};
use crate::error::{ConfigError, DbResult, RepositoryError};
use crate::mapper;
use crate::provider::ConnectionProvider;

// =============================================================================
// Product Repository
// =============================================================================

/// Repository for product store operations.
///
/// A stateless service value: it holds only the connection provider, every
/// call acquires its own connection, and clones share the same pool. Safe
/// to call concurrently.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(provider)?;
///
/// let all = repo.get_all().await?;
/// let one = repo.get_by_id(7).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    provider: ConnectionProvider,
}

impl ProductRepository {
    /// Creates a repository over a connection provider.
    ///
    /// Verifies the query catalog against the mapper's declared column
    /// tables, so a drifted statement fails here instead of at first use.
    pub fn new(provider: ConnectionProvider) -> Result<Self, ConfigError> {
        mapper::verify_catalog()?;
        Ok(ProductRepository { provider })
    }

    /// The provider this repository runs on.
    pub fn provider(&self) -> &ConnectionProvider {
        &self.provider
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Fetches every product, ordered by name ascending.
    ///
    /// ## Returns
    /// * `Ok(Vec<Product>)` - possibly empty; `category` is `None` on each
    pub async fn get_all(&self) -> DbResult<Vec<Product>> {
        let stmt = catalog::statement(Operation::GetAll);
        let mut conn = self.connection(Operation::GetAll).await?;

        debug!(operation = %stmt.operation, "executing product query");

        let rows = sqlx::query(stmt.sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| store_failure(Operation::GetAll, e))?;

        rows.iter()
            .map(mapper::product_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| store_failure(Operation::GetAll, e))
    }

    /// Fetches one product by id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - row found
    /// * `Ok(None)` - no such id (not an error)
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let stmt = catalog::statement(Operation::GetById);
        let mut conn = self.connection(Operation::GetById).await?;

        debug!(operation = %stmt.operation, id, "executing product query");

        let row = sqlx::query(stmt.sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| store_failure(Operation::GetById, e))?;

        if row.is_none() {
            warn!(id, "product lookup matched no row");
        }

        row.as_ref()
            .map(mapper::product_from_row)
            .transpose()
            .map_err(|e| store_failure(Operation::GetById, e))
    }

    /// Fetches products at or below a stock threshold, ordered by stock
    /// ascending.
    ///
    /// ## Arguments
    /// * `minimum_stock` - inclusive threshold;
    ///   [`DEFAULT_LOW_STOCK_THRESHOLD`] when `None`
    pub async fn get_with_low_stock(
        &self,
        minimum_stock: Option<i64>,
    ) -> DbResult<Vec<Product>> {
        let threshold = minimum_stock.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);

        let stmt = catalog::statement(Operation::GetWithLowStock);
        let mut conn = self.connection(Operation::GetWithLowStock).await?;

        debug!(operation = %stmt.operation, threshold, "executing product query");

        let rows = sqlx::query(stmt.sql)
            .bind(threshold)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| store_failure(Operation::GetWithLowStock, e))?;

        rows.iter()
            .map(mapper::product_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| store_failure(Operation::GetWithLowStock, e))
    }

    /// Counts all products. Zero for an empty store.
    pub async fn count_total(&self) -> DbResult<i64> {
        let stmt = catalog::statement(Operation::CountTotal);
        let mut conn = self.connection(Operation::CountTotal).await?;

        debug!(operation = %stmt.operation, "executing product query");

        sqlx::query_scalar(stmt.sql)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| store_failure(Operation::CountTotal, e))
    }

    /// Sums price × stock over every product.
    ///
    /// An empty store sums to SQL NULL, which is coerced to zero here.
    pub async fn total_stock_value(&self) -> DbResult<Money> {
        let stmt = catalog::statement(Operation::TotalStockValue);
        let mut conn = self.connection(Operation::TotalStockValue).await?;

        debug!(operation = %stmt.operation, "executing product query");

        let value: Option<i64> = sqlx::query_scalar(stmt.sql)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| store_failure(Operation::TotalStockValue, e))?;

        Ok(Money::from_cents(value.unwrap_or(0)))
    }

    /// Fetches every categorized product with its category attached.
    ///
    /// Inner join: products without a category do not appear. Each yielded
    /// product carries `Some(Category)`.
    pub async fn get_with_categories(&self) -> DbResult<Vec<Product>> {
        let stmt = catalog::statement(Operation::GetWithCategories);
        let mut conn = self.connection(Operation::GetWithCategories).await?;

        debug!(operation = %stmt.operation, "executing product query");

        let rows = sqlx::query(stmt.sql)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| store_failure(Operation::GetWithCategories, e))?;

        rows.iter()
            .map(|row| mapper::product_with_category_from_row(row, mapper::CATEGORY_SPLIT_POINT))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| store_failure(Operation::GetWithCategories, e))
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a product draft and returns the store-assigned id.
    ///
    /// ## Returns
    /// * `Ok(id)` - the new row's id
    /// * `Err(RepositoryError)` - the store rejected the insert (constraint
    ///   violation, connectivity)
    pub async fn add(&self, draft: &NewProduct) -> DbResult<i64> {
        let stmt = catalog::statement(Operation::Insert);
        let mut conn = self.connection(Operation::Insert).await?;

        debug!(operation = %stmt.operation, name = %draft.name, "executing product write");

        let result = sqlx::query(stmt.sql)
            .bind(&draft.name)
            .bind(draft.price_cents)
            .bind(draft.stock)
            .bind(draft.created_at)
            .execute(&mut *conn)
            .await
            .map_err(|e| store_failure(Operation::Insert, e))?;

        let id = result.last_insert_rowid();
        info!(id, name = %draft.name, "product added");
        Ok(id)
    }

    /// Replaces a product's name, price, and stock.
    ///
    /// `created_at` is deliberately not part of the statement; it never
    /// changes after insert.
    ///
    /// ## Returns
    /// * `Ok(true)` - a row was changed
    /// * `Ok(false)` - no row has this id (not an error)
    pub async fn update(&self, product: &Product) -> DbResult<bool> {
        let stmt = catalog::statement(Operation::Update);
        let mut conn = self.connection(Operation::Update).await?;

        debug!(operation = %stmt.operation, id = product.id, "executing product write");

        let result = sqlx::query(stmt.sql)
            .bind(&product.name)
            .bind(product.price_cents)
            .bind(product.stock)
            .bind(product.id)
            .execute(&mut *conn)
            .await
            .map_err(|e| store_failure(Operation::Update, e))?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!(id = product.id, "product updated");
        } else {
            warn!(id = product.id, "product update matched no row");
        }
        Ok(updated)
    }

    /// Changes only a product's price.
    ///
    /// No range policy here beyond the store's own constraints.
    pub async fn update_price(&self, id: i64, price: Money) -> DbResult<bool> {
        let stmt = catalog::statement(Operation::UpdatePrice);
        let mut conn = self.connection(Operation::UpdatePrice).await?;

        debug!(operation = %stmt.operation, id, price = %price, "executing product write");

        let result = sqlx::query(stmt.sql)
            .bind(price.cents())
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| store_failure(Operation::UpdatePrice, e))?;

        let updated = result.rows_affected() > 0;
        if updated {
            info!(id, price = %price, "product price updated");
        } else {
            warn!(id, "product price update matched no row");
        }
        Ok(updated)
    }

    /// Physically removes a product.
    ///
    /// ## Returns
    /// * `Ok(true)` - the row existed and is gone
    /// * `Ok(false)` - nothing to remove (not an error)
    pub async fn delete(&self, id: i64) -> DbResult<bool> {
        let stmt = catalog::statement(Operation::Delete);
        let mut conn = self.connection(Operation::Delete).await?;

        debug!(operation = %stmt.operation, id, "executing product write");

        let result = sqlx::query(stmt.sql)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| store_failure(Operation::Delete, e))?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!(id, "product deleted");
        } else {
            warn!(id, "product delete matched no row");
        }
        Ok(removed)
    }

    /// Checks whether a product id exists.
    ///
    /// Non-positive ids are never assigned by the store, so they answer
    /// `false` before any connection is acquired.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        if id <= 0 {
            debug!(id, "existence check short-circuited");
            return Ok(false);
        }

        let stmt = catalog::statement(Operation::Exists);
        let mut conn = self.connection(Operation::Exists).await?;

        debug!(operation = %stmt.operation, id, "executing product query");

        let matched: i64 = sqlx::query_scalar(stmt.sql)
            .bind(id)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| store_failure(Operation::Exists, e))?;

        Ok(matched > 0)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn connection(&self, operation: Operation) -> DbResult<PoolConnection<Sqlite>> {
        self.provider
            .acquire()
            .await
            .map_err(|e| store_failure(operation, e))
    }
}

/// The translation boundary: log the driver failure, then wrap it with the
/// operation's identity. Nothing below this line is visible to callers.
fn store_failure(operation: Operation, source: sqlx::Error) -> RepositoryError {
    error!(operation = %operation, error = %source, "product store operation failed");
    RepositoryError { operation, source }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;
    use std::error::Error as _;
    use std::sync::{Arc, Mutex};

    async fn repo() -> ProductRepository {
        let provider = ConnectionProvider::in_memory();
        schema::ensure_schema(&provider).await.unwrap();
        ProductRepository::new(provider).unwrap()
    }

    async fn insert_category(repo: &ProductRepository, name: &str) -> i64 {
        let mut conn = repo.provider().acquire().await.unwrap();
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
            .bind(name)
            .execute(&mut *conn)
            .await
            .unwrap();
        result.last_insert_rowid()
    }

    async fn assign_category(repo: &ProductRepository, product_id: i64, category_id: i64) {
        let mut conn = repo.provider().acquire().await.unwrap();
        sqlx::query("UPDATE products SET category_id = ?1 WHERE id = ?2")
            .bind(category_id)
            .bind(product_id)
            .execute(&mut *conn)
            .await
            .unwrap();
    }

    /// In-memory sink for asserting on emitted diagnostics.
    #[derive(Clone, Default)]
    struct LogSink(Arc<Mutex<Vec<u8>>>);

    impl LogSink {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl std::io::Write for LogSink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogSink {
        type Writer = LogSink;

        fn make_writer(&'a self) -> LogSink {
            self.clone()
        }
    }

    #[tokio::test]
    async fn test_add_then_get_by_id_roundtrip() {
        let repo = repo().await;

        let draft = NewProduct::new("Widget", 999, 3);
        let id = repo.add(&draft).await.unwrap();
        assert!(id > 0);

        let fetched = repo.get_by_id(id).await.unwrap().expect("row exists");
        assert_eq!(fetched.id, id);
        assert_eq!(fetched.name, "Widget");
        assert_eq!(fetched.price_cents, 999);
        assert_eq!(fetched.stock, 3);
        assert_eq!(fetched.created_at, draft.created_at);
        assert!(fetched.category.is_none());
        assert!(fetched.has_stock());
    }

    #[tokio::test]
    async fn test_get_by_id_absent_is_none() {
        let repo = repo().await;
        assert!(repo.get_by_id(12345).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_miss_is_logged() {
        let repo = repo().await;

        let sink = LogSink::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(sink.clone())
            .with_ansi(false)
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);

        assert!(repo.get_by_id(4242).await.unwrap().is_none());
        drop(guard);

        let log = sink.contents();
        assert!(log.contains("4242"), "miss should be logged, got: {log:?}");
        assert!(log.contains("matched no row"));
    }

    #[tokio::test]
    async fn test_get_all_ordered_by_name() {
        let repo = repo().await;

        repo.add(&NewProduct::new("Cable", 500, 1)).await.unwrap();
        repo.add(&NewProduct::new("Adapter", 700, 2)).await.unwrap();
        repo.add(&NewProduct::new("Bracket", 300, 3)).await.unwrap();

        let names: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Adapter", "Bracket", "Cable"]);
    }

    #[tokio::test]
    async fn test_get_all_empty_store() {
        let repo = repo().await;
        assert!(repo.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_low_stock_filters_and_orders_ascending() {
        let repo = repo().await;

        repo.add(&NewProduct::new("Plenty", 100, 10)).await.unwrap();
        repo.add(&NewProduct::new("Scarce", 100, 2)).await.unwrap();
        repo.add(&NewProduct::new("Middling", 100, 7)).await.unwrap();
        repo.add(&NewProduct::new("Edge", 100, 5)).await.unwrap();
        repo.add(&NewProduct::new("Gone", 100, 0)).await.unwrap();

        // Default threshold: stock <= 5.
        let low = repo.get_with_low_stock(None).await.unwrap();
        let stocks: Vec<i64> = low.iter().map(|p| p.stock).collect();
        assert_eq!(stocks, vec![0, 2, 5]);

        // A wider threshold only grows the set.
        let wider = repo.get_with_low_stock(Some(7)).await.unwrap();
        assert_eq!(wider.len(), 4);
        let narrow_ids: Vec<i64> = low.iter().map(|p| p.id).collect();
        assert!(narrow_ids.iter().all(|id| wider.iter().any(|p| p.id == *id)));
    }

    #[tokio::test]
    async fn test_low_stock_default_boundary_is_inclusive_five() {
        let repo = repo().await;

        repo.add(&NewProduct::new("AtFive", 100, 5)).await.unwrap();
        repo.add(&NewProduct::new("AtSix", 100, 6)).await.unwrap();

        let low = repo.get_with_low_stock(None).await.unwrap();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "AtFive");
    }

    #[tokio::test]
    async fn test_count_total() {
        let repo = repo().await;
        assert_eq!(repo.count_total().await.unwrap(), 0);

        repo.add(&NewProduct::new("A", 100, 1)).await.unwrap();
        repo.add(&NewProduct::new("B", 100, 1)).await.unwrap();
        repo.add(&NewProduct::new("C", 100, 1)).await.unwrap();
        assert_eq!(repo.count_total().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_total_stock_value_sums_price_times_stock() {
        let repo = repo().await;

        // Empty store: SUM is NULL, coerced to zero.
        assert_eq!(repo.total_stock_value().await.unwrap(), Money::zero());

        repo.add(&NewProduct::new("A", 299, 4)).await.unwrap(); // 1196
        repo.add(&NewProduct::new("B", 1000, 0)).await.unwrap(); //    0
        repo.add(&NewProduct::new("C", 1250, 2)).await.unwrap(); // 2500

        let value = repo.total_stock_value().await.unwrap();
        assert_eq!(value, Money::from_cents(3696));
    }

    #[tokio::test]
    async fn test_update_existing_row() {
        let repo = repo().await;

        let id = repo.add(&NewProduct::new("Widget", 999, 3)).await.unwrap();
        let mut product = repo.get_by_id(id).await.unwrap().unwrap();
        let original_created_at = product.created_at;

        product.name = "Widget Pro".to_string();
        product.price_cents = 1499;
        product.stock = 8;

        assert!(repo.update(&product).await.unwrap());

        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Widget Pro");
        assert_eq!(fetched.price_cents, 1499);
        assert_eq!(fetched.stock, 8);
        // The update statement never touches created_at.
        assert_eq!(fetched.created_at, original_created_at);
    }

    #[tokio::test]
    async fn test_update_missing_row_returns_false_and_changes_nothing() {
        let repo = repo().await;
        repo.add(&NewProduct::new("Widget", 999, 3)).await.unwrap();

        let before = repo.count_total().await.unwrap();

        let ghost = Product {
            id: 9999,
            name: "Ghost".to_string(),
            price_cents: 1,
            stock: 1,
            created_at: chrono::Utc::now(),
            category: None,
        };
        assert!(!repo.update(&ghost).await.unwrap());

        assert_eq!(repo.count_total().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_update_price() {
        let repo = repo().await;

        let id = repo.add(&NewProduct::new("Widget", 999, 3)).await.unwrap();

        assert!(repo.update_price(id, Money::from_cents(1250)).await.unwrap());
        let fetched = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(fetched.price(), Money::from_cents(1250));

        // Zero is a legal price; the store CHECK only rejects negatives.
        assert!(repo.update_price(id, Money::zero()).await.unwrap());
        let free = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(free.price_cents, 0);
        assert!(free.price().is_zero());

        assert!(!repo.update_price(9999, Money::from_cents(1)).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_then_absent() {
        let repo = repo().await;

        let id = repo.add(&NewProduct::new("Widget", 999, 3)).await.unwrap();

        assert!(repo.delete(id).await.unwrap());
        assert!(repo.get_by_id(id).await.unwrap().is_none());
        assert!(!repo.exists(id).await.unwrap());

        // Already gone: false, not an error.
        assert!(!repo.delete(id).await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_for_stored_and_unknown_ids() {
        let repo = repo().await;

        let id = repo.add(&NewProduct::new("Widget", 999, 3)).await.unwrap();
        assert!(repo.exists(id).await.unwrap());
        assert!(!repo.exists(id + 999).await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_short_circuits_non_positive_ids() {
        let repo = repo().await;

        // With the provider closed, any operation that reaches the store
        // fails. Non-positive ids still answer, proving they never reach it.
        repo.provider().close().await;

        assert!(!repo.exists(0).await.unwrap());
        assert!(!repo.exists(-1).await.unwrap());
        assert!(repo.exists(1).await.is_err());
    }

    #[tokio::test]
    async fn test_get_with_categories_attaches_and_excludes() {
        let repo = repo().await;

        let tools = insert_category(&repo, "Tools").await;
        let toys = insert_category(&repo, "Toys").await;

        let hammer = repo.add(&NewProduct::new("Hammer", 1500, 4)).await.unwrap();
        let yoyo = repo.add(&NewProduct::new("Yo-yo", 350, 9)).await.unwrap();
        let orphan = repo.add(&NewProduct::new("Orphan", 100, 1)).await.unwrap();

        assign_category(&repo, hammer, tools).await;
        assign_category(&repo, yoyo, toys).await;

        let products = repo.get_with_categories().await.unwrap();
        assert_eq!(products.len(), 2);
        assert!(products.iter().all(|p| p.category.is_some()));

        let hammer_row = products.iter().find(|p| p.id == hammer).unwrap();
        assert_eq!(hammer_row.category.as_ref().unwrap().name, "Tools");
        assert_eq!(hammer_row.category.as_ref().unwrap().id, tools);

        assert!(!products.iter().any(|p| p.id == orphan));
    }

    #[tokio::test]
    async fn test_store_rejection_carries_operation_identity() {
        let repo = repo().await;

        // Violates the store's price_cents >= 0 CHECK.
        let bad = NewProduct::new("Bad", -1, 0);
        let err = repo.add(&bad).await.unwrap_err();

        assert_eq!(err.operation, Operation::Insert);
        assert!(err.source().is_some());
    }

    #[tokio::test]
    async fn test_widget_scenario_end_to_end() {
        let repo = repo().await;

        let id = repo.add(&NewProduct::new("Widget", 999, 3)).await.unwrap();
        assert_eq!(id, 1);

        let widget = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(widget.name, "Widget");
        assert_eq!(widget.price(), Money::from_cents(999));
        assert_eq!(widget.stock, 3);
        assert!(widget.has_stock());

        assert!(repo.update_price(id, Money::from_cents(1250)).await.unwrap());
        let repriced = repo.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(repriced.price(), Money::from_cents(1250));

        assert!(repo.delete(id).await.unwrap());
        assert!(repo.get_by_id(id).await.unwrap().is_none());
    }
}
