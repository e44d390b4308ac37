//! # Query Catalog
//!
//! The fixed SQL statement set for the product store, one entry per
//! repository operation.
//!
//! Every statement is a compile-time constant. Caller input is only ever
//! bound through `?N` placeholders, never spliced into the text, so the
//! repository cannot be steered into executing anything outside this table.
//!
//! Each entry also declares the ordered placeholder names and the output
//! columns the statement produces. The mapper checks the declared columns
//! against its own mapping tables at startup (see
//! [`crate::mapper::verify_catalog`]), so a statement and the mapping
//! drifting apart is caught before the first row is read.

use std::fmt;

// =============================================================================
// Operation
// =============================================================================

/// Identity of a repository operation.
///
/// The `Display` form is the stable snake_case name used in logs and in
/// [`crate::error::RepositoryError`] messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetAll,
    GetById,
    GetWithLowStock,
    CountTotal,
    TotalStockValue,
    GetWithCategories,
    Insert,
    Update,
    UpdatePrice,
    Delete,
    Exists,
}

impl Operation {
    /// Every operation, in catalog order.
    pub const ALL: [Operation; 11] = [
        Operation::GetAll,
        Operation::GetById,
        Operation::GetWithLowStock,
        Operation::CountTotal,
        Operation::TotalStockValue,
        Operation::GetWithCategories,
        Operation::Insert,
        Operation::Update,
        Operation::UpdatePrice,
        Operation::Delete,
        Operation::Exists,
    ];

    /// Stable name for logs and error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Operation::GetAll => "get_all",
            Operation::GetById => "get_by_id",
            Operation::GetWithLowStock => "get_with_low_stock",
            Operation::CountTotal => "count_total",
            Operation::TotalStockValue => "total_stock_value",
            Operation::GetWithCategories => "get_with_categories",
            Operation::Insert => "insert",
            Operation::Update => "update",
            Operation::UpdatePrice => "update_price",
            Operation::Delete => "delete",
            Operation::Exists => "exists",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Statement
// =============================================================================

/// One catalog entry: the SQL text plus its declared shape.
#[derive(Debug, Clone, Copy)]
pub struct Statement {
    /// The operation this statement serves.
    pub operation: Operation,

    /// Parameterized SQL. Placeholders are `?1..?N`.
    pub sql: &'static str,

    /// Placeholder names, in `?1..?N` order. Empty for parameterless
    /// statements.
    pub params: &'static [&'static str],

    /// Output columns in SELECT order. Empty for writes. For the joined
    /// fetch, all product columns precede all category columns.
    pub columns: &'static [&'static str],
}

// =============================================================================
// The Catalog
// =============================================================================

const GET_ALL: Statement = Statement {
    operation: Operation::GetAll,
    sql: "SELECT id, name, price_cents, stock, created_at FROM products ORDER BY name",
    params: &[],
    columns: &["id", "name", "price_cents", "stock", "created_at"],
};

const GET_BY_ID: Statement = Statement {
    operation: Operation::GetById,
    sql: "SELECT id, name, price_cents, stock, created_at FROM products WHERE id = ?1",
    params: &["id"],
    columns: &["id", "name", "price_cents", "stock", "created_at"],
};

const GET_WITH_LOW_STOCK: Statement = Statement {
    operation: Operation::GetWithLowStock,
    sql: "SELECT id, name, price_cents, stock, created_at FROM products \
          WHERE stock <= ?1 ORDER BY stock ASC",
    params: &["minimum_stock"],
    columns: &["id", "name", "price_cents", "stock", "created_at"],
};

const COUNT_TOTAL: Statement = Statement {
    operation: Operation::CountTotal,
    sql: "SELECT COUNT(*) AS product_count FROM products",
    params: &[],
    columns: &["product_count"],
};

const TOTAL_STOCK_VALUE: Statement = Statement {
    operation: Operation::TotalStockValue,
    sql: "SELECT SUM(price_cents * stock) AS stock_value_cents FROM products",
    params: &[],
    columns: &["stock_value_cents"],
};

// Product columns first, category columns second. The mapper splits the row
// at the index where the category's id column begins.
const GET_WITH_CATEGORIES: Statement = Statement {
    operation: Operation::GetWithCategories,
    sql: "SELECT p.id, p.name, p.price_cents, p.stock, p.created_at, c.id, c.name \
          FROM products p \
          INNER JOIN categories c ON p.category_id = c.id",
    params: &[],
    columns: &["id", "name", "price_cents", "stock", "created_at", "id", "name"],
};

const INSERT: Statement = Statement {
    operation: Operation::Insert,
    sql: "INSERT INTO products (name, price_cents, stock, created_at) VALUES (?1, ?2, ?3, ?4)",
    params: &["name", "price_cents", "stock", "created_at"],
    columns: &[],
};

const UPDATE: Statement = Statement {
    operation: Operation::Update,
    sql: "UPDATE products SET name = ?1, price_cents = ?2, stock = ?3 WHERE id = ?4",
    params: &["name", "price_cents", "stock", "id"],
    columns: &[],
};

const UPDATE_PRICE: Statement = Statement {
    operation: Operation::UpdatePrice,
    sql: "UPDATE products SET price_cents = ?1 WHERE id = ?2",
    params: &["price_cents", "id"],
    columns: &[],
};

const DELETE: Statement = Statement {
    operation: Operation::Delete,
    sql: "DELETE FROM products WHERE id = ?1",
    params: &["id"],
    columns: &[],
};

const EXISTS: Statement = Statement {
    operation: Operation::Exists,
    sql: "SELECT COUNT(1) AS matched FROM products WHERE id = ?1",
    params: &["id"],
    columns: &["matched"],
};

/// Looks up the statement for an operation. Total: every operation has
/// exactly one entry.
pub const fn statement(operation: Operation) -> &'static Statement {
    match operation {
        Operation::GetAll => &GET_ALL,
        Operation::GetById => &GET_BY_ID,
        Operation::GetWithLowStock => &GET_WITH_LOW_STOCK,
        Operation::CountTotal => &COUNT_TOTAL,
        Operation::TotalStockValue => &TOTAL_STOCK_VALUE,
        Operation::GetWithCategories => &GET_WITH_CATEGORIES,
        Operation::Insert => &INSERT,
        Operation::Update => &UPDATE,
        Operation::UpdatePrice => &UPDATE_PRICE,
        Operation::Delete => &DELETE,
        Operation::Exists => &EXISTS,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
