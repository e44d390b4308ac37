//! # Row Mapper
//!
//! Declared column-to-field mapping between store rows and domain types.
//!
//! ## Mapping Rules
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                       Two Row Shapes                                 │
//! │                                                                      │
//! │  Product row (single entity, any column order):                      │
//! │    id │ name │ price_cents │ stock │ created_at                      │
//! │    resolved BY NAME over the whole row                               │
//! │                                                                      │
//! │  Joined row (product + category, fixed column order):                │
//! │    id │ name │ price_cents │ stock │ created_at │ id │ name          │
//! │    └──────────── product ─────────────────────┘ └─ category ─┘       │
//! │                                                 ▲                    │
//! │                                    CATEGORY_SPLIT_POINT (index 5)    │
//! │                                                                      │
//! │    both entities declare an `id` and a `name`; the split index,      │
//! │    not aliasing, decides which occurrence belongs to whom, so        │
//! │    names are resolved BY NAME WITHIN each partition                  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`verify_catalog`] cross-checks every catalog statement's declared
//! output columns against the tables below once at repository construction,
//! so a drifted statement fails startup instead of a row read.

use std::ops::Range;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row};
use tracing::debug;

use depot_core::{Category, Product};

use crate::catalog::{self, Operation, Statement};
use crate::error::ConfigError;

// =============================================================================
// Declared Mapping Tables
// =============================================================================

/// Product columns, in the order every product-shaped statement selects
/// them.
pub const PRODUCT_COLUMNS: [&str; 5] = ["id", "name", "price_cents", "stock", "created_at"];

/// Category columns, in the order the joined statement selects them.
pub const CATEGORY_COLUMNS: [&str; 2] = ["id", "name"];

/// Index of the first category column in a joined row: the category's own
/// `id`. Everything before it is product, everything from it on is
/// category.
pub const CATEGORY_SPLIT_POINT: usize = PRODUCT_COLUMNS.len();

// =============================================================================
// Row Mapping
// =============================================================================

/// Maps a product-shaped row by column name.
///
/// Column order in the statement is irrelevant; only the names matter.
/// The `category` field is left empty, which is the contract for every
/// read except the joined fetch.
pub fn product_from_row(row: &SqliteRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        price_cents: row.try_get("price_cents")?,
        stock: row.try_get("stock")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        category: None,
    })
}

/// Maps a joined product+category row, partitioned at `split_at`.
///
/// Product columns are resolved by name within `[0, split_at)`, category
/// columns by name within `[split_at, row width)`. The duplicate `id` and
/// `name` columns are disambiguated by the partition alone.
///
/// ## Arguments
/// * `row` - a row of the joined fetch
/// * `split_at` - index of the category's first column
///   ([`CATEGORY_SPLIT_POINT`] for the catalog's joined statement)
pub fn product_with_category_from_row(
    row: &SqliteRow,
    split_at: usize,
) -> Result<Product, sqlx::Error> {
    if split_at == 0 || split_at >= row.len() {
        return Err(sqlx::Error::ColumnIndexOutOfBounds {
            index: split_at,
            len: row.len(),
        });
    }

    let product_part = 0..split_at;
    let category_part = split_at..row.len();

    let category = Category {
        id: row.try_get(ordinal_within(row, category_part.clone(), "id")?)?,
        name: row.try_get(ordinal_within(row, category_part, "name")?)?,
    };

    Ok(Product {
        id: row.try_get(ordinal_within(row, product_part.clone(), "id")?)?,
        name: row.try_get(ordinal_within(row, product_part.clone(), "name")?)?,
        price_cents: row.try_get(ordinal_within(row, product_part.clone(), "price_cents")?)?,
        stock: row.try_get(ordinal_within(row, product_part.clone(), "stock")?)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>(ordinal_within(row, product_part, "created_at")?)?,
        category: Some(category),
    })
}

/// Finds a column by name inside one partition of the row.
fn ordinal_within(row: &SqliteRow, part: Range<usize>, name: &str) -> Result<usize, sqlx::Error> {
    row.columns()[part]
        .iter()
        .find(|column| column.name() == name)
        .map(|column| column.ordinal())
        .ok_or_else(|| sqlx::Error::ColumnNotFound(name.to_string()))
}

// =============================================================================
// Catalog Verification
// =============================================================================

/// Validates every catalog statement's declared output columns against the
/// mapping tables above.
///
/// Runs once, at repository construction. A mismatch is a
/// [`ConfigError::ColumnMismatch`] naming the offending operation.
pub fn verify_catalog() -> Result<(), ConfigError> {
    for operation in Operation::ALL {
        verify_statement(catalog::statement(operation))?;
    }

    debug!(
        statements = Operation::ALL.len(),
        "catalog verified against mapping tables"
    );
    Ok(())
}

fn verify_statement(stmt: &Statement) -> Result<(), ConfigError> {
    match stmt.operation {
        // Product-shaped reads must declare exactly the product table.
        Operation::GetAll | Operation::GetById | Operation::GetWithLowStock => {
            if stmt.columns != PRODUCT_COLUMNS {
                return Err(mismatch(stmt, &PRODUCT_COLUMNS.join(", ")));
            }
            Ok(())
        }

        // The joined fetch must declare product columns, then category
        // columns, with the boundary at the declared split point.
        Operation::GetWithCategories => {
            let width = PRODUCT_COLUMNS.len() + CATEGORY_COLUMNS.len();
            let well_formed = stmt.columns.len() == width
                && stmt.columns[..CATEGORY_SPLIT_POINT] == PRODUCT_COLUMNS
                && stmt.columns[CATEGORY_SPLIT_POINT..] == CATEGORY_COLUMNS;

            if !well_formed {
                let expected = format!(
                    "{}, {}",
                    PRODUCT_COLUMNS.join(", "),
                    CATEGORY_COLUMNS.join(", ")
                );
                return Err(mismatch(stmt, &expected));
            }
            Ok(())
        }

        // Scalar reads produce exactly one named column.
        Operation::CountTotal | Operation::TotalStockValue | Operation::Exists => {
            if stmt.columns.len() != 1 {
                return Err(mismatch(stmt, "exactly one scalar column"));
            }
            Ok(())
        }

        // Writes produce no rows.
        Operation::Insert | Operation::Update | Operation::UpdatePrice | Operation::Delete => {
            if !stmt.columns.is_empty() {
                return Err(mismatch(stmt, "no output columns"));
            }
            Ok(())
        }
    }
}

fn mismatch(stmt: &Statement, expected: &str) -> ConfigError {
    ConfigError::ColumnMismatch {
        operation: stmt.operation,
        declared: stmt.columns.join(", "),
        expected: expected.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
