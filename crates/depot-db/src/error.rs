//! # Data-Access Error Types
//!
//! Two error categories cover the whole crate:
//!
//! - [`ConfigError`] - startup-fatal problems: a missing or malformed
//!   connection string, a catalog/mapper mismatch, a failed schema
//!   bootstrap. Nothing per-call ever produces one.
//! - [`RepositoryError`] - a store failure during a single operation. It
//!   carries the operation's identity and keeps the driver error as its
//!   source; the driver type itself never crosses the repository API.
//!
//! Absence is not represented here at all: reads return `Option`, writes
//! and existence checks return `bool`.
//!
//! ## Error Flow
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                       Error Propagation                            │
//! │                                                                    │
//! │  sqlx::Error (driver)                                              │
//! │       │                                                            │
//! │       ▼  logged at the boundary, then wrapped                      │
//! │  RepositoryError { operation, source }                             │
//! │       │                                                            │
//! │       ▼                                                            │
//! │  HTTP layer maps to a status code (depot-api)                      │
//! └────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::catalog::Operation;

// =============================================================================
// Configuration Error
// =============================================================================

/// Startup-fatal configuration problems.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No connection string was provided.
    #[error("database url is not set")]
    MissingDatabaseUrl,

    /// The connection string could not be parsed by the driver.
    #[error("invalid database url '{url}': {reason}")]
    InvalidDatabaseUrl { url: String, reason: String },

    /// A catalog statement's declared output columns disagree with the
    /// mapper's declared column tables.
    #[error("catalog columns for {operation} do not match the mapper: declared [{declared}], expected [{expected}]")]
    ColumnMismatch {
        operation: Operation,
        declared: String,
        expected: String,
    },

    /// The schema bootstrap DDL failed to apply.
    #[error("schema bootstrap failed: {0}")]
    Schema(String),
}

// =============================================================================
// Repository Error
// =============================================================================

/// A store failure during one repository operation.
///
/// `Display` names the operation; the driver cause is available through
/// `std::error::Error::source()`.
#[derive(Debug, Error)]
#[error("product store operation '{operation}' failed")]
pub struct RepositoryError {
    /// Which operation failed.
    pub operation: Operation,

    /// The underlying driver failure.
    #[source]
    pub source: sqlx::Error,
}

/// Result type for repository operations.
pub type DbResult<T> = Result<T, RepositoryError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_repository_error_names_the_operation() {
        let err = RepositoryError {
            operation: Operation::UpdatePrice,
            source: sqlx::Error::PoolClosed,
        };
        assert_eq!(
            err.to_string(),
            "product store operation 'update_price' failed"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::MissingDatabaseUrl.to_string(),
            "database url is not set"
        );

        let err = ConfigError::InvalidDatabaseUrl {
            url: "sqlite://x?mode=banana".to_string(),
            reason: "unknown mode".to_string(),
        };
        assert!(err.to_string().contains("mode=banana"));
    }
}
