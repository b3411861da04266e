//! Quotation data source abstraction
//!
//! This module defines a common trait for the places quotation rows can be
//! read from (in-memory, JSON seed file) so the HTTP layer does not depend
//! on any particular storage.

use crate::models::quotation::QuotationRow;
use async_trait::async_trait;
use thiserror::Error;

/// Error types for repository operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed data in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// Trait for quotation row sources
#[async_trait]
pub trait QuotationRepository: Send + Sync {
    /// Fetch all rows of one quotation version, in stored order
    ///
    /// Returns an empty vector when the version has no rows.
    async fn find_rows(
        &self,
        quotation_id: i64,
        version_id: i64,
    ) -> Result<Vec<QuotationRow>, RepositoryError>;

    /// Re-read the backing store, returning the new row count
    async fn reload(&self) -> Result<usize, RepositoryError>;

    /// Number of rows currently held
    async fn row_count(&self) -> usize;

    /// Get the data source name
    fn source_name(&self) -> &str;
}
