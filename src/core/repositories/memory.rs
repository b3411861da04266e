//! In-memory quotation repository
//!
//! Holds a fixed snapshot of rows. The snapshot is taken once (from the
//! seed file at startup) and is never re-read.

use crate::core::repository::{QuotationRepository, RepositoryError};
use crate::models::quotation::QuotationRow;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Repository holding rows in process memory
pub struct InMemoryRepository {
    rows: RwLock<Vec<QuotationRow>>,
}

impl InMemoryRepository {
    pub fn new(rows: Vec<QuotationRow>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl QuotationRepository for InMemoryRepository {
    async fn find_rows(
        &self,
        quotation_id: i64,
        version_id: i64,
    ) -> Result<Vec<QuotationRow>, RepositoryError> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .filter(|row| row.belongs_to(quotation_id, version_id))
            .cloned()
            .collect())
    }

    async fn reload(&self) -> Result<usize, RepositoryError> {
        Err(RepositoryError::Unavailable(
            "memory source is a startup snapshot and cannot be reloaded".to_string(),
        ))
    }

    async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }

    fn source_name(&self) -> &str {
        "memory"
    }
}
