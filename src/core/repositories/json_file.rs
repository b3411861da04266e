//! JSON seed file repository
//!
//! Loads a `QuotationSeed` document from disk at startup and serves rows
//! from memory. The file can be re-read at runtime with `reload`.

use crate::core::repository::{QuotationRepository, RepositoryError};
use crate::models::quotation::{QuotationRow, QuotationSeed};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Repository backed by a JSON seed file
pub struct JsonFileRepository {
    path: PathBuf,
    rows: RwLock<Vec<QuotationRow>>,
}

impl JsonFileRepository {
    /// Read and parse the seed file at `path`
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a valid seed
    /// document.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();
        let rows = read_seed(&path).await?;
        info!("Loaded {} quotation rows from {}", rows.len(), path.display());

        Ok(Self {
            path,
            rows: RwLock::new(rows),
        })
    }
}

/// Read every row of a seed file
pub async fn read_seed(path: &Path) -> Result<Vec<QuotationRow>, RepositoryError> {
    let display = path.display().to_string();
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RepositoryError::Io {
            path: display.clone(),
            source,
        })?;

    let seed: QuotationSeed =
        serde_json::from_str(&content).map_err(|source| RepositoryError::Parse {
            path: display,
            source,
        })?;

    Ok(seed.rows)
}

#[async_trait]
impl QuotationRepository for JsonFileRepository {
    async fn find_rows(
        &self,
        quotation_id: i64,
        version_id: i64,
    ) -> Result<Vec<QuotationRow>, RepositoryError> {
        let rows = self.rows.read().await;
        let matched: Vec<QuotationRow> = rows
            .iter()
            .filter(|row| row.belongs_to(quotation_id, version_id))
            .cloned()
            .collect();

        debug!(
            "Quotation {} version {}: {} rows",
            quotation_id,
            version_id,
            matched.len()
        );
        Ok(matched)
    }

    async fn reload(&self) -> Result<usize, RepositoryError> {
        // Parse before taking the lock so a bad file leaves the old rows in place
        let fresh = read_seed(&self.path).await?;
        let count = fresh.len();
        *self.rows.write().await = fresh;

        info!("Reloaded {} quotation rows from {}", count, self.path.display());
        Ok(count)
    }

    async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }

    fn source_name(&self) -> &str {
        "json_file"
    }
}
