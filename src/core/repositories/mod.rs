//! Repository implementations

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;

use crate::core::config::{Config, DataSource};
use crate::core::repository::{QuotationRepository, RepositoryError};
use std::sync::Arc;

/// Build the repository selected by `data.source`
///
/// Both sources read `data.seed_path`; `json_file` keeps the path for
/// reloads, `memory` only takes a snapshot of it.
pub async fn open_repository(
    config: &Config,
) -> Result<Arc<dyn QuotationRepository>, RepositoryError> {
    match config.data_source {
        DataSource::JsonFile => Ok(Arc::new(JsonFileRepository::load(&config.seed_path).await?)),
        DataSource::Memory => {
            let rows = json_file::read_seed(&config.seed_path).await?;
            Ok(Arc::new(InMemoryRepository::new(rows)))
        }
    }
}
