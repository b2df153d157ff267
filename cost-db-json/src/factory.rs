use async_trait::async_trait;
use cost_core::db::{DbConfig, RepositoryFactory};
use cost_core::{ItemRepository, RepositoryError};

use crate::repository::JsonFileRepository;

/// [`RepositoryFactory`] for the `"json"` backend.
///
/// `config.connection_string` is the path of the catalog file.
pub struct JsonRepositoryFactory;

#[async_trait]
impl RepositoryFactory for JsonRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "json"
    }

    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn ItemRepository>, RepositoryError> {
        if config.connection_string.trim().is_empty() {
            return Err(RepositoryError::Configuration(
                "json backend needs a file path".to_string(),
            ));
        }
        let repo = JsonFileRepository::open(&config.connection_string).await?;
        Ok(Box::new(repo))
    }
}
