use async_trait::async_trait;
use cost_core::db::{DbConfig, RepositoryFactory};
use cost_core::{ItemRepository, RepositoryError};

use crate::repository::SqliteRepository;

/// [`RepositoryFactory`] for SQLite.
///
/// Register it with a [`cost_core::db::RepositoryRegistry`] to make the
/// `"sqlite"` backend available:
///
/// ```rust,no_run
/// use cost_core::db::RepositoryRegistry;
/// use cost_db_sqlite::SqliteRepositoryFactory;
///
/// let mut registry = RepositoryRegistry::new();
/// registry.register(Box::new(SqliteRepositoryFactory));
/// ```
pub struct SqliteRepositoryFactory;

#[async_trait]
impl RepositoryFactory for SqliteRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    /// Open the database at `config.connection_string` (a file path, created
    /// if missing, or `:memory:`), run migrations and seed a new database.
    async fn create(
        &self,
        config: &DbConfig,
    ) -> Result<Box<dyn ItemRepository>, RepositoryError> {
        let repo = SqliteRepository::new(&config.connection_string).await?;
        repo.run_migrations().await?;
        repo.seed_if_new().await?;
        Ok(Box::new(repo))
    }
}
