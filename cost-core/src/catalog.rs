//! The Items Store operations on top of any [`ItemRepository`].
//!
//! Every candidate is validated before the repository is touched, so a
//! rejected request never reaches storage.

use thiserror::Error;
use tracing::{debug, error, info};

use crate::collation::sort_by_name;
use crate::db::repository::{ItemRepository, RepositoryError};
use crate::models::{Item, ItemCandidate, ItemId, NewItem, ValidationError};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Item não encontrado.")]
    NotFound(ItemId),

    #[error("{0}")]
    Storage(RepositoryError),
}

pub struct Catalog {
    repo: Box<dyn ItemRepository>,
}

impl Catalog {
    pub fn new(repo: Box<dyn ItemRepository>) -> Self {
        Self { repo }
    }

    /// Every item, sorted by `nome` under pt-BR collation.
    pub async fn list(&self) -> Result<Vec<Item>, CatalogError> {
        let mut items = self.repo.list_items().await.map_err(storage)?;
        sort_by_name(&mut items);
        Ok(items)
    }

    pub async fn get(&self, id: ItemId) -> Result<Item, CatalogError> {
        self.repo
            .get_item(id)
            .await
            .map_err(|e| not_found_or_storage(id, e))
    }

    /// Validate and store a new item, returning its assigned id.
    pub async fn create(&self, candidate: ItemCandidate) -> Result<ItemId, CatalogError> {
        let item = validated(candidate)?;
        let created = self.repo.create_item(item).await.map_err(storage)?;
        info!(id = created.id, nome = %created.nome, "item created");
        Ok(created.id)
    }

    /// Validate and fully replace item `id`. Validation runs first, so an
    /// invalid candidate is reported even when `id` does not exist.
    pub async fn replace(&self, id: ItemId, candidate: ItemCandidate) -> Result<(), CatalogError> {
        let item = validated(candidate)?;
        self.repo
            .update_item(id, item)
            .await
            .map_err(|e| not_found_or_storage(id, e))?;
        info!(id, "item updated");
        Ok(())
    }

    pub async fn delete(&self, id: ItemId) -> Result<(), CatalogError> {
        self.repo
            .delete_item(id)
            .await
            .map_err(|e| not_found_or_storage(id, e))?;
        info!(id, "item deleted");
        Ok(())
    }
}

fn validated(candidate: ItemCandidate) -> Result<NewItem, CatalogError> {
    candidate.validate().map_err(|e| {
        debug!(reason = %e, "item rejected");
        CatalogError::Validation(e)
    })
}

fn storage(e: RepositoryError) -> CatalogError {
    error!(error = %e, "storage failure");
    CatalogError::Storage(e)
}

fn not_found_or_storage(id: ItemId, e: RepositoryError) -> CatalogError {
    match e {
        RepositoryError::NotFound => CatalogError::NotFound(id),
        other => storage(other),
    }
}
