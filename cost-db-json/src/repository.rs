use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cost_core::{Item, ItemId, ItemRepository, NewItem, RepositoryError};
use tokio::sync::Mutex;
use tracing::info;

use crate::file::CatalogFile;

/// Item storage backed by a single JSON file.
///
/// The catalog is held in memory and every mutation rewrites the whole file.
/// The in-memory copy only changes after the write succeeds, so a failed
/// write leaves both the file and later reads at the previous state.
pub struct JsonFileRepository {
    path: PathBuf,
    state: Mutex<CatalogFile>,
}

impl JsonFileRepository {
    /// Load `path`, or seed the default catalog and write it if the file
    /// does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();
        let state = match CatalogFile::load(&path).await? {
            Some(file) => file,
            None => {
                let file = CatalogFile::seeded();
                file.write(&path).await?;
                info!(path = %path.display(), count = file.items.len(), "seeded default catalog");
                file
            }
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Apply `change` to a copy of the catalog, persist it, then publish it.
    async fn commit<T>(
        &self,
        change: impl FnOnce(&mut CatalogFile) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let out = change(&mut next)?;
        next.write(&self.path).await?;
        *state = next;
        Ok(out)
    }
}

#[async_trait]
impl ItemRepository for JsonFileRepository {
    async fn list_items(&self) -> Result<Vec<Item>, RepositoryError> {
        Ok(self.state.lock().await.items.clone())
    }

    async fn get_item(
        &self,
        id: ItemId,
    ) -> Result<Item, RepositoryError> {
        self.state
            .lock()
            .await
            .items
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn create_item(
        &self,
        item: NewItem,
    ) -> Result<Item, RepositoryError> {
        self.commit(|file| {
            let item = Item::from_new(file.next_id, item);
            file.next_id += 1;
            file.items.push(item.clone());
            Ok(item)
        })
        .await
    }

    async fn update_item(
        &self,
        id: ItemId,
        item: NewItem,
    ) -> Result<Item, RepositoryError> {
        self.commit(|file| {
            let slot = file
                .items
                .iter_mut()
                .find(|existing| existing.id == id)
                .ok_or(RepositoryError::NotFound)?;
            *slot = Item::from_new(id, item);
            Ok(slot.clone())
        })
        .await
    }

    async fn delete_item(
        &self,
        id: ItemId,
    ) -> Result<(), RepositoryError> {
        self.commit(|file| {
            let index = file
                .items
                .iter()
                .position(|item| item.id == id)
                .ok_or(RepositoryError::NotFound)?;
            file.items.remove(index);
            Ok(())
        })
        .await
    }
}
