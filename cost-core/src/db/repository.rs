use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Item, ItemId, NewItem};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Persistence for catalog items.
///
/// Implementations hand out ids that are strictly increasing and never reused,
/// and only report success once the change is durable.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Every item, in insertion order.
    async fn list_items(&self) -> Result<Vec<Item>, RepositoryError>;

    async fn get_item(&self, id: ItemId) -> Result<Item, RepositoryError>;

    async fn create_item(&self, item: NewItem) -> Result<Item, RepositoryError>;

    /// Replace every field of an existing item, keeping its id.
    async fn update_item(&self, id: ItemId, item: NewItem) -> Result<Item, RepositoryError>;

    async fn delete_item(&self, id: ItemId) -> Result<(), RepositoryError>;
}
