pub mod calculations;
pub mod catalog;
pub mod collation;
pub mod db;
pub mod models;
pub mod seed;

pub use catalog::{Catalog, CatalogError};
pub use db::factory::{DbConfig, RepositoryFactory, RepositoryRegistry};
pub use db::repository::{ItemRepository, RepositoryError};
pub use models::*;
