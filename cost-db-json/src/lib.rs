//! Flat-file item storage: the whole catalog lives in one pretty-printed
//! JSON document that is rewritten on every change.

pub mod factory;
mod file;
pub mod repository;

pub use factory::JsonRepositoryFactory;
pub use repository::JsonFileRepository;
