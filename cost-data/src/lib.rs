pub mod loader;

pub use loader::{ItemLoader, ItemLoaderError, ItemRecord, LoadSummary};
