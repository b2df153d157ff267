use std::sync::Arc;

use cost_core::Catalog;
use cost_core::calculations::CalculationSheet;
use tokio::sync::Mutex;

use crate::error::ApiError;

/// Shared by every request: the catalog and the one calculation sheet that
/// lives as long as the server.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub sheet: Arc<Mutex<CalculationSheet>>,
}

impl AppState {
    /// Wrap `catalog` and prime the sheet with its current items.
    pub async fn new(catalog: Catalog) -> Result<Self, ApiError> {
        let items = catalog.list().await?;
        Ok(Self {
            catalog: Arc::new(catalog),
            sheet: Arc::new(Mutex::new(CalculationSheet::with_catalog(items))),
        })
    }

    /// Reload the sheet's catalog snapshot from storage.
    pub async fn refresh_sheet_catalog(&self) -> Result<(), ApiError> {
        let items = self.catalog.list().await?;
        self.sheet.lock().await.load_catalog(items);
        Ok(())
    }
}
