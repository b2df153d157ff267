use anyhow::{Context, Result};
use axum::Router;
use axum::extract::DefaultBodyLimit;
use cost_core::Catalog;
use cost_core::db::RepositoryRegistry;
use cost_db_json::JsonRepositoryFactory;
use cost_db_sqlite::SqliteRepositoryFactory;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api;
use crate::config::Config;
use crate::state::AppState;

/// Every storage backend this binary can open.
pub fn build_registry() -> RepositoryRegistry {
    let mut registry = RepositoryRegistry::new();
    registry.register(Box::new(JsonRepositoryFactory));
    registry.register(Box::new(SqliteRepositoryFactory));
    registry
}

pub async fn build_state(config: &Config) -> Result<AppState> {
    let db_config = config.db_config();
    let repo = build_registry()
        .create(&db_config)
        .await
        .with_context(|| {
            format!(
                "Failed to open {} store: {}",
                db_config.backend, db_config.connection_string
            )
        })?;
    info!(backend = %db_config.backend, db = %db_config.connection_string, "catalog opened");

    AppState::new(Catalog::new(repo))
        .await
        .context("Failed to read the catalog")
}

/// The JSON API under `/api`, plus the presentation files for every other
/// path when a static directory is configured.
pub fn router(state: AppState, config: &Config) -> Router {
    let app = Router::new().nest("/api", api::router());

    let app = match &config.static_dir {
        Some(dir) => app.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        ),
        None => app.fallback(api::not_found),
    };

    app.layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
