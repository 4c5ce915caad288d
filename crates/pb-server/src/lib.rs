//! Postboard server wiring
//!
//! Builds the service context and the HTTP application from configuration.
//! The binary in `main.rs` adds logging, the listener and shutdown handling.

use std::sync::Arc;

use axum::Router;
use pb_api::AppState;
use pb_attachments::{AttachmentManager, LocalStorage, Storage};
use pb_contracts::posts::PictureRules;
use pb_core::config::AppConfig;
use pb_db::{Database, DynPostRepository, MemoryPostRepository, PgPostRepository};
use pb_services::ServiceContext;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

/// Open the post repository named by the configuration
///
/// Without a database URL posts live in memory for the lifetime of the
/// process.
pub async fn connect_repository(config: &AppConfig) -> anyhow::Result<DynPostRepository> {
    match &config.database.url {
        Some(url) => {
            let db = Database::connect(url, &config.database).await?;
            let repo = PgPostRepository::new(db);
            repo.ensure_schema().await?;
            info!("Connected to database");
            Ok(Arc::new(repo))
        }
        None => {
            warn!("DATABASE_URL not set, keeping posts in memory");
            Ok(Arc::new(MemoryPostRepository::new()))
        }
    }
}

/// Local storage rooted at the configured public disk, created if missing
pub async fn open_storage(config: &AppConfig) -> anyhow::Result<Arc<dyn Storage>> {
    tokio::fs::create_dir_all(&config.storage.local_path).await?;
    info!(path = %config.storage.local_path, "Serving pictures from local storage");
    Ok(Arc::new(LocalStorage::new(&config.storage.local_path)))
}

pub fn service_context(
    config: &AppConfig,
    repository: DynPostRepository,
    storage: Arc<dyn Storage>,
) -> ServiceContext {
    ServiceContext::new(
        repository,
        Arc::new(AttachmentManager::from_config(storage, &config.storage)),
        PictureRules::from_config(&config.storage),
    )
}

/// Build the application router
pub fn build_router(config: &AppConfig, services: ServiceContext) -> Router {
    pb_api::router(AppState::new(services, config)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
    )
}
