use lifeswitch::config::{AppConfig, StorageKind};
use lifeswitch::db::{JsonFileStore, MemoryStore, Persistence};
use lifeswitch::engine::Engine;
use lifeswitch::services::catalog::PlanCatalog;
use lifeswitch::state::{AppState, SharedState};
use lifeswitch::web;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // A catalog gap is a deployment defect: refuse to start.
    let catalog = match &config.catalog_path {
        Some(path) => PlanCatalog::from_json_file(path),
        None => PlanCatalog::builtin(),
    }
    .map_err(|e| {
        tracing::error!("Plan catalog is invalid: {}", e);
        e
    })?;
    tracing::info!("Plan catalog ready with {} templates", catalog.len());

    let backend: Arc<dyn Persistence> = match config.storage {
        StorageKind::File => {
            let store = JsonFileStore::open(&config.data_dir).map_err(|e| {
                tracing::error!("Failed to open data dir {}: {}", config.data_dir.display(), e);
                e
            })?;
            tracing::info!("Storing state in {}", store.dir().display());
            Arc::new(store)
        }
        StorageKind::Memory => {
            tracing::warn!("In-memory storage selected: state is lost on exit");
            Arc::new(MemoryStore::new())
        }
    };

    let engine = Engine::load(backend, Arc::new(catalog));
    let shared: SharedState = Arc::new(AppState::new(engine));

    let app = web::routes(shared.clone())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("Listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let mut engine = shared.engine.write().await;
    if engine.has_unsaved_changes() {
        tracing::info!("Flushing unsaved changes before exit");
        if let Err(e) = engine.flush() {
            tracing::error!("Final flush failed: {}", e);
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
