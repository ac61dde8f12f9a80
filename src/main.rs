use std::path::PathBuf;
use std::sync::Arc;

use tower_http::services::ServeDir;
use tracing::info;
use tracing_subscriber::EnvFilter;

use urban_abode::config::{Config, StoreBackend};
use urban_abode::routes::{self, AppState};
use urban_abode::store::{ListingStore, MemoryStore, RestStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🏠 UrbanAbode listing service");

    let config = Config::from_env();
    let store: Arc<dyn ListingStore> = match &config.store {
        StoreBackend::Rest { url, api_key } => Arc::new(RestStore::new(url, api_key)?),
        StoreBackend::Memory { seed: true } => Arc::new(MemoryStore::seeded()),
        StoreBackend::Memory { seed: false } => Arc::new(MemoryStore::new()),
    };
    info!("using {} listing store", store.backend_name());

    let static_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static");
    let app = routes::router(AppState { store }).nest_service("/static", ServeDir::new(static_dir));

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    info!("listening on {}", config.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
