mod config;
mod errors;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, StoreKind};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InMemoryStore, JsonFileStore, MessageStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting portfolio API v{}", env!("CARGO_PKG_VERSION"));

    let store = open_store(&config).await?;

    if !config.resume_path.is_file() {
        warn!(
            "Resume file {} not found; /api/resume will return 500",
            config.resume_path.display()
        );
    }

    let state = AppState::new(&config, store);

    if let Some(dir) = &config.static_dir {
        info!("Serving static site from {}", dir.display());
    }

    // Build router
    let app = build_router(state, config.static_dir.as_deref())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn open_store(config: &Config) -> Result<Arc<dyn MessageStore>> {
    let store: Arc<dyn MessageStore> = match config.store_kind {
        StoreKind::Memory => {
            info!("Using in-memory contact store");
            Arc::new(InMemoryStore::new())
        }
        StoreKind::File => {
            let store = JsonFileStore::open(&config.store_path).await?;
            info!("Using file contact store at {}", store.path().display());
            Arc::new(store)
        }
    };
    let existing = store.list().await?.len();
    info!("Contact store holds {existing} messages");
    Ok(store)
}
