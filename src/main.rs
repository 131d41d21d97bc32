use invoicepress::{build_router, config::Config, state::AppState};
use invoicepress_render::{LopdfEngine, RenderEngine};
use invoicepress_store::{CodaStore, RecordStore};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting invoice service...");

    let config = Config::load()?;
    tracing::info!("Configuration loaded");

    let store = CodaStore::new(config.store_config())?;
    let store: Arc<dyn RecordStore> = Arc::new(store);

    let engine: Arc<dyn RenderEngine> = Arc::new(LopdfEngine::new());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = build_router(AppState::new(store, engine, config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Invoice service listening on {}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  - GET /invoice?row=<id>");
    tracing::info!("  - GET /health");

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,invoicepress=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
