use crate::config::Config;
use invoicepress_render::RenderEngine;
use invoicepress_store::RecordStore;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Shared application state accessible to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Record store the invoice data is fetched from
    pub store: Arc<dyn RecordStore>,

    /// Rendering engine behind the conduit boundary
    pub engine: Arc<dyn RenderEngine>,

    /// Limits concurrent render work to keep memory bounded
    pub render_semaphore: Arc<Semaphore>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, engine: Arc<dyn RenderEngine>, config: Config) -> Self {
        let render_semaphore = Arc::new(Semaphore::new(config.limits.max_concurrent_renders));

        Self {
            store,
            engine,
            render_semaphore,
            config: Arc::new(config),
        }
    }
}
