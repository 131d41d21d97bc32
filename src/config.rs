use invoicepress_store::StoreConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub store: RecordStoreConfig,
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the invoice rows live. The auth token is deliberately absent here:
/// it comes from the environment only, never from a checked-in file.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordStoreConfig {
    pub endpoint_base: String,
    pub doc_id: String,
    pub invoice_table_id: String,
    pub payee_table_id: String,
    pub payee_row_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Concurrent render permits; excess requests wait their turn.
    pub max_concurrent_renders: usize,
    /// Upper bound on the fetch-and-aggregate phase, in milliseconds.
    pub aggregate_deadline_ms: u64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        // Environment variable override first, then the default location.
        if let Ok(path) = std::env::var("INVOICEPRESS_CONFIG") {
            if !path.is_empty() {
                builder = builder.add_source(config::File::with_name(&path));
            } else {
                builder = builder.add_source(config::File::with_name("config/default"));
            }
        } else {
            builder = builder.add_source(config::File::with_name("config/default"));
        }

        // Always layer environment variables on top
        builder =
            builder.add_source(config::Environment::with_prefix("INVOICEPRESS").separator("__"));

        builder.build()?.try_deserialize()
    }

    pub fn store_auth_token() -> String {
        std::env::var("CODA_API_TOKEN").unwrap_or_default()
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            endpoint_base: self.store.endpoint_base.clone(),
            auth_token: Self::store_auth_token(),
            doc_id: self.store.doc_id.clone(),
            invoice_table_id: self.store.invoice_table_id.clone(),
            payee_table_id: self.store.payee_table_id.clone(),
            payee_row_id: self.store.payee_row_id.clone(),
        }
    }
}
