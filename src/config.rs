/// Runtime configuration, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub store: StoreBackend,
}

#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// Hosted REST datastore: base URL plus API key.
    Rest { url: String, api_key: String },
    /// In-memory store for local development, optionally pre-seeded.
    Memory { seed: bool },
}

impl Config {
    pub fn from_env() -> Self {
        let bind = std::env::var("ABODE_BIND").unwrap_or_else(|_| "0.0.0.0:4000".to_string());
        let store = match std::env::var("ABODE_STORE_URL") {
            Ok(url) => StoreBackend::Rest {
                url,
                api_key: std::env::var("ABODE_STORE_KEY").unwrap_or_default(),
            },
            Err(_) => StoreBackend::Memory {
                seed: std::env::var("ABODE_SEED").map(|v| v != "0").unwrap_or(true),
            },
        };
        Self { bind, store }
    }
}
