use anyhow::{anyhow, Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use stockchecker::likes::{DEFAULT_COLLECTION_NAME, DEFAULT_DATABASE_NAME, DEFAULT_URI};
use stockchecker::quotes::DEFAULT_BASE_URL;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoreBackend {
    MongoDB,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "mongodb" => Ok(StoreBackend::MongoDB),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(anyhow!("Unknown STORE_BACKEND: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub quote_base_url: Url,
    pub quote_timeout: Duration,
    pub store_backend: StoreBackend,
    pub mongo_uri: String,
    pub mongo_database: String,
    pub mongo_collection: String,
    pub store_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let server_port = value("SERVER_PORT", "8080")
            .parse::<u16>()
            .context("Failed to parse SERVER_PORT")?;

        let quote_base_url = Url::parse(&value("QUOTE_BASE_URL", DEFAULT_BASE_URL))
            .context("Failed to parse QUOTE_BASE_URL")?;

        let quote_timeout = value("QUOTE_TIMEOUT_SECONDS", "10")
            .parse::<u64>()
            .map(Duration::from_secs)
            .context("Failed to parse QUOTE_TIMEOUT_SECONDS")?;

        let store_backend = value("STORE_BACKEND", "mongodb").parse::<StoreBackend>()?;

        let store_timeout = value("STORE_TIMEOUT_SECONDS", "10")
            .parse::<u64>()
            .map(Duration::from_secs)
            .context("Failed to parse STORE_TIMEOUT_SECONDS")?;

        Ok(Config {
            server_port,
            quote_base_url,
            quote_timeout,
            store_backend,
            mongo_uri: value("MONGO_URI", DEFAULT_URI),
            mongo_database: value("MONGO_DATABASE", DEFAULT_DATABASE_NAME),
            mongo_collection: value("MONGO_COLLECTION", DEFAULT_COLLECTION_NAME),
            store_timeout,
        })
    }
}
