use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{Context, Result};
use dotenvy::dotenv;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_file_size: usize,
    pub sample_rows: usize,
    pub store_capacity: usize,
    pub external_namespace: String,
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_file_size: default_max_file_size(),
            sample_rows: 5,
            store_capacity: 1000,
            external_namespace: "Flume".to_string(),
            seed: None,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();

        let defaults = Config::default();

        Ok(Config {
            bind_addr: env_or("BIND_ADDR", defaults.bind_addr)?,
            max_file_size: env_or("MAX_FILE_SIZE", defaults.max_file_size)?,
            sample_rows: env_or("SAMPLE_ROWS", defaults.sample_rows)?,
            store_capacity: env_or("STORE_CAPACITY", defaults.store_capacity)?,
            external_namespace: std::env::var("EXTERNAL_MODEL_NAMESPACE")
                .unwrap_or(defaults.external_namespace),
            seed: env_opt("ANALYSIS_SEED")?,
        })
    }
}

fn env_opt<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("Failed to parse {}={:?}", key, raw)),
        Err(_) => Ok(None),
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    Ok(env_opt(key)?.unwrap_or(default))
}
