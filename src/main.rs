use anyhow::Result;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::sync::Arc;

mod config;
mod error;
mod logging;
mod models;
mod routes;
mod services;

use services::analysis::{random::seeded_or_entropy, CsvAnalyzer};
use services::store::{AnalysisStore, MemoryStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = config::Config::new()?;
    let addr = config.bind_addr;
    if config.seed.is_some() {
        tracing::info!("Analysis randomness is seeded; results are reproducible");
    }

    // Build our application state
    let state = Arc::new(AppState::new(config));
    let app = routes::app(state);

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// Application state
pub struct AppState {
    config: config::Config,
    store: Arc<dyn AnalysisStore>,
    analyzer: CsvAnalyzer,
    rng: Mutex<StdRng>,
}

impl AppState {
    fn new(config: config::Config) -> Self {
        let store = Arc::new(MemoryStore::new(config.store_capacity));
        Self::with_store(config, store)
    }

    fn with_store(config: config::Config, store: Arc<dyn AnalysisStore>) -> Self {
        Self {
            analyzer: CsvAnalyzer::new(config.external_namespace.clone()),
            rng: Mutex::new(seeded_or_entropy(config.seed)),
            store,
            config,
        }
    }

    /// A generator for one request, seeded from the shared source. The
    /// shared lock is only held for the single draw.
    fn request_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.rng.lock().next_u64())
    }
}
