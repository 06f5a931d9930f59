//! Spelling practice service layer.
//!
//! Wires the pure scheduling and classification logic from `spelling-core`
//! to SQLite storage, an injected clock and random source, and the external
//! audio and dictionary collaborators.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

use std::sync::{Arc, Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::SeedableRng;
use spelling_core::Scheduler;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::services::clock::{Clock, SystemClock};
use crate::services::external::{Dictionary, Synthesizer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub scheduler: Arc<Scheduler>,
    pub clock: Arc<dyn Clock>,
    pub rng: Arc<Mutex<StdRng>>,
    pub synthesizer: Arc<dyn Synthesizer>,
    pub dictionary: Arc<dyn Dictionary>,
    /// Default size of the review queue
    pub review_limit: usize,
}

impl AppState {
    /// Run `f` with exclusive access to the random source
    pub fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

/// Install the global tracing subscriber. Returns false if one is already set.
fn init_tracing(filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

/// Connect to the configured database and assemble the service state
pub async fn bootstrap(
    config: &Config,
    synthesizer: Arc<dyn Synthesizer>,
    dictionary: Arc<dyn Dictionary>,
) -> anyhow::Result<AppState> {
    if config.init_tracing && !init_tracing(&config.log_filter) {
        tracing::debug!("Tracing subscriber already installed");
    }

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url, config.max_connections).await?;

    tracing::info!("Initializing schema...");
    db.init_schema().await?;

    Ok(AppState {
        db: Arc::new(db),
        scheduler: Arc::new(Scheduler::new(config.scheduler.clone())),
        clock: Arc::new(SystemClock),
        rng: Arc::new(Mutex::new(StdRng::from_entropy())),
        synthesizer,
        dictionary,
        review_limit: config.review_limit,
    })
}
