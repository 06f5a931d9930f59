//! Environment configuration

use std::str::FromStr;

use spelling_core::SchedulerConfig;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://spelling_practice.db?mode=rwc";

/// Runtime configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    /// Default size of the review queue
    pub review_limit: usize,
    pub scheduler: SchedulerConfig,
    /// Tracing filter directives, `RUST_LOG` syntax
    pub log_filter: String,
    /// Install the global tracing subscriber during bootstrap
    pub init_tracing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            review_limit: 20,
            scheduler: SchedulerConfig::default(),
            log_filter: "info".to_string(),
            init_tracing: true,
        }
    }
}

impl Config {
    /// Load configuration, reading `.env` first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let scheduler = SchedulerConfig {
            min_practice_count: parse_or(
                "MIN_PRACTICE_COUNT",
                lookup("MIN_PRACTICE_COUNT"),
                defaults.scheduler.min_practice_count,
            ),
            min_accuracy: parse_or(
                "MIN_ACCURACY",
                lookup("MIN_ACCURACY"),
                defaults.scheduler.min_accuracy,
            ),
            min_familiar_level: parse_or(
                "MIN_FAMILIAR_LEVEL",
                lookup("MIN_FAMILIAR_LEVEL"),
                defaults.scheduler.min_familiar_level,
            ),
            ..defaults.scheduler
        };

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                lookup("DATABASE_MAX_CONNECTIONS"),
                defaults.max_connections,
            ),
            review_limit: parse_or("REVIEW_LIMIT", lookup("REVIEW_LIMIT"), defaults.review_limit),
            scheduler,
            log_filter: lookup("RUST_LOG").unwrap_or(defaults.log_filter),
            init_tracing: parse_or("INIT_TRACING", lookup("INIT_TRACING"), defaults.init_tracing),
        }
    }
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {} value {:?}, using default", key, value);
            default
        }),
        None => default,
    }
}
