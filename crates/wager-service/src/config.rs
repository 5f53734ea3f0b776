//! Service configuration.

use std::str::FromStr;
use std::time::Duration;

use wager_core::BetSumMode;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Path to `RocksDB` data directory (default: "/data/wager").
    pub data_dir: String,

    /// Run mode. `development` turns on debug logging by default.
    pub mode: String,

    /// Seconds between write-behind flush passes.
    pub flush_interval_seconds: u64,

    /// Upper bound on the HTTP drain after the final flush.
    pub shutdown_grace_seconds: u64,

    /// Limit for each bootstrap store call.
    pub bootstrap_timeout_seconds: u64,

    /// How bets are folded into `bet_sum`.
    pub bet_sum_mode: BetSumMode,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup. Missing or unparseable values
    /// fall back to the defaults.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str, default| parse_or(lookup(key), key, default);

        Self {
            listen_addr: lookup("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            data_dir: lookup("DATA_DIR").unwrap_or(defaults.data_dir),
            mode: lookup("MODE").unwrap_or(defaults.mode),
            flush_interval_seconds: parsed(
                "FLUSH_INTERVAL_SECONDS",
                defaults.flush_interval_seconds,
            ),
            shutdown_grace_seconds: parsed(
                "SHUTDOWN_GRACE_SECONDS",
                defaults.shutdown_grace_seconds,
            ),
            bootstrap_timeout_seconds: parsed(
                "BOOTSTRAP_TIMEOUT_SECONDS",
                defaults.bootstrap_timeout_seconds,
            ),
            bet_sum_mode: parse_or(lookup("BET_SUM_MODE"), "BET_SUM_MODE", defaults.bet_sum_mode),
            cors_origins: lookup("CORS_ORIGINS").map_or(defaults.cors_origins, |s| {
                s.split(',').map(|o| o.trim().to_string()).collect()
            }),
            max_body_bytes: parse_or(
                lookup("MAX_BODY_BYTES"),
                "MAX_BODY_BYTES",
                defaults.max_body_bytes,
            ),
            request_timeout_seconds: parsed(
                "REQUEST_TIMEOUT_SECONDS",
                defaults.request_timeout_seconds,
            ),
        }
    }

    /// Whether the service runs in development mode.
    #[must_use]
    pub fn is_development(&self) -> bool {
        self.mode.eq_ignore_ascii_case("development")
    }

    /// Period between flush passes, at least one second.
    #[must_use]
    pub fn flush_interval(&self) -> Duration {
        Duration::from_secs(self.flush_interval_seconds.max(1))
    }

    /// Bound on the HTTP drain at shutdown.
    #[must_use]
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_seconds)
    }

    /// Limit for each bootstrap store call.
    #[must_use]
    pub fn bootstrap_timeout(&self) -> Duration {
        Duration::from_secs(self.bootstrap_timeout_seconds)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> T {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparseable setting, using default");
            default
        }),
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            data_dir: "/data/wager".into(),
            mode: "production".into(),
            flush_interval_seconds: 10,
            shutdown_grace_seconds: 5,
            bootstrap_timeout_seconds: 30,
            bet_sum_mode: BetSumMode::Gross,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
