//! Application configuration.
//!
//! Everything is settable from the environment (or a `.env` file) as well as
//! the command line, the same knobs the browser build hard-coded.

use std::{path::PathBuf, time::Duration};

use clap::Args;
use jiff::SignedDuration;
use rust_decimal::Decimal;

/// Storefront configuration.
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// REST API base URL.
    #[arg(
        long,
        env = "KOTSELL_API_URL",
        default_value = "http://localhost:8082/api"
    )]
    pub api_url: String,

    /// Per-request timeout in seconds. No request outlives this budget.
    #[arg(long, env = "KOTSELL_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    pub request_timeout_secs: u64,

    /// Product cache freshness window in seconds.
    #[arg(long, env = "KOTSELL_CACHE_TTL_SECS", default_value_t = 300)]
    pub cache_ttl_secs: u32,

    /// Flat shipping fee in pesos.
    #[arg(long, env = "KOTSELL_SHIPPING_FEE", default_value = "50")]
    pub shipping_fee: Decimal,

    /// File the session state persists to between invocations.
    #[arg(
        long,
        env = "KOTSELL_SESSION_FILE",
        default_value = ".kotsell-session.json"
    )]
    pub session_file: PathBuf,

    /// Log filter, e.g. `info` or `kotsell_app=debug`.
    #[arg(long, env = "KOTSELL_LOG", default_value = "info")]
    pub log_filter: String,
}

impl AppConfig {
    /// The request timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// The cache freshness window as a [`SignedDuration`].
    pub fn cache_ttl(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::from(self.cache_ttl_secs))
    }
}
