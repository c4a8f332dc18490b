//! Subscriber setup for binaries embedding viewcfg.
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the application.
//!
//! - `RUST_LOG`: standard filter (e.g. `info`, `viewcfg_runtime=debug`)
//! - `LOG_FORMAT`: `pretty` (default), `compact` or `json`

use std::env;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// Single-line output
    Compact,
    Json,
}

impl LogFormat {
    /// Unknown names fall back to `Pretty`
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "compact" => LogFormat::Compact,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    /// Used when `RUST_LOG` is not set
    pub default_level: String,
    pub include_target: bool,
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            default_level: "info".to_string(),
            include_target: true,
            ansi: true,
        }
    }
}

impl LogConfig {
    /// Read `LOG_FORMAT` and `LOG_LEVEL`
    pub fn from_env() -> Self {
        Self {
            format: env::var("LOG_FORMAT")
                .map(|s| LogFormat::parse(&s))
                .unwrap_or_default(),
            default_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            ..Default::default()
        }
    }

    pub fn with_default_level(mut self, level: impl Into<String>) -> Self {
        self.default_level = level.into();
        self
    }
}

/// Install a global fmt subscriber writing to stderr.
///
/// Fails when a global subscriber is already set.
pub fn init_logging(config: LogConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.default_level));
    let registry = tracing_subscriber::registry().with(env_filter);

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.include_target)
        .with_ansi(config.ansi);

    match config.format {
        LogFormat::Json => registry.with(layer.json()).try_init()?,
        LogFormat::Compact => registry.with(layer.compact()).try_init()?,
        LogFormat::Pretty => registry.with(layer.pretty()).try_init()?,
    }
    Ok(())
}
