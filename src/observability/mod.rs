//! Observability and telemetry.
//!
//! Structured logging via `tracing`; filter from `RUST_LOG` when set,
//! otherwise derived from verbosity.

use std::sync::OnceLock;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

static LOGGING_INIT: OnceLock<()> = OnceLock::new();

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// Newline-delimited JSON, for log shippers.
    Json,
}

impl LogFormat {
    /// Parses a format string, defaulting to pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Initializes the global tracing subscriber. Idempotent.
pub fn init(format: LogFormat, verbose: bool) {
    LOGGING_INIT.get_or_init(|| {
        let default_directive = if verbose { "notekeep=debug,info" } else { "info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        match format {
            LogFormat::Pretty => {
                let _ = tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer())
                    .try_init();
            },
            LogFormat::Json => {
                let _ = tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt::layer().json())
                    .try_init();
            },
        }
    });
}
