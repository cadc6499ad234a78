//! Logging and timing for the Chrome Web Store tools
//!
//! - Structured logging with `tracing`, compact or JSON
//! - A per-process session ID for correlating log lines
//! - Timers that log how long an operation took
//!
//! Logs always go to stderr so that stdout stays machine readable.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::io;
use std::time::{Duration, Instant};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use uuid::Uuid;

/// Global session ID for correlating logs
static SESSION_ID: Lazy<String> = Lazy::new(|| Uuid::new_v4().to_string());

/// Filter used by `--verbose`
const VERBOSE_FILTER: &str = "warn,cws=debug,cws_api_client=debug";

/// Initialize the global subscriber
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init(config: TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| anyhow::anyhow!("Invalid log filter {:?}: {}", config.log_level, e))?;

    let json_layer = config.json.then(|| {
        fmt::layer()
            .json()
            .with_target(config.show_target)
            .with_writer(io::stderr)
    });
    let text_layer = (!config.json).then(|| {
        fmt::layer()
            .compact()
            .with_target(config.show_target)
            .with_writer(io::stderr)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    tracing::debug!(
        session_id = %session_id(),
        version = env!("CARGO_PKG_VERSION"),
        "Telemetry initialized"
    );

    Ok(())
}

/// Get the current session ID
pub fn session_id() -> &'static str {
    &SESSION_ID
}

/// Telemetry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON lines instead of compact text
    pub json: bool,
    /// Include the module target in each line
    pub show_target: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            json: false,
            show_target: false,
        }
    }
}

impl TelemetryConfig {
    /// Warnings only, or debug output from the tools when `verbose`
    pub fn for_verbosity(verbose: bool) -> Self {
        if verbose {
            Self {
                log_level: VERBOSE_FILTER.to_string(),
                show_target: true,
                ..Self::default()
            }
        } else {
            Self::default()
        }
    }

    /// Builder-style method to switch to JSON lines
    #[must_use]
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// Timer for measuring operation duration
#[derive(Debug)]
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
        }
    }

    /// Time elapsed so far
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop the timer and log the duration
    pub fn stop(self) -> Duration {
        let duration = self.start.elapsed();
        tracing::debug!(
            operation = %self.name,
            duration_ms = duration.as_millis(),
            "Timer completed"
        );
        duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_verbosity() {
        assert_eq!(TelemetryConfig::for_verbosity(false), TelemetryConfig::default());

        let verbose = TelemetryConfig::for_verbosity(true);
        assert!(verbose.log_level.contains("cws=debug"));
        assert!(verbose.show_target);
        assert!(!verbose.json);
        assert!(TelemetryConfig::default().with_json(true).json);
    }

    #[test]
    fn test_verbose_filter_parses() {
        assert!(EnvFilter::try_new(VERBOSE_FILTER).is_ok());
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start("upload");
        std::thread::sleep(Duration::from_millis(10));
        assert!(timer.elapsed() >= Duration::from_millis(10));
        let duration = timer.stop();
        assert!(duration.as_millis() >= 10);
    }

    #[test]
    fn test_session_id() {
        let id = session_id();
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(id, session_id());
    }
}
