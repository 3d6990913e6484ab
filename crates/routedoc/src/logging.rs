//! Structured logging setup.
//!
//! Document assembly reports through `tracing`: definitions registered and
//! routes annotated at `debug`, each documented route at `trace`, skipped
//! routes and field name collisions at `warn`, and one `info` event per
//! assembled document. This module installs a subscriber for them.
//!
//! # Example
//!
//! ```no_run
//! use routedoc::logging::init_logging;
//! use routedoc::config::{LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig {
//!     level: "routedoc_docs=debug,info".to_string(),
//!     format: LogFormat::Json,
//!     ..LoggingConfig::default()
//! };
//! init_logging(&config)?;
//! # Ok::<(), routedoc::TelemetryError>(())
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use routedoc_config::{LogFormat, LoggingConfig};

use crate::error::TelemetryError;

/// Initializes the global logging subscriber.
///
/// Does nothing when logging is disabled.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` if the level directive is invalid or
/// a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;

    match config.format {
        LogFormat::Json => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_filter(filter);

            tracing_subscriber::registry()
                .with(fmt_layer)
                .try_init()
                .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
        }
        LogFormat::Pretty => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .pretty()
                .with_target(true)
                .with_filter(filter);

            tracing_subscriber::registry()
                .with(fmt_layer)
                .try_init()
                .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
        }
    }
}

/// Creates an env filter from a directive string such as
/// `"info"` or `"routedoc_core=debug,warn"`.
///
/// # Errors
///
/// Returns error if the filter string is invalid.
pub fn create_env_filter(filter: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(filter)
        .map_err(|e| TelemetryError::LoggingInit(format!("Invalid log level: {e}")))
}
