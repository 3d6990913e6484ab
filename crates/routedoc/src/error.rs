//! Error types for the facade crate.

use thiserror::Error;

use routedoc_config::ConfigError;
use routedoc_core::CoreError;
use routedoc_docs::DocsError;

/// Errors that can occur while setting up logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize logging.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),
}

/// Any error routedoc can return.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A handler identity is unusable.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The document could not be assembled.
    #[error(transparent)]
    Docs(#[from] DocsError),

    /// Logging could not be initialized.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

/// Result type for routedoc operations.
pub type Result<T> = std::result::Result<T, Error>;
