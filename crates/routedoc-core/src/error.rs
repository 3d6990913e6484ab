//! Error types for the schema core.
//!
//! The resolver itself never fails; unknown descriptors fall back to an
//! empty fragment. The only caller errors surfaced here concern handler
//! identities that cannot serve as registry keys.

use thiserror::Error;

/// Errors raised by the schema core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A handler identity is not stable enough to key the route registry.
    #[error("Handler identity '{name}' is not a stable key: {reason}")]
    UnstableHandlerIdentity {
        /// The offending identity.
        name: String,
        /// Why the identity was rejected.
        reason: String,
    },
}

impl CoreError {
    /// Create a new unstable handler identity error.
    pub fn unstable_handler(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnstableHandlerIdentity {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
