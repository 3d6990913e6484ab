//! Error types for document assembly.
//!
//! Assembly never returns a partial document: every route and reference
//! problem is collected into a single [`DocsError::Assembly`].

use thiserror::Error;

/// Errors that can occur during document assembly.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to serialize the document to JSON.
    #[error("Failed to serialize Swagger document: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A route cannot be expressed as an operation.
    #[error("Invalid operation '{operation_id}': {reason}")]
    InvalidOperation {
        /// The operation ID that is invalid.
        operation_id: String,
        /// The reason the operation is invalid.
        reason: String,
    },

    /// A route path is not a well-formed template.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The offending path.
        path: String,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A `$ref` points at a definition that does not exist.
    #[error("Dangling reference '{reference}' at {location}")]
    DanglingReference {
        /// The unresolved reference.
        reference: String,
        /// JSON pointer to the `$ref` inside the document.
        location: String,
    },

    /// Two different models claim the same definition name.
    #[error("Definition '{name}' is claimed by more than one model")]
    DuplicateDefinition {
        /// The contested name under `#/definitions/`.
        name: String,
    },

    /// One or more problems found while assembling the document.
    #[error("Document assembly failed with {} error(s): {}", .errors.len(), join_errors(.errors))]
    Assembly {
        /// Every problem, in discovery order.
        errors: Vec<DocsError>,
    },
}

fn join_errors(errors: &[DocsError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;
