//! # Routedoc
//!
//! **Swagger 2.0 documents from annotated routes and declared models**
//!
//! Routedoc builds an API document out of three things the host application
//! already has or can cheaply declare:
//!
//! - **Models** – structs list their fields once through [`Model`]; each
//!   becomes a shared definition referenced via `$ref`
//! - **Annotations** – stacked per-handler calls (summary, tags, consumes,
//!   produces, headers, responses, hide) recorded in a route registry
//! - **Routes** – the host router's table of paths, methods and handlers
//!
//! ## Quick Start
//!
//! ```
//! use routedoc::prelude::*;
//!
//! struct User;
//!
//! impl Model for User {
//!     fn fields() -> Vec<(&'static str, Descriptor)> {
//!         vec![("id", Descriptor::of::<i64>()), ("name", Descriptor::of::<String>())]
//!     }
//! }
//!
//! # fn main() -> routedoc::Result<()> {
//! let mut docs = ApiDocs::new();
//! let handler = HandlerId::new("users.get")?;
//! docs.annotate(handler.clone())
//!     .summary("Fetch a user")
//!     .tag("users")
//!     .produces([Descriptor::model::<User>()], ProducesOptions::default());
//!
//! let routes = [RegisteredRoute::new("get_user", "/users/<id:int>", [Method::GET], handler)];
//! let json = docs.build_json(&routes)?;
//!
//! assert!(json.contains("\"$ref\": \"#/definitions/User\""));
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! ```text
//! routedoc-core    Field model, resolver, definition and route registries
//! routedoc-config  Layered configuration (defaults → file → environment)
//! routedoc-docs    Swagger document types and assembly
//! ```

#![doc(html_root_url = "https://docs.rs/routedoc/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod docs;
mod error;
pub mod logging;

// Re-export the workspace crates
pub use routedoc_config as config;
pub use routedoc_core as core;
pub use routedoc_docs as document;

pub use docs::ApiDocs;
pub use error::{Error, Result, TelemetryError};
pub use routedoc_core::{Describe, Descriptor, Field, Model};

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```
/// use routedoc::prelude::*;
/// ```
pub mod prelude {
    pub use crate::docs::ApiDocs;
    pub use crate::error::{Error, Result};

    pub use routedoc_core::{
        Annotator, Definitions, Describe, Descriptor, Field, FieldKind, HandlerId, Location,
        Model, ModelRef, Primitive, ProducesOptions, RouteOptions, RouteRegistry, TypeRef,
    };

    pub use routedoc_config::{ConfigLoader, DocsConfig, UriFilter};

    pub use routedoc_docs::{RegisteredRoute, Swagger, SwaggerGenerator};

    pub use http::Method;
}
