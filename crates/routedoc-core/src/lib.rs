//! # Routedoc Core
//!
//! Schema engine and documentation registries for routedoc.
//!
//! This crate provides:
//!
//! - [`Field`] - OpenAPI 2.0 schema nodes (primitives, dictionaries, lists,
//!   tuples, object references)
//! - [`resolve`] - turns any [`Descriptor`] into a schema fragment
//! - [`Model`] - explicit field declarations for user object types
//! - [`Definitions`] - shared model definitions referenced via `$ref`
//! - [`RouteRegistry`] - per-handler documentation built from stacked
//!   annotations
//!
//! ## Example
//!
//! ```
//! use routedoc_core::{resolve, Definitions, Descriptor, Model};
//! use serde_json::json;
//!
//! struct User;
//!
//! impl Model for User {
//!     fn fields() -> Vec<(&'static str, Descriptor)> {
//!         vec![("id", Descriptor::of::<i64>()), ("name", Descriptor::of::<String>())]
//!     }
//! }
//!
//! let mut definitions = Definitions::new();
//! let fragment = resolve(&Descriptor::model::<User>(), &mut definitions);
//!
//! assert_eq!(serde_json::Value::Object(fragment), json!({"$ref": "#/definitions/User"}));
//! assert_eq!(definitions.len(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/routedoc-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod definitions;
mod error;
pub mod field;
mod handler;
pub mod model;
pub mod resolve;
pub mod route;

pub use definitions::{Definition, Definitions};
pub use error::{CoreError, CoreResult};
pub use field::{Field, FieldAttrs, FieldKind, FieldType, Fragment, Location};
pub use handler::HandlerId;
pub use model::{Describe, Model, ModelRef};
pub use resolve::{resolve, Descriptor, Primitive, TypeRef};
pub use route::{
    Annotator, DeclaredResponse, Payload, ProducesOptions, RouteOptions, RouteRegistry, RouteSpec,
};
