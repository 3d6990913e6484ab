//! # Routedoc Docs
//!
//! Swagger 2.0 document assembly.
//!
//! This crate provides:
//! - **[`SwaggerGenerator`]** - walks the host's routes and turns each
//!   handler's annotations into an operation
//! - **Document types** - [`Swagger`] and friends, serializable to JSON
//! - **Path conversion** - `<id:int>` host templates become `{id}` with a
//!   typed path parameter
//!
//! ## Quick Start
//!
//! ```
//! use http::Method;
//! use routedoc_core::{Definitions, Descriptor, HandlerId, Model, ProducesOptions, RouteRegistry};
//! use routedoc_docs::{RegisteredRoute, SwaggerGenerator};
//!
//! struct Pet;
//!
//! impl Model for Pet {
//!     fn fields() -> Vec<(&'static str, Descriptor)> {
//!         vec![("name", Descriptor::of::<String>())]
//!     }
//! }
//!
//! let mut registry = RouteRegistry::new();
//! let handler = HandlerId::new("pets.get").unwrap();
//! registry
//!     .annotate(handler.clone())
//!     .tag("pets")
//!     .produces([Descriptor::model::<Pet>()], ProducesOptions::default());
//!
//! let routes = vec![RegisteredRoute::new("get_pet", "/pets/<id:int>", [Method::GET], handler)];
//! let mut definitions = Definitions::new();
//! let json = SwaggerGenerator::new()
//!     .title("Pet Store")
//!     .generate_json(&routes, &registry, &mut definitions)
//!     .unwrap();
//!
//! assert!(json.contains("#/definitions/Pet"));
//! assert!(json.contains("/pets/{id}"));
//! ```

#![doc(html_root_url = "https://docs.rs/routedoc-docs/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod generator;
mod parameters;
mod path;
mod route;
mod swagger;

pub use error::{DocsError, DocsResult};
pub use generator::SwaggerGenerator;
pub use path::{PathParamKind, PathParameter, PathTemplate};
pub use route::RegisteredRoute;
pub use swagger::{Contact, Info, License, Operation, PathItem, Response, Swagger, Tag};
