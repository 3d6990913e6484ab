//! # Routedoc Config
//!
//! Layered configuration for document generation.
//!
//! Configuration is loaded in order, later layers overriding earlier ones:
//!
//! 1. **Defaults** - sensible values for every option
//! 2. **File** - TOML or JSON
//! 3. **Environment** - `PREFIX__SECTION__KEY` variables
//!
//! ## Example
//!
//! ```
//! use routedoc_config::{ConfigLoader, UriFilter};
//!
//! let config = ConfigLoader::new()
//!     .with_string("[document]\nbase_path = \"/v2\"\nuri_filter = \"all\"", "toml")
//!     .unwrap()
//!     .load()
//!     .unwrap();
//!
//! assert_eq!(config.document.base_path.as_deref(), Some("/v2"));
//! assert_eq!(config.document.uri_filter, UriFilter::All);
//! ```
//!
//! Unknown keys are rejected so typos surface at load time.

#![doc(html_root_url = "https://docs.rs/routedoc-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;

pub use config::{
    DocsConfig, DocumentConfig, InfoConfig, LogFormat, LoggingConfig, SecurityScheme, UriFilter,
};
pub use error::ConfigError;
pub use loader::ConfigLoader;
