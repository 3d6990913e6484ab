//! One-stop documentation state for an application.

use tracing::debug;

use routedoc_config::{ConfigLoader, DocsConfig};
use routedoc_core::{Annotator, Definitions, HandlerId, RouteRegistry, RouteSpec};
use routedoc_docs::{RegisteredRoute, Swagger, SwaggerGenerator};

use crate::error::Result;

/// Route metadata, model definitions and document settings for one
/// application.
///
/// Definitions persist between builds, so a model keeps the name it was
/// first registered under for the life of the value.
///
/// # Example
///
/// ```
/// use routedoc::prelude::*;
///
/// struct User;
///
/// impl Model for User {
///     fn fields() -> Vec<(&'static str, Descriptor)> {
///         vec![("id", Descriptor::of::<i64>()), ("name", Descriptor::of::<String>())]
///     }
/// }
///
/// fn get_user() {}
///
/// let mut docs = ApiDocs::new();
/// let handler = docs
///     .annotate_fn(&get_user)?
///     .summary("Fetch a user")
///     .produces([Descriptor::model::<User>()], ProducesOptions::default())
///     .finish();
///
/// let routes = [RegisteredRoute::new("get_user", "/users/<id:int>", [Method::GET], handler)];
/// let swagger = docs.build(&routes)?;
///
/// assert!(swagger.definitions.contains_key("User"));
/// # Ok::<(), routedoc::Error>(())
/// ```
#[derive(Debug)]
pub struct ApiDocs {
    generator: SwaggerGenerator,
    routes: RouteRegistry,
    definitions: Definitions,
}

impl Default for ApiDocs {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiDocs {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self::with_generator(SwaggerGenerator::new())
    }

    /// Create from loaded configuration.
    pub fn from_config(config: &DocsConfig) -> Self {
        Self::with_generator(SwaggerGenerator::from_config(config))
    }

    /// Create from the result of a configuration loader.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if loading or validation fails.
    pub fn load(loader: ConfigLoader) -> Result<Self> {
        let config = loader.load()?;
        Ok(Self::from_config(&config))
    }

    /// Create around a preconfigured generator.
    pub fn with_generator(generator: SwaggerGenerator) -> Self {
        Self {
            generator,
            routes: RouteRegistry::new(),
            definitions: Definitions::new(),
        }
    }

    /// Start annotating `handler`.
    pub fn annotate(&mut self, handler: HandlerId) -> Annotator<'_> {
        self.routes.annotate(handler)
    }

    /// Start annotating the handler function `handler`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Core` for closures and function pointers, which have
    /// no stable identity.
    pub fn annotate_fn<F: 'static>(&mut self, handler: &F) -> Result<Annotator<'_>> {
        let handler = HandlerId::of(handler)?;
        Ok(self.routes.annotate(handler))
    }

    /// The [`RouteSpec`] for `handler`, created with defaults if missing.
    pub fn route_spec(&mut self, handler: &HandlerId) -> &RouteSpec {
        self.routes.get(handler)
    }

    /// Every annotated handler.
    pub fn registry(&self) -> &RouteRegistry {
        &self.routes
    }

    /// Every model registered so far.
    pub fn definitions(&self) -> &Definitions {
        &self.definitions
    }

    /// Assemble the document for `routes`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Docs` with every problem found.
    pub fn build<'r, I>(&mut self, routes: I) -> Result<Swagger>
    where
        I: IntoIterator<Item = &'r RegisteredRoute>,
    {
        let swagger = self
            .generator
            .generate(routes, &self.routes, &mut self.definitions)?;
        debug!(handlers = self.routes.len(), "built document");
        Ok(swagger)
    }

    /// Assemble the document for `routes` as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `Error::Docs` with every problem found.
    pub fn build_json<'r, I>(&mut self, routes: I) -> Result<String>
    where
        I: IntoIterator<Item = &'r RegisteredRoute>,
    {
        Ok(self.build(routes)?.to_json()?)
    }
}
