//! Route documentation metadata.
//!
//! Each route handler owns one [`RouteSpec`] in a [`RouteRegistry`]. Specs
//! are created with defaults the first time a handler is touched and then
//! filled in by stacking annotations through an [`Annotator`]:
//!
//! ```
//! use routedoc_core::{Descriptor, HandlerId, ProducesOptions, RouteRegistry};
//!
//! let mut registry = RouteRegistry::new();
//! let handler = HandlerId::new("users.list").unwrap();
//!
//! registry
//!     .annotate(handler.clone())
//!     .summary("List users")
//!     .tag("users")
//!     .produces([Descriptor::of::<Vec<String>>()], ProducesOptions::default());
//!
//! let spec = registry.get(&handler);
//! assert_eq!(spec.summary.as_deref(), Some("List users"));
//! assert_eq!(spec.tags, ["users"]);
//! ```
//!
//! An explicitly set value overwrites an earlier one; an absent value never
//! erases anything.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::handler::HandlerId;
use crate::resolve::Descriptor;

/// One descriptor, or several in declaration order.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Exactly one descriptor was given.
    Single(Descriptor),
    /// More than one descriptor was given.
    Multiple(Vec<Descriptor>),
}

impl Payload {
    /// Collapse a descriptor list: `None` when empty, `Single` for one,
    /// `Multiple` otherwise.
    pub fn collapse(descriptors: impl IntoIterator<Item = Descriptor>) -> Option<Self> {
        let mut descriptors: Vec<Descriptor> = descriptors.into_iter().collect();
        match descriptors.len() {
            0 => None,
            1 => descriptors.pop().map(Self::Single),
            _ => Some(Self::Multiple(descriptors)),
        }
    }

    /// Iterate over the contained descriptors.
    pub fn iter(&self) -> std::slice::Iter<'_, Descriptor> {
        match self {
            Self::Single(descriptor) => std::slice::from_ref(descriptor).iter(),
            Self::Multiple(descriptors) => descriptors.iter(),
        }
    }

    /// The payload as a single descriptor; several become a sequence.
    pub fn to_descriptor(&self) -> Descriptor {
        match self {
            Self::Single(descriptor) => descriptor.clone(),
            Self::Multiple(descriptors) => Descriptor::Seq(descriptors.clone()),
        }
    }
}

/// A response declared for a specific status code.
#[derive(Debug, Clone)]
pub struct DeclaredResponse {
    /// Status code, e.g. `"404"`.
    pub status: String,
    /// Response body schema, if any.
    pub schema: Option<Descriptor>,
    /// Response description.
    pub description: String,
}

/// Accumulated documentation for one route handler.
#[derive(Debug, Clone, Default)]
pub struct RouteSpec {
    /// Request body or parameter descriptors.
    pub consumes: Option<Payload>,
    /// Request content type.
    pub consumes_content_type: Option<String>,
    /// Success response descriptors.
    pub produces: Option<Payload>,
    /// Response content type.
    pub produces_content_type: Option<String>,
    /// Success response description.
    pub produces_description: Option<String>,
    /// Success response examples.
    pub produces_examples: Option<Value>,
    /// Short summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Operation identifier.
    pub operation: Option<String>,
    /// Owning blueprint.
    pub blueprint: Option<String>,
    /// Tags in application order, duplicates kept.
    pub tags: Vec<String>,
    /// Whether the route is left out of the document.
    pub hide: Option<bool>,
    /// Header parameter descriptors.
    pub headers: Option<Payload>,
    /// Responses declared per status code.
    pub responses: Vec<DeclaredResponse>,
}

impl RouteSpec {
    /// Whether the route is hidden from the document.
    pub fn is_hidden(&self) -> bool {
        self.hide == Some(true)
    }
}

/// Fields for [`Annotator::route`]. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct RouteOptions {
    /// Short summary.
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Request descriptor.
    pub consumes: Option<Descriptor>,
    /// Response descriptor.
    pub produces: Option<Descriptor>,
    /// Request content type.
    pub consumes_content_type: Option<String>,
    /// Response content type.
    pub produces_content_type: Option<String>,
    /// Visibility.
    pub hide: Option<bool>,
    /// Header descriptor.
    pub headers: Option<Descriptor>,
}

/// Options for [`Annotator::produces`].
#[derive(Debug, Clone, Default)]
pub struct ProducesOptions {
    /// Response description; empty by default.
    pub description: String,
    /// Response content type.
    pub content_type: Option<String>,
    /// Response examples.
    pub examples: Option<Value>,
}

impl ProducesOptions {
    /// Options with the given description.
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::default()
        }
    }
}

/// Route specs keyed by handler identity, in first-touch order.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    specs: IndexMap<HandlerId, RouteSpec>,
}

impl RouteRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, handler: HandlerId) -> &mut RouteSpec {
        self.specs.entry(handler).or_insert_with_key(|handler| {
            debug!(handler = %handler, "created route spec");
            RouteSpec::default()
        })
    }

    /// Start annotating `handler`, creating its spec if needed.
    pub fn annotate(&mut self, handler: HandlerId) -> Annotator<'_> {
        let spec = self.entry(handler.clone());
        Annotator { handler, spec }
    }

    /// The [`RouteSpec`] for `handler`, created with defaults if missing.
    pub fn get(&mut self, handler: &HandlerId) -> &RouteSpec {
        self.entry(handler.clone())
    }

    /// The [`RouteSpec`] for `handler` without creating one.
    pub fn find(&self, handler: &HandlerId) -> Option<&RouteSpec> {
        self.specs.get(handler)
    }

    /// All specs in first-touch order.
    pub fn iter(&self) -> impl Iterator<Item = (&HandlerId, &RouteSpec)> {
        self.specs.iter()
    }

    /// Number of annotated handlers.
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether no handler has been annotated.
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Fluent annotations for one handler.
///
/// Every method consumes and returns the annotator so calls stack.
#[derive(Debug)]
pub struct Annotator<'a> {
    handler: HandlerId,
    spec: &'a mut RouteSpec,
}

impl Annotator<'_> {
    /// Set every field supplied in `options`.
    pub fn route(self, options: RouteOptions) -> Self {
        let RouteOptions {
            summary,
            description,
            consumes,
            produces,
            consumes_content_type,
            produces_content_type,
            hide,
            headers,
        } = options;

        if summary.is_some() {
            self.spec.summary = summary;
        }
        if description.is_some() {
            self.spec.description = description;
        }
        if let Some(consumes) = consumes {
            self.spec.consumes = Some(Payload::Single(consumes));
        }
        if let Some(produces) = produces {
            self.spec.produces = Some(Payload::Single(produces));
        }
        if consumes_content_type.is_some() {
            self.spec.consumes_content_type = consumes_content_type;
        }
        if produces_content_type.is_some() {
            self.spec.produces_content_type = produces_content_type;
        }
        if hide.is_some() {
            self.spec.hide = hide;
        }
        if let Some(headers) = headers {
            self.spec.headers = Some(Payload::Single(headers));
        }
        self
    }

    /// Set the summary.
    pub fn summary(self, text: impl Into<String>) -> Self {
        self.spec.summary = Some(text.into());
        self
    }

    /// Set the description.
    pub fn description(self, text: impl Into<String>) -> Self {
        self.spec.description = Some(text.into());
        self
    }

    /// Set the operation identifier.
    pub fn operation(self, operation_id: impl Into<String>) -> Self {
        self.spec.operation = Some(operation_id.into());
        self
    }

    /// Record the owning blueprint.
    pub fn blueprint(self, name: impl Into<String>) -> Self {
        self.spec.blueprint = Some(name.into());
        self
    }

    /// Set the request descriptors and content type. No-op when empty.
    pub fn consumes<I>(self, descriptors: I, content_type: Option<&str>) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Descriptor>,
    {
        if let Some(payload) = Payload::collapse(descriptors.into_iter().map(Into::into)) {
            self.spec.consumes = Some(payload);
            self.spec.consumes_content_type = content_type.map(str::to_string);
        }
        self
    }

    /// Set the response descriptors and their options. No-op when empty.
    pub fn produces<I>(self, descriptors: I, options: ProducesOptions) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Descriptor>,
    {
        if let Some(payload) = Payload::collapse(descriptors.into_iter().map(Into::into)) {
            self.spec.produces = Some(payload);
            self.spec.produces_content_type = options.content_type;
            self.spec.produces_description = Some(options.description);
            self.spec.produces_examples = options.examples;
        }
        self
    }

    /// Append a tag.
    pub fn tag(self, name: impl Into<String>) -> Self {
        self.spec.tags.push(name.into());
        self
    }

    /// Hide the route from the document.
    pub fn hide(self) -> Self {
        self.spec.hide = Some(true);
        self
    }

    /// Set the header descriptors. No-op when empty.
    pub fn headers<I>(self, descriptors: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Descriptor>,
    {
        if let Some(payload) = Payload::collapse(descriptors.into_iter().map(Into::into)) {
            self.spec.headers = Some(payload);
        }
        self
    }

    /// Declare a response for a specific status code.
    pub fn response(
        self,
        status: impl Into<String>,
        schema: Option<Descriptor>,
        description: impl Into<String>,
    ) -> Self {
        self.spec.responses.push(DeclaredResponse {
            status: status.into(),
            schema,
            description: description.into(),
        });
        self
    }

    /// The handler being annotated.
    pub fn handler(&self) -> &HandlerId {
        &self.handler
    }

    /// The route documentation recorded so far.
    pub fn spec(&self) -> &RouteSpec {
        &*self.spec
    }

    /// Finish annotating and hand back the handler identity.
    pub fn finish(self) -> HandlerId {
        self.handler
    }
}
