//! Swagger document generation.
//!
//! [`SwaggerGenerator`] walks the host's routes, looks up each handler's
//! [`RouteSpec`] and resolves its descriptors into operations. Models met
//! along the way are registered in the shared [`Definitions`], which then
//! become the document's `definitions`.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use tracing::{info, trace, warn};

use routedoc_config::{DocsConfig, SecurityScheme, UriFilter};
use routedoc_core::{
    resolve, Definitions, Fragment, Location, Payload, RouteRegistry, RouteSpec,
};

use crate::error::{DocsError, DocsResult};
use crate::parameters::{expand as expand_parameters, is_body};
use crate::path::PathTemplate;
use crate::route::RegisteredRoute;
use crate::swagger::{Contact, License, Operation, PathItem, Response, Swagger, Tag};

const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Generator for Swagger 2.0 documents.
///
/// # Example
///
/// ```
/// use http::Method;
/// use routedoc_core::{Definitions, Descriptor, HandlerId, ProducesOptions, RouteRegistry};
/// use routedoc_docs::{RegisteredRoute, SwaggerGenerator};
///
/// let mut registry = RouteRegistry::new();
/// let handler = HandlerId::new("health").unwrap();
/// registry
///     .annotate(handler.clone())
///     .summary("Health check")
///     .produces([Descriptor::of::<bool>()], ProducesOptions::described("Alive"));
///
/// let routes = [RegisteredRoute::new("health", "/health", [Method::GET], handler)];
/// let mut definitions = Definitions::new();
///
/// let swagger = SwaggerGenerator::new()
///     .title("Status API")
///     .generate(&routes, &registry, &mut definitions)
///     .unwrap();
///
/// let get = swagger.paths["/health"].get.as_ref().unwrap();
/// assert_eq!(get.summary.as_deref(), Some("Health check"));
/// assert_eq!(get.responses["200"].description, "Alive");
/// ```
#[derive(Debug, Clone)]
pub struct SwaggerGenerator {
    template: Swagger,
    uri_filter: UriFilter,
    exclude_blueprints: Vec<String>,
}

impl Default for SwaggerGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SwaggerGenerator {
    /// Create a generator with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&DocsConfig::default())
    }

    /// Create a generator from loaded configuration.
    #[must_use]
    pub fn from_config(config: &DocsConfig) -> Self {
        Self {
            template: Swagger::from_config(config),
            uri_filter: config.document.uri_filter,
            exclude_blueprints: config.document.exclude_blueprints.clone(),
        }
    }

    /// Set the API title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.template.info.title = title.into();
        self
    }

    /// Set the API version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.template.info.version = version.into();
        self
    }

    /// Set the API description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.template.info.description = Some(description.into());
        self
    }

    /// Set the contact email.
    #[must_use]
    pub fn contact_email(mut self, email: impl Into<String>) -> Self {
        self.template.info.contact = Some(Contact {
            email: Some(email.into()),
        });
        self
    }

    /// Set license information.
    #[must_use]
    pub fn license(mut self, name: impl Into<String>, url: Option<String>) -> Self {
        self.template.info.license = Some(License {
            name: name.into(),
            url,
        });
        self
    }

    /// Set the host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.template.host = Some(host.into());
        self
    }

    /// Set the base path.
    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.template.base_path = Some(base_path.into());
        self
    }

    /// Add a transfer protocol.
    #[must_use]
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.template.schemes.push(scheme.into());
        self
    }

    /// Replace the default request content types.
    #[must_use]
    pub fn consumes<I, S>(mut self, content_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.template.consumes = content_types.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the default response content types.
    #[must_use]
    pub fn produces<I, S>(mut self, content_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.template.produces = content_types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the trailing-slash filter.
    #[must_use]
    pub fn uri_filter(mut self, uri_filter: UriFilter) -> Self {
        self.uri_filter = uri_filter;
        self
    }

    /// Leave routes of `blueprint` out of the document.
    #[must_use]
    pub fn exclude_blueprint(mut self, blueprint: impl Into<String>) -> Self {
        self.exclude_blueprints.push(blueprint.into());
        self
    }

    /// Add a security scheme.
    #[must_use]
    pub fn security_definition(mut self, name: impl Into<String>, scheme: SecurityScheme) -> Self {
        self.template.security_definitions.insert(name.into(), scheme);
        self
    }

    /// Require `scheme` globally.
    #[must_use]
    pub fn security_requirement(mut self, scheme: impl Into<String>, scopes: Vec<String>) -> Self {
        let mut requirement = IndexMap::new();
        requirement.insert(scheme.into(), scopes);
        self.template.security.push(requirement);
        self
    }

    /// Generate a document for `routes`.
    ///
    /// Routes with no annotations are documented with defaults. Hidden
    /// routes, routes of excluded blueprints and paths dropped by the URI
    /// filter are skipped.
    ///
    /// # Errors
    ///
    /// Returns `DocsError::Assembly` holding every invalid path, unsupported
    /// method, unnamed parameter, dangling reference and definition name
    /// claimed by two models. No partial document is returned.
    pub fn generate<'r, I>(
        &self,
        routes: I,
        registry: &RouteRegistry,
        definitions: &mut Definitions,
    ) -> DocsResult<Swagger>
    where
        I: IntoIterator<Item = &'r RegisteredRoute>,
    {
        let mut swagger = self.template.clone();
        let mut tags: IndexSet<String> = IndexSet::new();
        let mut errors = Vec::new();
        let unannotated = RouteSpec::default();

        for route in routes {
            let spec = registry.find(&route.handler).unwrap_or(&unannotated);

            if !self.is_documented(route, spec) {
                continue;
            }

            let template = match PathTemplate::parse(&route.path) {
                Ok(template) => template,
                Err(err) => {
                    warn!(route = %route.name, error = %err, "skipping route");
                    errors.push(err);
                    continue;
                }
            };

            let mut methods = route.documented_methods().peekable();
            if methods.peek().is_none() {
                continue;
            }

            let operation = match self.build_operation(route, spec, &template, definitions) {
                Ok(operation) => operation,
                Err(err) => {
                    warn!(route = %route.name, error = %err, "skipping route");
                    errors.push(err);
                    continue;
                }
            };

            trace!(route = %route.name, path = %template.path, "documenting route");
            let path_item = swagger.paths.entry(template.path.clone()).or_default();
            let mut documented = false;
            for method in methods {
                match path_item.set(method, operation.clone()) {
                    Ok(()) => documented = true,
                    Err(err) => {
                        warn!(route = %route.name, method = %method, "unsupported method");
                        errors.push(err);
                    }
                }
            }

            if documented {
                tags.extend(operation.tags.iter().cloned());
            }
        }

        swagger.paths.retain(|_, item| !is_empty(item));
        swagger.tags = tags
            .into_iter()
            .map(|name| Tag {
                name,
                description: None,
            })
            .collect();
        swagger.definitions = IndexMap::new();
        for (name, schema) in definitions.all() {
            if swagger.definitions.contains_key(name) {
                warn!(definition = name, "definition name taken by another model");
                errors.push(DocsError::DuplicateDefinition {
                    name: name.to_string(),
                });
                continue;
            }
            swagger.definitions.insert(name.to_string(), schema.clone());
        }

        errors.extend(dangling_references(&swagger)?);
        if !errors.is_empty() {
            return Err(DocsError::Assembly { errors });
        }

        info!(
            paths = swagger.paths.len(),
            definitions = swagger.definitions.len(),
            "assembled Swagger document"
        );
        Ok(swagger)
    }

    /// Generate the document as pretty-printed JSON.
    pub fn generate_json<'r, I>(
        &self,
        routes: I,
        registry: &RouteRegistry,
        definitions: &mut Definitions,
    ) -> DocsResult<String>
    where
        I: IntoIterator<Item = &'r RegisteredRoute>,
    {
        self.generate(routes, registry, definitions)?.to_json()
    }

    fn is_documented(&self, route: &RegisteredRoute, spec: &RouteSpec) -> bool {
        if !self.uri_filter.keeps(&route.path) {
            trace!(path = %route.path, "filtered by URI filter");
            return false;
        }
        if spec.is_hidden() {
            trace!(route = %route.name, "hidden");
            return false;
        }
        let blueprint = route.blueprint.as_ref().or(spec.blueprint.as_ref());
        if blueprint.is_some_and(|bp| self.exclude_blueprints.contains(bp)) {
            trace!(route = %route.name, "excluded blueprint");
            return false;
        }
        true
    }

    fn build_operation(
        &self,
        route: &RegisteredRoute,
        spec: &RouteSpec,
        template: &PathTemplate,
        definitions: &mut Definitions,
    ) -> DocsResult<Operation> {
        let operation_id = spec.operation.clone().unwrap_or_else(|| route.name.clone());
        let invalid = |reason: String| DocsError::InvalidOperation {
            operation_id: operation_id.clone(),
            reason,
        };

        let mut parameters: Vec<_> = template
            .parameters
            .iter()
            .map(|parameter| parameter.field().serialize(definitions))
            .collect();

        // Body descriptors share one `body` parameter, placed where the first appeared.
        let mut declared = Vec::new();
        let mut body = Vec::new();
        let mut body_at = None;
        for descriptor in spec.consumes.iter().flat_map(Payload::iter) {
            if is_body(descriptor, None) {
                if body_at.is_none() {
                    body_at = Some(declared.len());
                }
                body.push(descriptor.clone());
            } else {
                declared.extend(expand_parameters(descriptor, None, definitions).map_err(&invalid)?);
            }
        }
        if let (Some(index), Some(payload)) = (body_at, Payload::collapse(body)) {
            let descriptor = payload.to_descriptor();
            let body = expand_parameters(&descriptor, Some(Location::Body), definitions)
                .map_err(&invalid)?;
            for (offset, parameter) in body.into_iter().enumerate() {
                declared.insert(index + offset, parameter);
            }
        }
        for descriptor in spec.headers.iter().flat_map(Payload::iter) {
            declared.extend(
                expand_parameters(descriptor, Some(Location::Header), definitions)
                    .map_err(&invalid)?,
            );
        }

        // An explicit declaration replaces the bare path parameter.
        parameters.retain(|existing| !declared.iter().any(|p| same_parameter(existing, p)));
        parameters.extend(declared);

        let mut responses = IndexMap::new();
        if let Some(produces) = &spec.produces {
            if !spec.responses.iter().any(|r| r.status == "200") {
                responses.insert(
                    "200".to_string(),
                    Response {
                        description: spec.produces_description.clone().unwrap_or_default(),
                        schema: Some(resolve(&produces.to_descriptor(), definitions)),
                        examples: spec.produces_examples.clone(),
                    },
                );
            }
        }
        for declared in &spec.responses {
            responses.insert(
                declared.status.clone(),
                Response {
                    description: declared.description.clone(),
                    schema: declared
                        .schema
                        .as_ref()
                        .map(|schema| resolve(schema, definitions)),
                    examples: None,
                },
            );
        }
        if responses.is_empty() {
            responses.insert(
                "200".to_string(),
                Response {
                    description: String::new(),
                    schema: None,
                    examples: None,
                },
            );
        }

        Ok(Operation {
            summary: spec.summary.clone(),
            description: spec.description.clone(),
            tags: spec.tags.clone(),
            consumes: content_types(spec.consumes_content_type.as_ref(), &self.template.consumes),
            produces: content_types(spec.produces_content_type.as_ref(), &self.template.produces),
            parameters,
            responses,
            operation_id,
        })
    }
}

fn content_types(declared: Option<&String>, defaults: &[String]) -> Vec<String> {
    declared.map_or_else(|| defaults.to_vec(), |content_type| vec![content_type.clone()])
}

fn same_parameter(a: &Fragment, b: &Fragment) -> bool {
    a.get("name") == b.get("name") && a.get("in") == b.get("in")
}

fn is_empty(item: &PathItem) -> bool {
    item.get.is_none()
        && item.put.is_none()
        && item.post.is_none()
        && item.delete.is_none()
        && item.options.is_none()
        && item.head.is_none()
        && item.patch.is_none()
}

/// Every `$ref` in the document that names no definition.
fn dangling_references(swagger: &Swagger) -> DocsResult<Vec<DocsError>> {
    let document = swagger.to_value()?;
    let mut errors = Vec::new();
    collect_dangling(&document, &mut String::from("#"), swagger, &mut errors);
    Ok(errors)
}

fn collect_dangling(
    value: &Value,
    pointer: &mut String,
    swagger: &Swagger,
    errors: &mut Vec<DocsError>,
) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                let resolved = reference
                    .strip_prefix(DEFINITIONS_PREFIX)
                    .is_some_and(|name| swagger.definitions.contains_key(name));
                if !resolved {
                    errors.push(DocsError::DanglingReference {
                        reference: reference.clone(),
                        location: pointer.clone(),
                    });
                }
            }
            for (key, child) in map {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&key.replace('~', "~0").replace('/', "~1"));
                collect_dangling(child, pointer, swagger, errors);
                pointer.truncate(len);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&index.to_string());
                collect_dangling(child, pointer, swagger, errors);
                pointer.truncate(len);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::Method;
    use routedoc_core::{
        Descriptor, Field, HandlerId, Model, ModelRef, ProducesOptions, RouteOptions,
    };
    use serde_json::json;

    struct User;

    impl Model for User {
        fn fields() -> Vec<(&'static str, Descriptor)> {
            vec![
                ("id", Descriptor::of::<i64>()),
                ("name", Descriptor::of::<String>()),
            ]
        }
    }

    fn handler(name: &'static str) -> HandlerId {
        HandlerId::new(name).unwrap()
    }

    fn get(name: &'static str, path: &str) -> RegisteredRoute {
        RegisteredRoute::new(name, path, [Method::GET], handler(name))
    }

    #[test]
    fn test_generator_builder() {
        let generator = SwaggerGenerator::new()
            .title("My API")
            .version("2.0.0")
            .description("API description")
            .host("api.example.com")
            .scheme("https")
            .license("MIT", None)
            .security_definition("ApiKey", SecurityScheme::api_key_header("X-Api-Key"))
            .security_requirement("ApiKey", Vec::new());

        assert_eq!(generator.template.info.title, "My API");
        assert_eq!(generator.template.info.version, "2.0.0");
        assert_eq!(generator.template.schemes, ["https"]);
        assert!(generator.template.security_definitions.contains_key("ApiKey"));
        assert_eq!(generator.template.security.len(), 1);
    }

    #[test]
    fn test_unannotated_route_gets_defaults() {
        let registry = RouteRegistry::new();
        let mut definitions = Definitions::new();
        let routes = [get("list_users", "/users")];

        let swagger = SwaggerGenerator::new()
            .generate(&routes, &registry, &mut definitions)
            .unwrap();

        let json = serde_json::to_value(&swagger.paths["/users"]).unwrap();
        assert_eq!(
            json,
            json!({
                "get": {
                    "operationId": "list_users",
                    "consumes": ["application/json"],
                    "produces": ["application/json"],
                    "responses": {"200": {"description": ""}}
                }
            })
        );
    }

    #[test]
    fn test_operation_fields_from_spec() {
        let mut registry = RouteRegistry::new();
        registry
            .annotate(handler("get_user"))
            .summary("Fetch a user")
            .description("Looks a user up by id")
            .operation("getUser")
            .tag("users")
            .produces(
                [Descriptor::model::<User>()],
                ProducesOptions {
                    description: "The user".to_string(),
                    content_type: Some("application/vnd.user+json".to_string()),
                    examples: Some(json!({"application/json": {"id": 1, "name": "Ada"}})),
                },
            )
            .response("404", None, "No such user");

        let mut definitions = Definitions::new();
        let routes = [get("get_user", "/users/<id:int>")];
        let swagger = SwaggerGenerator::new()
            .generate(&routes, &registry, &mut definitions)
            .unwrap();

        let op = swagger.paths["/users/{id}"].get.as_ref().unwrap();
        assert_eq!(op.operation_id, "getUser");
        assert_eq!(op.produces, ["application/vnd.user+json"]);
        assert_eq!(op.consumes, ["application/json"]);
        assert_eq!(
            Value::Object(op.parameters[0].clone()),
            json!({"type": "integer", "format": "int64", "name": "id", "required": true, "in": "path"})
        );

        let statuses: Vec<_> = op.responses.keys().map(String::as_str).collect();
        assert_eq!(statuses, ["200", "404"]);
        assert_eq!(
            Value::Object(op.responses["200"].schema.clone().unwrap()),
            json!({"$ref": "#/definitions/User"})
        );
        assert_eq!(op.responses["200"].examples.as_ref().unwrap()["application/json"]["id"], 1);
        assert_eq!(op.responses["404"].description, "No such user");
        assert!(swagger.definitions.contains_key("User"));
    }

    #[test]
    fn test_declared_200_overrides_produces() {
        let mut registry = RouteRegistry::new();
        registry
            .annotate(handler("ping"))
            .produces([Descriptor::of::<String>()], ProducesOptions::default())
            .response("200", Some(Descriptor::of::<bool>()), "Pong");

        let mut definitions = Definitions::new();
        let routes = [get("ping", "/ping")];
        let swagger = SwaggerGenerator::new()
            .generate(&routes, &registry, &mut definitions)
            .unwrap();

        let op = swagger.paths["/ping"].get.as_ref().unwrap();
        assert_eq!(op.responses.len(), 1);
        assert_eq!(op.responses["200"].description, "Pong");
        assert_eq!(
            Value::Object(op.responses["200"].schema.clone().unwrap()),
            json!({"type": "boolean"})
        );
    }

    #[test]
    fn test_consumes_and_headers_become_parameters() {
        let mut registry = RouteRegistry::new();
        registry
            .annotate(handler("create_user"))
            .consumes([Descriptor::model::<User>()], Some("application/x-user"))
            .headers([Field::string().name("X-Trace").required(false)]);

        let mut definitions = Definitions::new();
        let routes = [RegisteredRoute::new(
            "create_user",
            "/users",
            [Method::POST],
            handler("create_user"),
        )];
        let swagger = SwaggerGenerator::new()
            .generate(&routes, &registry, &mut definitions)
            .unwrap();

        let op = swagger.paths["/users"].post.as_ref().unwrap();
        assert_eq!(op.consumes, ["application/x-user"]);
        let parameters: Vec<_> = op.parameters.iter().cloned().map(Value::Object).collect();
        assert_eq!(
            parameters,
            [
                json!({"name": "body", "in": "body", "schema": {"$ref": "#/definitions/User"}}),
                json!({"name": "X-Trace", "in": "header", "type": "string", "required": false}),
            ]
        );
    }

    #[test]
    fn test_declared_path_parameter_replaces_template_parameter() {
        let mut registry = RouteRegistry::new();
        registry.annotate(handler("get_item")).consumes(
            [Field::integer()
                .name("id")
                .description("Item id")
                .location(Location::Path)],
            None,
        );

        let mut definitions = Definitions::new();
        let routes = [get("get_item", "/items/<id>")];
        let swagger = SwaggerGenerator::new()
            .generate(&routes, &registry, &mut definitions)
            .unwrap();

        let op = swagger.paths["/items/{id}"].get.as_ref().unwrap();
        assert_eq!(op.parameters.len(), 1);
        assert_eq!(op.parameters[0]["type"], "integer");
        assert_eq!(op.parameters[0]["description"], "Item id");
    }

    #[test]
    fn test_hidden_filtered_and_excluded_routes() {
        let mut registry = RouteRegistry::new();
        registry.annotate(handler("secret")).hide();
        registry.annotate(handler("spec")).blueprint("openapi");

        let routes = [
            get("secret", "/secret"),
            get("spec", "/openapi/spec.json"),
            get("users_slash", "/users/"),
            RegisteredRoute::new("docs", "/docs", [Method::GET], handler("docs"))
                .in_blueprint("swagger"),
            get("users", "/users"),
        ];

        let mut definitions = Definitions::new();
        let swagger = SwaggerGenerator::new()
            .generate(&routes, &registry, &mut definitions)
            .unwrap();

        let paths: Vec<_> = swagger.paths.keys().map(String::as_str).collect();
        assert_eq!(paths, ["/users"]);
        assert!(registry.find(&handler("secret")).unwrap().is_hidden());

        let swagger = SwaggerGenerator::new()
            .uri_filter(UriFilter::All)
            .generate(&routes, &registry, &mut definitions)
            .unwrap();
        let paths: Vec<_> = swagger.paths.keys().map(String::as_str).collect();
        assert_eq!(paths, ["/users/", "/users"]);
    }

    #[test]
    fn test_route_options_hide_false_keeps_route() {
        let mut registry = RouteRegistry::new();
        registry.annotate(handler("visible")).route(RouteOptions {
            hide: Some(false),
            summary: Some("Visible".to_string()),
            ..RouteOptions::default()
        });

        let mut definitions = Definitions::new();
        let routes = [get("visible", "/visible")];
        let swagger = SwaggerGenerator::new()
            .generate(&routes, &registry, &mut definitions)
            .unwrap();
        assert!(swagger.paths.contains_key("/visible"));
    }

    #[test]
    fn test_top_level_tags_are_deduplicated_in_first_use_order() {
        let mut registry = RouteRegistry::new();
        registry.annotate(handler("a")).tag("users").tag("admin");
        registry.annotate(handler("b")).tag("admin").tag("audit");
        registry.annotate(handler("c")).tag("hidden").hide();

        let routes = [get("a", "/a"), get("b", "/b"), get("c", "/c")];
        let mut definitions = Definitions::new();
        let swagger = SwaggerGenerator::new()
            .generate(&routes, &registry, &mut definitions)
            .unwrap();

        let tags: Vec<_> = swagger.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(tags, ["users", "admin", "audit"]);
    }

    #[test]
    fn test_options_and_head_are_skipped() {
        let registry = RouteRegistry::new();
        let routes = [RegisteredRoute::new(
            "preflight",
            "/preflight",
            [Method::OPTIONS, Method::HEAD],
            handler("preflight"),
        )];

        let mut definitions = Definitions::new();
        let swagger = SwaggerGenerator::new()
            .generate(&routes, &registry, &mut definitions)
            .unwrap();
        assert!(swagger.paths.is_empty());
    }

    #[test]
    fn test_errors_are_aggregated() {
        let registry = RouteRegistry::new();
        let routes = [
            get("broken", "/broken/<id"),
            RegisteredRoute::new("trace", "/trace", [Method::TRACE], handler("trace")),
            get("fine", "/fine"),
        ];

        let mut definitions = Definitions::new();
        let err = SwaggerGenerator::new()
            .generate(&routes, &registry, &mut definitions)
            .unwrap_err();

        let DocsError::Assembly { errors } = err else {
            panic!("expected an aggregate error");
        };
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], DocsError::InvalidPath { .. }));
        assert!(matches!(errors[1], DocsError::InvalidOperation { ref operation_id, .. } if operation_id == "trace"));
    }

    #[test]
    fn test_unnamed_query_parameter_is_an_error() {
        let mut registry = RouteRegistry::new();
        registry
            .annotate(handler("search"))
            .consumes([Field::string().location(Location::Query)], None);

        let routes = [get("search", "/search")];
        let mut definitions = Definitions::new();
        let err = SwaggerGenerator::new()
            .generate(&routes, &registry, &mut definitions)
            .unwrap_err();
        assert!(err.to_string().contains("query parameter has no name"));
    }

    #[test]
    fn test_conflicting_object_name_is_a_dangling_reference() {
        let mut registry = RouteRegistry::new();
        registry
            .annotate(handler("user"))
            .produces([Descriptor::model::<User>()], ProducesOptions::default());
        registry.annotate(handler("person")).produces(
            [Field::object(ModelRef::of::<User>()).object_name("Person")],
            ProducesOptions::default(),
        );

        let routes = [get("user", "/user"), get("person", "/person")];
        let mut definitions = Definitions::new();
        let err = SwaggerGenerator::new()
            .generate(&routes, &registry, &mut definitions)
            .unwrap_err();

        let DocsError::Assembly { errors } = err else {
            panic!("expected an aggregate error");
        };
        assert_eq!(errors.len(), 1);
        let DocsError::DanglingReference { reference, location } = &errors[0] else {
            panic!("expected a dangling reference");
        };
        assert_eq!(reference, "#/definitions/Person");
        assert_eq!(location, "#/paths/~1person/get/responses/200/schema");
    }

    #[test]
    fn test_generate_json() {
        let registry = RouteRegistry::new();
        let mut definitions = Definitions::new();
        let json = SwaggerGenerator::new()
            .title("Json API")
            .generate_json(&[get("root", "/")], &registry, &mut definitions)
            .unwrap();

        assert!(json.contains("\"swagger\": \"2.0\""));
        assert!(json.contains("Json API"));
    }

    fn post(name: &'static str, path: &str) -> RegisteredRoute {
        RegisteredRoute::new(name, path, [Method::POST], handler(name))
    }

    fn parameters(swagger: &Swagger, path: &str) -> Value {
        let op = swagger.paths[path].post.as_ref().unwrap();
        Value::Array(op.parameters.iter().cloned().map(Value::Object).collect())
    }

    #[test]
    fn test_several_body_descriptors_share_one_parameter() {
        let mut registry = RouteRegistry::new();
        registry
            .annotate(handler("upload"))
            .consumes([Descriptor::of::<String>(), Descriptor::of::<i64>()], None);

        let mut definitions = Definitions::new();
        let swagger = SwaggerGenerator::new()
            .generate(&[post("upload", "/upload")], &registry, &mut definitions)
            .unwrap();

        assert_eq!(
            parameters(&swagger, "/upload"),
            json!([{
                "name": "body",
                "in": "body",
                "schema": {
                    "type": "array",
                    "items": [{"type": "string"}, {"type": "integer", "format": "int64"}]
                }
            }])
        );
    }

    #[test]
    fn test_body_keeps_its_place_among_located_parameters() {
        let mut registry = RouteRegistry::new();
        registry.annotate(handler("import")).consumes(
            [
                Descriptor::from(Field::string().name("dry_run").location(Location::Query)),
                Descriptor::model::<User>(),
                Descriptor::from(Field::integer().name("batch").location(Location::Query)),
            ],
            None,
        );

        let mut definitions = Definitions::new();
        let swagger = SwaggerGenerator::new()
            .generate(&[post("import", "/import")], &registry, &mut definitions)
            .unwrap();

        assert_eq!(
            parameters(&swagger, "/import"),
            json!([
                {"name": "dry_run", "in": "query", "type": "string"},
                {"name": "body", "in": "body", "schema": {"$ref": "#/definitions/User"}},
                {"name": "batch", "in": "query", "type": "integer", "format": "int64"}
            ])
        );
    }

    #[test]
    fn test_several_headers_are_all_documented() {
        let mut registry = RouteRegistry::new();
        registry.annotate(handler("sign")).headers([
            Field::string().name("X-Signature").required(true),
            Field::string().name("X-Key-Id"),
        ]);

        let mut definitions = Definitions::new();
        let swagger = SwaggerGenerator::new()
            .generate(&[post("sign", "/sign")], &registry, &mut definitions)
            .unwrap();

        assert_eq!(
            parameters(&swagger, "/sign"),
            json!([
                {"name": "X-Signature", "in": "header", "type": "string", "required": true},
                {"name": "X-Key-Id", "in": "header", "type": "string"}
            ])
        );
    }

    mod billing {
        use super::*;

        pub struct User;

        impl Model for User {
            fn fields() -> Vec<(&'static str, Descriptor)> {
                vec![("email", Descriptor::of::<String>())]
            }
        }
    }

    #[test]
    fn test_models_sharing_a_name_are_reported() {
        let mut registry = RouteRegistry::new();
        registry
            .annotate(handler("one"))
            .produces([Descriptor::model::<User>()], ProducesOptions::default());
        registry
            .annotate(handler("two"))
            .produces([Descriptor::model::<billing::User>()], ProducesOptions::default());

        let routes = [get("one", "/one"), get("two", "/two")];
        let mut definitions = Definitions::new();
        let err = SwaggerGenerator::new()
            .generate(&routes, &registry, &mut definitions)
            .unwrap_err();

        assert_eq!(definitions.len(), 2);
        let DocsError::Assembly { errors } = err else {
            panic!("expected an aggregate error");
        };
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            &errors[0],
            DocsError::DuplicateDefinition { name } if name == "User"
        ));
    }
}
