//! Integration tests for Swagger document assembly.
//!
//! These build a small application the way a host would: models declared
//! once, routes annotated with stacked calls, then one document generated
//! over the whole route table.

use http::Method;
use routedoc_config::{ConfigLoader, UriFilter};
use routedoc_core::{
    Definitions, Descriptor, Field, HandlerId, Location, Model, ProducesOptions, RouteRegistry,
};
use routedoc_docs::{DocsError, RegisteredRoute, SwaggerGenerator};
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

struct Team;

impl Model for Team {
    fn fields() -> Vec<(&'static str, Descriptor)> {
        vec![
            ("title", Descriptor::of::<String>()),
            ("members", Descriptor::of::<Vec<User>>()),
            ("_secret", Descriptor::of::<String>()),
        ]
    }
}

impl routedoc_core::Describe for User {
    fn descriptor() -> Descriptor {
        Descriptor::model::<Self>()
    }
}

fn handler(name: &'static str) -> HandlerId {
    HandlerId::new(name).unwrap()
}

fn app() -> (Vec<RegisteredRoute>, RouteRegistry) {
    let mut registry = RouteRegistry::new();

    registry
        .annotate(handler("users.get"))
        .summary("Fetch a user")
        .tag("users")
        .produces([Descriptor::model::<User>()], ProducesOptions::described("The user"));

    registry
        .annotate(handler("users.search"))
        .summary("Search users")
        .tag("users")
        .consumes(
            [Field::dictionary(
                [
                    ("q".to_string(), Descriptor::of::<String>()),
                    ("limit".to_string(), Field::integer().maximum(50).into()),
                ]
                .into_iter()
                .collect(),
            )
            .location(Location::Query)],
            None,
        )
        .produces([Descriptor::of::<Vec<User>>()], ProducesOptions::default());

    registry
        .annotate(handler("teams.create"))
        .summary("Create a team")
        .tag("teams")
        .consumes([Descriptor::model::<Team>()], None)
        .headers([Field::string().name("X-Request-Id").required(true)])
        .produces([Descriptor::model::<Team>()], ProducesOptions::default())
        .response("409", None, "Team exists");

    registry.annotate(handler("internal.metrics")).hide();

    let routes = vec![
        RegisteredRoute::new(
            "get_user",
            "/users/<user_id:int>",
            [Method::GET, Method::HEAD],
            handler("users.get"),
        )
        .in_blueprint("users"),
        RegisteredRoute::new("search_users", "/users", [Method::GET], handler("users.search")),
        RegisteredRoute::new("search_users_slash", "/users/", [Method::GET], handler("users.search")),
        RegisteredRoute::new("create_team", "/teams", [Method::POST], handler("teams.create")),
        RegisteredRoute::new("metrics", "/metrics", [Method::GET], handler("internal.metrics")),
        RegisteredRoute::new("openapi_spec", "/openapi/spec.json", [Method::GET], handler("spec"))
            .in_blueprint("openapi"),
    ];

    (routes, registry)
}

#[test]
fn test_full_document() {
    let (routes, registry) = app();
    let mut definitions = Definitions::new();

    let swagger = SwaggerGenerator::new()
        .title("Teams API")
        .version("1.2.0")
        .generate(&routes, &registry, &mut definitions)
        .unwrap();
    let document = swagger.to_value().unwrap();

    let paths: Vec<_> = swagger.paths.keys().map(String::as_str).collect();
    assert_eq!(paths, ["/users/{user_id}", "/users", "/teams"]);

    assert_eq!(document["info"], json!({"title": "Teams API", "version": "1.2.0"}));
    assert_eq!(document["tags"], json!([{"name": "users"}, {"name": "teams"}]));

    assert_eq!(
        document["definitions"],
        json!({
            "User": {
                "type": "object",
                "properties": {
                    "id": {"type": "integer", "format": "int64"},
                    "name": {"type": "string"}
                }
            },
            "Team": {
                "type": "object",
                "properties": {
                    "title": {"type": "string"},
                    "members": {"type": "array", "items": {"$ref": "#/definitions/User"}}
                }
            }
        })
    );

    let get_user = &document["paths"]["/users/{user_id}"]["get"];
    assert_eq!(get_user["operationId"], "get_user");
    assert_eq!(
        get_user["responses"]["200"],
        json!({"description": "The user", "schema": {"$ref": "#/definitions/User"}})
    );
    assert_eq!(
        get_user["parameters"],
        json!([{
            "type": "integer",
            "format": "int64",
            "name": "user_id",
            "required": true,
            "in": "path"
        }])
    );
    assert!(document["paths"]["/users/{user_id}"].get("head").is_none());

    let search = &document["paths"]["/users"]["get"];
    assert_eq!(
        search["parameters"],
        json!([
            {"name": "q", "in": "query", "type": "string"},
            {"name": "limit", "in": "query", "type": "integer", "format": "int64", "maximum": 50}
        ])
    );
    assert_eq!(
        search["responses"]["200"]["schema"],
        json!({"type": "array", "items": {"$ref": "#/definitions/User"}})
    );

    let create = &document["paths"]["/teams"]["post"];
    assert_eq!(
        create["parameters"],
        json!([
            {"name": "body", "in": "body", "schema": {"$ref": "#/definitions/Team"}},
            {"name": "X-Request-Id", "in": "header", "type": "string", "required": true}
        ])
    );
    assert_eq!(create["responses"]["409"], json!({"description": "Team exists"}));

    assert!(registry.find(&handler("internal.metrics")).unwrap().is_hidden());
}

#[test]
fn test_definitions_persist_across_documents() {
    let (routes, registry) = app();
    let mut definitions = Definitions::new();
    let generator = SwaggerGenerator::new();

    let first = generator.generate(&routes, &registry, &mut definitions).unwrap();
    let second = generator.generate(&routes, &registry, &mut definitions).unwrap();

    assert_eq!(definitions.len(), 2);
    assert_eq!(first.to_value().unwrap(), second.to_value().unwrap());
}

#[test]
fn test_generator_from_config() {
    let config = ConfigLoader::new()
        .with_string(
            r#"
            [info]
            title = "Configured"
            contact_email = "team@example.com"

            [document]
            host = "api.example.com"
            base_path = "/v1"
            schemes = ["https"]
            uri_filter = "all"
            produces = ["application/json", "text/plain"]

            [security_definitions.ApiKey]
            type = "apiKey"
            name = "X-Api-Key"
            in = "header"

            [[security]]
            ApiKey = []
            "#,
            "toml",
        )
        .unwrap()
        .load()
        .unwrap();
    assert_eq!(config.document.uri_filter, UriFilter::All);

    let (routes, registry) = app();
    let mut definitions = Definitions::new();
    let document = SwaggerGenerator::from_config(&config)
        .generate(&routes, &registry, &mut definitions)
        .unwrap()
        .to_value()
        .unwrap();

    assert_eq!(document["host"], "api.example.com");
    assert_eq!(document["basePath"], "/v1");
    assert_eq!(document["schemes"], json!(["https"]));
    assert_eq!(document["info"]["contact"]["email"], "team@example.com");
    assert_eq!(
        document["securityDefinitions"]["ApiKey"],
        json!({"type": "apiKey", "name": "X-Api-Key", "in": "header"})
    );
    assert_eq!(document["security"], json!([{"ApiKey": []}]));
    assert!(document["paths"].get("/users/").is_some());
    assert_eq!(
        document["paths"]["/users"]["get"]["produces"],
        json!(["application/json", "text/plain"])
    );
}

#[test]
fn test_every_problem_is_reported() {
    let (mut routes, registry) = app();
    routes.push(RegisteredRoute::new(
        "broken",
        "/broken/<id:int",
        [Method::GET],
        handler("broken"),
    ));
    routes.push(RegisteredRoute::new(
        "connect",
        "/tunnel",
        [Method::CONNECT],
        handler("connect"),
    ));

    let mut definitions = Definitions::new();
    let err = SwaggerGenerator::new()
        .generate(&routes, &registry, &mut definitions)
        .unwrap_err();

    let DocsError::Assembly { errors } = err else {
        panic!("expected an aggregate error");
    };
    assert_eq!(errors.len(), 2);
    assert!(errors[0].to_string().contains("/broken/<id:int"));
    assert!(errors[1].to_string().contains("CONNECT"));
}

mod archive {
    use routedoc_core::{Descriptor, Model};

    pub struct Team;

    impl Model for Team {
        fn fields() -> Vec<(&'static str, Descriptor)> {
            vec![("archived_at", Descriptor::of::<String>())]
        }
    }
}

#[test]
fn test_payload_lists_and_name_clashes() {
    let (mut routes, mut registry) = app();
    registry
        .annotate(handler("teams.merge"))
        .consumes([Descriptor::model::<Team>(), Descriptor::model::<User>()], None)
        .headers([
            Field::string().name("X-Request-Id"),
            Field::string().name("X-Merge-Token").required(true),
        ]);
    routes.push(RegisteredRoute::new(
        "merge_teams",
        "/teams/merge",
        [Method::POST],
        handler("teams.merge"),
    ));

    let mut definitions = Definitions::new();
    let document = SwaggerGenerator::new()
        .generate(&routes, &registry, &mut definitions)
        .unwrap()
        .to_value()
        .unwrap();
    assert_eq!(
        document["paths"]["/teams/merge"]["post"]["parameters"],
        json!([
            {
                "name": "body",
                "in": "body",
                "schema": {
                    "type": "array",
                    "items": [
                        {"$ref": "#/definitions/Team"},
                        {"$ref": "#/definitions/User"}
                    ]
                }
            },
            {"name": "X-Request-Id", "in": "header", "type": "string"},
            {"name": "X-Merge-Token", "in": "header", "type": "string", "required": true}
        ])
    );

    registry
        .annotate(handler("teams.archived"))
        .produces([Descriptor::model::<archive::Team>()], ProducesOptions::default());
    routes.push(RegisteredRoute::new(
        "archived_teams",
        "/teams/archived",
        [Method::GET],
        handler("teams.archived"),
    ));

    let err = SwaggerGenerator::new()
        .generate(&routes, &registry, &mut definitions)
        .unwrap_err();
    let DocsError::Assembly { errors } = err else {
        panic!("expected an aggregate error");
    };
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        DocsError::DuplicateDefinition { name } if name == "Team"
    ));
}
