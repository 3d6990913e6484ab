//! Routes as registered with the host framework.

use http::Method;

use routedoc_core::HandlerId;

/// A route known to the host router.
///
/// # Example
///
/// ```
/// use http::Method;
/// use routedoc_core::HandlerId;
/// use routedoc_docs::RegisteredRoute;
///
/// let handler = HandlerId::new("users.get").unwrap();
/// let route = RegisteredRoute::new("get_user", "/users/<id:int>", [Method::GET], handler)
///     .in_blueprint("users");
///
/// assert_eq!(route.blueprint.as_deref(), Some("users"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredRoute {
    /// Route name, used as the operation ID fallback.
    pub name: String,
    /// Path template in host syntax, e.g. `/users/<id:int>`.
    pub path: String,
    /// Methods the route answers to.
    pub methods: Vec<Method>,
    /// Handler identity used to look up the route's documentation.
    pub handler: HandlerId,
    /// Blueprint the route is mounted under.
    pub blueprint: Option<String>,
}

impl RegisteredRoute {
    /// Create a route outside any blueprint.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        methods: impl IntoIterator<Item = Method>,
        handler: HandlerId,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            methods: methods.into_iter().collect(),
            handler,
            blueprint: None,
        }
    }

    /// Mount the route under `blueprint`.
    pub fn in_blueprint(mut self, blueprint: impl Into<String>) -> Self {
        self.blueprint = Some(blueprint.into());
        self
    }

    /// Methods that end up in the document; `OPTIONS` and `HEAD` are
    /// answered by the host itself.
    pub(crate) fn documented_methods(&self) -> impl Iterator<Item = &Method> {
        self.methods
            .iter()
            .filter(|method| **method != Method::OPTIONS && **method != Method::HEAD)
    }
}
