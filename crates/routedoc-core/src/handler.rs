//! Handler identity used to key the route registry.

use std::borrow::Cow;
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Stable identity of a route handler.
///
/// The host framework hands the same identity to the documentation
/// generator for every registered route, so it must be stable across
/// lookups. Two ways to obtain one:
///
/// - [`HandlerId::new`] with an explicit name (e.g. `"users::get_user"`);
/// - [`HandlerId::of`] with the handler function itself, using the type path
///   of the function item.
///
/// # Example
///
/// ```
/// use routedoc_core::HandlerId;
///
/// fn get_user() {}
///
/// let id = HandlerId::of(&get_user).unwrap();
/// assert!(id.as_str().ends_with("get_user"));
///
/// let named = HandlerId::new("users.get").unwrap();
/// assert_eq!(named.as_str(), "users.get");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(Cow<'static, str>);

impl HandlerId {
    /// Create a handler identity from an explicit name.
    ///
    /// Blank names are rejected.
    pub fn new(name: impl Into<Cow<'static, str>>) -> CoreResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::unstable_handler(
                name.into_owned(),
                "handler name is empty",
            ));
        }
        Ok(Self(name))
    }

    /// Derive the identity of a handler function from its type path.
    ///
    /// Every function item has a distinct type, so its type path is unique
    /// within a program. Closures and function pointers do not have that
    /// property and are rejected.
    pub fn of<F: 'static>(_handler: &F) -> CoreResult<Self> {
        let name = std::any::type_name::<F>();
        if name.contains("{{closure}}") {
            return Err(CoreError::unstable_handler(
                name,
                "closures have no stable name",
            ));
        }
        if name.starts_with("fn(") || name.starts_with("unsafe fn(") || name.starts_with("extern ") {
            return Err(CoreError::unstable_handler(
                name,
                "function pointers share one type per signature",
            ));
        }
        Self::new(name)
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
