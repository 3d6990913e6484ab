//! Path template conversion.
//!
//! Host routes spell parameters as `<name>` or `<name:converter>`; Swagger
//! wants `{name}`. Converters map onto parameter types:
//!
//! | Converter          | Parameter type |
//! |--------------------|----------------|
//! | `int`              | `integer`      |
//! | `number`, `float`  | `number`       |
//! | anything else      | `string`       |

use std::sync::OnceLock;

use regex::Regex;

use routedoc_core::{Field, Location};

use crate::error::{DocsError, DocsResult};

fn segment_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"<([^<>{}:/]+)(?::([^<>]*))?>|\{([^<>{}/]+)\}").expect("valid regex")
    })
}

/// Type of a path parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathParamKind {
    /// `int` converter.
    Integer,
    /// `number` or `float` converter.
    Number,
    /// Any other converter, or none.
    String,
}

impl PathParamKind {
    fn from_converter(converter: Option<&str>) -> Self {
        match converter.map(str::trim) {
            Some("int") => Self::Integer,
            Some("number" | "float") => Self::Number,
            _ => Self::String,
        }
    }
}

/// A parameter captured from a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParameter {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub kind: PathParamKind,
}

impl PathParameter {
    /// The parameter as a required `in: path` field.
    pub fn field(&self) -> Field {
        let field = match self.kind {
            PathParamKind::Integer => Field::integer(),
            PathParamKind::Number => Field::float(),
            PathParamKind::String => Field::string(),
        };
        field
            .name(self.name.clone())
            .required(true)
            .location(Location::Path)
    }
}

/// A host path rewritten into Swagger syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    /// The path with every parameter spelled `{name}`.
    pub path: String,
    /// Parameters in path order.
    pub parameters: Vec<PathParameter>,
}

impl PathTemplate {
    /// Convert a host path.
    ///
    /// # Errors
    ///
    /// Returns `DocsError::InvalidPath` for unbalanced `<`/`>`/`{`/`}` or a
    /// parameter name used twice.
    ///
    /// # Example
    ///
    /// ```
    /// use routedoc_docs::{PathParamKind, PathTemplate};
    ///
    /// let template = PathTemplate::parse("/users/<id:int>/posts/<slug>").unwrap();
    /// assert_eq!(template.path, "/users/{id}/posts/{slug}");
    /// assert_eq!(template.parameters[0].kind, PathParamKind::Integer);
    /// assert_eq!(template.parameters[1].kind, PathParamKind::String);
    /// ```
    pub fn parse(path: &str) -> DocsResult<Self> {
        let mut converted = String::with_capacity(path.len());
        let mut parameters: Vec<PathParameter> = Vec::new();
        let mut last = 0;

        for captures in segment_regex().captures_iter(path) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            check_literal(path, &path[last..whole.start()])?;
            converted.push_str(&path[last..whole.start()]);

            let (name, kind) = match (captures.get(1), captures.get(3)) {
                (Some(name), _) => (
                    name.as_str().trim(),
                    PathParamKind::from_converter(captures.get(2).map(|c| c.as_str())),
                ),
                (None, Some(name)) => (name.as_str().trim(), PathParamKind::String),
                (None, None) => continue,
            };

            if name.is_empty() {
                return Err(invalid(path, "empty parameter name"));
            }
            if parameters.iter().any(|p| p.name == name) {
                return Err(invalid(path, format!("duplicate parameter '{name}'")));
            }

            converted.push('{');
            converted.push_str(name);
            converted.push('}');
            parameters.push(PathParameter {
                name: name.to_string(),
                kind,
            });
            last = whole.end();
        }

        check_literal(path, &path[last..])?;
        converted.push_str(&path[last..]);

        Ok(Self {
            path: converted,
            parameters,
        })
    }
}

fn check_literal(path: &str, literal: &str) -> DocsResult<()> {
    match literal.chars().find(|c| matches!(c, '<' | '>' | '{' | '}')) {
        Some(c) => Err(invalid(path, format!("unbalanced '{c}'"))),
        None => Ok(()),
    }
}

fn invalid(path: &str, reason: impl Into<String>) -> DocsError {
    DocsError::InvalidPath {
        path: path.to_string(),
        reason: reason.into(),
    }
}
