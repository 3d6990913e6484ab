//! Configuration types.
//!
//! [`DocsConfig`] is the root; each section defaults independently so a
//! file only needs to spell out what it changes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

const KNOWN_SCHEMES: [&str; 4] = ["http", "https", "ws", "wss"];

/// Complete document generation configuration.
///
/// # Example
///
/// ```
/// use routedoc_config::DocsConfig;
///
/// let config = DocsConfig::default();
/// assert_eq!(config.info.title, "API");
/// assert_eq!(config.document.consumes, ["application/json"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    /// The `info` block of the document.
    #[serde(default)]
    pub info: InfoConfig,

    /// Top-level document options.
    #[serde(default)]
    pub document: DocumentConfig,

    /// Security schemes by name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub security_definitions: IndexMap<String, SecurityScheme>,

    /// Global security requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<IndexMap<String, Vec<String>>>,

    /// Logging options.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DocsConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - the title or version is empty
    /// - the base path does not start with `/`
    /// - a scheme is not one of `http`, `https`, `ws`, `wss`
    /// - a global security requirement names an undefined scheme
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.info.title.trim().is_empty() {
            return Err(ConfigError::invalid_value("info.title", "must not be empty"));
        }
        if self.info.version.trim().is_empty() {
            return Err(ConfigError::invalid_value("info.version", "must not be empty"));
        }

        if let Some(base_path) = &self.document.base_path {
            if !base_path.starts_with('/') {
                return Err(ConfigError::invalid_value(
                    "document.base_path",
                    format!("must start with '/': {base_path}"),
                ));
            }
        }

        if let Some(scheme) = self
            .document
            .schemes
            .iter()
            .find(|s| !KNOWN_SCHEMES.contains(&s.as_str()))
        {
            return Err(ConfigError::invalid_value(
                "document.schemes",
                format!("unknown scheme: {scheme}"),
            ));
        }

        for requirement in &self.security {
            if let Some(name) = requirement
                .keys()
                .find(|name| !self.security_definitions.contains_key(*name))
            {
                return Err(ConfigError::invalid_value(
                    "security",
                    format!("undefined security scheme: {name}"),
                ));
            }
        }

        Ok(())
    }
}

/// The document's `info` block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InfoConfig {
    /// API title.
    #[serde(default = "default_title")]
    pub title: String,

    /// API version.
    #[serde(default = "default_version")]
    pub version: String,

    /// API description.
    #[serde(default)]
    pub description: Option<String>,

    /// Terms of service URL.
    #[serde(default)]
    pub terms_of_service: Option<String>,

    /// Contact email.
    #[serde(default)]
    pub contact_email: Option<String>,

    /// License name.
    #[serde(default)]
    pub license_name: Option<String>,

    /// License URL.
    #[serde(default)]
    pub license_url: Option<String>,
}

fn default_title() -> String {
    "API".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_version(),
            description: None,
            terms_of_service: None,
            contact_email: None,
            license_name: None,
            license_url: None,
        }
    }
}

/// How trailing-slash duplicates of a path are treated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UriFilter {
    /// Drop paths ending in `/` (other than `/` itself).
    #[default]
    Default,
    /// Keep every path.
    All,
}

impl UriFilter {
    /// Whether `path` is kept in the document.
    pub fn keeps(self, path: &str) -> bool {
        match self {
            Self::Default => path == "/" || !path.ends_with('/'),
            Self::All => true,
        }
    }
}

/// Top-level document options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DocumentConfig {
    /// Host serving the API.
    #[serde(default)]
    pub host: Option<String>,

    /// Base path of every route.
    #[serde(default)]
    pub base_path: Option<String>,

    /// Transfer protocols.
    #[serde(default)]
    pub schemes: Vec<String>,

    /// Default request content types.
    #[serde(default = "default_content_types")]
    pub consumes: Vec<String>,

    /// Default response content types.
    #[serde(default = "default_content_types")]
    pub produces: Vec<String>,

    /// Trailing-slash filter.
    #[serde(default)]
    pub uri_filter: UriFilter,

    /// Blueprints whose routes are never documented.
    #[serde(default = "default_excluded_blueprints")]
    pub exclude_blueprints: Vec<String>,
}

fn default_content_types() -> Vec<String> {
    vec!["application/json".to_string()]
}

fn default_excluded_blueprints() -> Vec<String> {
    vec!["openapi".to_string(), "swagger".to_string()]
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            host: None,
            base_path: None,
            schemes: Vec::new(),
            consumes: default_content_types(),
            produces: default_content_types(),
            uri_filter: UriFilter::default(),
            exclude_blueprints: default_excluded_blueprints(),
        }
    }
}

/// Security scheme definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityScheme {
    /// `basic`, `apiKey` or `oauth2`.
    #[serde(rename = "type")]
    pub scheme_type: String,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Header or query parameter name (for `apiKey`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// `header` or `query` (for `apiKey`).
    #[serde(default, rename = "in", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// OAuth2 flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,

    /// OAuth2 authorization URL.
    #[serde(
        default,
        rename = "authorizationUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub authorization_url: Option<String>,

    /// OAuth2 token URL.
    #[serde(default, rename = "tokenUrl", skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,

    /// OAuth2 scopes.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub scopes: IndexMap<String, String>,
}

impl SecurityScheme {
    /// An API key carried in a header.
    pub fn api_key_header(header_name: impl Into<String>) -> Self {
        Self {
            scheme_type: "apiKey".to_string(),
            description: None,
            name: Some(header_name.into()),
            location: Some("header".to_string()),
            flow: None,
            authorization_url: None,
            token_url: None,
            scopes: IndexMap::new(),
        }
    }

    /// HTTP basic authentication.
    pub fn basic() -> Self {
        Self {
            scheme_type: "basic".to_string(),
            description: None,
            name: None,
            location: None,
            flow: None,
            authorization_url: None,
            token_url: None,
            scopes: IndexMap::new(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// JSON lines.
    Json,
}

/// Logging options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Whether logging is initialised at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive, e.g. `info` or `routedoc_docs=debug`.
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DocsConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.info.version, "1.0.0");
        assert_eq!(config.document.uri_filter, UriFilter::Default);
        assert_eq!(config.document.exclude_blueprints, ["openapi", "swagger"]);
        assert!(config.logging.enabled);
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let mut config = DocsConfig::default();
        config.info.title = "  ".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("info.title"));
    }

    #[test]
    fn test_base_path_must_be_absolute() {
        let mut config = DocsConfig::default();
        config.document.base_path = Some("v1".to_string());
        assert!(config.validate().is_err());

        config.document.base_path = Some("/v1".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        let mut config = DocsConfig::default();
        config.document.schemes = vec!["https".to_string(), "gopher".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("gopher"));
    }

    #[test]
    fn test_security_requirement_must_be_defined() {
        let mut config = DocsConfig::default();
        let mut requirement = IndexMap::new();
        requirement.insert("ApiKey".to_string(), Vec::new());
        config.security.push(requirement);
        assert!(config.validate().is_err());

        config
            .security_definitions
            .insert("ApiKey".to_string(), SecurityScheme::api_key_header("X-Api-Key"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_uri_filter() {
        assert!(UriFilter::Default.keeps("/"));
        assert!(UriFilter::Default.keeps("/users"));
        assert!(!UriFilter::Default.keeps("/users/"));
        assert!(UriFilter::All.keeps("/users/"));
    }

    #[test]
    fn test_security_scheme_serialization() {
        let json = serde_json::to_value(SecurityScheme::api_key_header("X-Api-Key")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "apiKey", "name": "X-Api-Key", "in": "header"})
        );
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result: Result<DocsConfig, _> = toml::from_str("[info]\nauthor = \"me\"\n");
        assert!(result.is_err());
    }
}
