//! Swagger 2.0 document types.
//!
//! These types follow the Swagger 2.0 specification:
//! <https://swagger.io/specification/v2/>
//!
//! Schemas and parameters are kept as JSON fragments produced by the
//! resolver rather than typed structs, so whatever the field model emits
//! passes through unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use routedoc_config::{DocsConfig, SecurityScheme};
use routedoc_core::Fragment;

use crate::error::{DocsError, DocsResult};

/// Swagger document root object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Swagger {
    /// Swagger version, always `"2.0"`.
    pub swagger: String,
    /// API metadata.
    pub info: Info,
    /// Host serving the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Base path of every route.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "basePath")]
    pub base_path: Option<String>,
    /// Transfer protocols.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    /// Default request content types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    /// Default response content types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    /// Security schemes by name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    #[serde(rename = "securityDefinitions")]
    pub security_definitions: IndexMap<String, SecurityScheme>,
    /// Global security requirements.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<IndexMap<String, Vec<String>>>,
    /// Tags used by the operations, in first-use order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    /// Operations keyed by path template.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Object definitions referenced via `#/definitions/<name>`.
    #[serde(default)]
    pub definitions: IndexMap<String, Fragment>,
}

impl Swagger {
    /// An empty document carrying the configured metadata.
    pub fn from_config(config: &DocsConfig) -> Self {
        let document = &config.document;
        Self {
            swagger: "2.0".to_string(),
            info: Info::from_config(config),
            host: document.host.clone(),
            base_path: document.base_path.clone(),
            schemes: document.schemes.clone(),
            consumes: document.consumes.clone(),
            produces: document.produces.clone(),
            security_definitions: config.security_definitions.clone(),
            security: config.security.clone(),
            tags: Vec::new(),
            paths: IndexMap::new(),
            definitions: IndexMap::new(),
        }
    }

    /// The document as a JSON value.
    pub fn to_value(&self) -> DocsResult<Value> {
        serde_json::to_value(self).map_err(DocsError::from)
    }

    /// The document as pretty-printed JSON.
    pub fn to_json(&self) -> DocsResult<String> {
        serde_json::to_string_pretty(self).map_err(DocsError::from)
    }
}

/// API metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Terms of service URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "termsOfService")]
    pub terms_of_service: Option<String>,
    /// Contact information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    /// License information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

impl Info {
    fn from_config(config: &DocsConfig) -> Self {
        let info = &config.info;
        Self {
            title: info.title.clone(),
            version: info.version.clone(),
            description: info.description.clone(),
            terms_of_service: info.terms_of_service.clone(),
            contact: info.contact_email.clone().map(|email| Contact { email: Some(email) }),
            license: info.license_name.clone().map(|name| License {
                name,
                url: info.license_url.clone(),
            }),
        }
    }
}

/// Contact information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Contact {
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// License information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct License {
    /// License name.
    pub name: String,
    /// License URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Tag for grouping operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Tag name.
    pub name: String,
    /// Tag description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Operations available on a single path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// OPTIONS operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
}

impl PathItem {
    /// Place `operation` under `method`.
    ///
    /// # Errors
    ///
    /// Returns `DocsError::InvalidOperation` for methods Swagger 2.0 cannot
    /// describe (`TRACE`, `CONNECT`, extensions).
    pub fn set(&mut self, method: &http::Method, operation: Operation) -> DocsResult<()> {
        let slot = match method.as_str() {
            "GET" => &mut self.get,
            "PUT" => &mut self.put,
            "POST" => &mut self.post,
            "DELETE" => &mut self.delete,
            "OPTIONS" => &mut self.options,
            "HEAD" => &mut self.head,
            "PATCH" => &mut self.patch,
            _ => {
                return Err(DocsError::InvalidOperation {
                    operation_id: operation.operation_id,
                    reason: format!("unsupported HTTP method: {method}"),
                })
            }
        };
        *slot = Some(operation);
        Ok(())
    }

    /// The operation documented for `method`, if any.
    pub fn get_operation(&self, method: &http::Method) -> Option<&Operation> {
        match method.as_str() {
            "GET" => self.get.as_ref(),
            "PUT" => self.put.as_ref(),
            "POST" => self.post.as_ref(),
            "DELETE" => self.delete.as_ref(),
            "OPTIONS" => self.options.as_ref(),
            "HEAD" => self.head.as_ref(),
            "PATCH" => self.patch.as_ref(),
            _ => None,
        }
    }
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Operation identifier.
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Full description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Tags for grouping.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Request content types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    /// Response content types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    /// Parameters as resolved fragments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Fragment>,
    /// Responses by status code.
    pub responses: IndexMap<String, Response>,
}

/// A response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    /// Response description.
    pub description: String,
    /// Body schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Fragment>,
    /// Examples by content type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Value>,
}
