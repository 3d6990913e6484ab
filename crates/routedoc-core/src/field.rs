//! Schema field model.
//!
//! A [`Field`] is one node of an OpenAPI 2.0 schema: a leaf with a fixed
//! `type`/`format` pair, a container (dictionary, list, tuple) whose children
//! are [`Descriptor`]s resolved recursively, or an object reference backed by
//! a [`Model`](crate::Model) definition.
//!
//! Every field also carries [`FieldAttrs`], the attributes shared by all
//! variants (name, description, required, default, enum, location). Only the
//! attributes that are present are serialized.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::definitions::Definitions;
use crate::model::ModelRef;
use crate::resolve::{resolve, Descriptor};

/// A serialized schema fragment.
///
/// Key order is insertion order, so generated documents are reproducible.
pub type Fragment = Map<String, Value>;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Location {
    /// Query string parameter.
    Query,
    /// HTTP header.
    Header,
    /// URL path parameter.
    Path,
    /// Request body.
    Body,
    /// Form field.
    FormData,
}

impl Location {
    /// The OpenAPI name of the location.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::Body => "body",
            Self::FormData => "formData",
        }
    }
}

/// Attributes shared by every field variant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAttrs {
    /// Field or parameter name. Omitted when empty.
    pub name: Option<String>,
    /// Human readable description. Omitted when empty.
    pub description: Option<String>,
    /// Whether the value is required.
    pub required: Option<bool>,
    /// Default value.
    pub default: Option<Value>,
    /// Allowed values.
    pub enum_values: Option<Vec<Value>>,
    /// Parameter location, serialized as `in`.
    pub location: Option<Location>,
}

impl FieldAttrs {
    /// Serialize the present attributes.
    pub fn to_fragment(&self) -> Fragment {
        let mut fragment = Fragment::new();
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            fragment.insert("name".into(), Value::from(name));
        }
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            fragment.insert("description".into(), Value::from(description));
        }
        if let Some(required) = self.required {
            fragment.insert("required".into(), Value::Bool(required));
        }
        if let Some(default) = &self.default {
            fragment.insert("default".into(), default.clone());
        }
        if let Some(values) = &self.enum_values {
            fragment.insert("enum".into(), Value::Array(values.clone()));
        }
        if let Some(location) = self.location {
            fragment.insert("in".into(), Value::from(location.as_str()));
        }
        fragment
    }

    // Variant keys are already in `fragment` and win on conflict.
    fn merge_into(&self, fragment: &mut Fragment) {
        for (key, value) in self.to_fragment() {
            fragment.entry(key).or_insert(value);
        }
    }
}

/// Field variant types, used as no-argument type references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// 64-bit integer.
    Integer,
    /// Floating point number.
    Float,
    /// String.
    String,
    /// Boolean.
    Boolean,
    /// Calendar date.
    Date,
    /// Date and time.
    DateTime,
    /// File upload.
    File,
    /// Object with named properties.
    Dictionary,
    /// Array.
    List,
    /// Positional array.
    Tuple,
}

impl FieldKind {
    /// Instantiate the variant with no arguments.
    pub fn instantiate(self) -> Field {
        match self {
            Self::Integer => Field::integer(),
            Self::Float => Field::float(),
            Self::String => Field::string(),
            Self::Boolean => Field::boolean(),
            Self::Date => Field::date(),
            Self::DateTime => Field::datetime(),
            Self::File => Field::file(),
            Self::Dictionary => Field::dictionary(IndexMap::new()),
            Self::List => Field::list(Vec::new()),
            Self::Tuple => Field::tuple(Vec::new()),
        }
    }
}

/// The variant-specific part of a [`Field`].
#[derive(Debug, Clone)]
pub enum FieldType {
    /// `integer` / `int64`.
    Integer {
        /// Inclusive lower bound.
        minimum: Option<Value>,
        /// Inclusive upper bound.
        maximum: Option<Value>,
    },
    /// `number` / `float`.
    Float {
        /// Inclusive lower bound.
        minimum: Option<Value>,
        /// Inclusive upper bound.
        maximum: Option<Value>,
    },
    /// `string`.
    String,
    /// `boolean`.
    Boolean,
    /// `string` / `date`.
    Date,
    /// `string` / `date-time`.
    DateTime,
    /// `file`.
    File,
    /// Object with properties in declaration order.
    Dictionary(IndexMap<String, Descriptor>),
    /// Array of the given item descriptors.
    List(Vec<Descriptor>),
    /// Positional array of the given item descriptors.
    Tuple(Vec<Descriptor>),
    /// Reference to a model definition.
    Object {
        /// The referenced model.
        model: ModelRef,
        /// Definition name override.
        object_name: Option<String>,
    },
}

/// A schema node.
///
/// # Example
///
/// ```
/// use routedoc_core::{Definitions, Field};
/// use serde_json::json;
///
/// let mut definitions = Definitions::new();
/// let field = Field::integer().name("limit").minimum(1).maximum(100);
///
/// assert_eq!(
///     serde_json::Value::Object(field.serialize(&mut definitions)),
///     json!({"type": "integer", "format": "int64", "minimum": 1, "maximum": 100, "name": "limit"})
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    attrs: FieldAttrs,
    field_type: FieldType,
}

impl Field {
    fn with_type(field_type: FieldType) -> Self {
        Self {
            attrs: FieldAttrs::default(),
            field_type,
        }
    }

    /// An integer field.
    pub fn integer() -> Self {
        Self::with_type(FieldType::Integer {
            minimum: None,
            maximum: None,
        })
    }

    /// A floating point field.
    pub fn float() -> Self {
        Self::with_type(FieldType::Float {
            minimum: None,
            maximum: None,
        })
    }

    /// A string field.
    pub fn string() -> Self {
        Self::with_type(FieldType::String)
    }

    /// A boolean field.
    pub fn boolean() -> Self {
        Self::with_type(FieldType::Boolean)
    }

    /// A date field.
    pub fn date() -> Self {
        Self::with_type(FieldType::Date)
    }

    /// A date-time field.
    pub fn datetime() -> Self {
        Self::with_type(FieldType::DateTime)
    }

    /// A file field.
    pub fn file() -> Self {
        Self::with_type(FieldType::File)
    }

    /// An object field with the given properties.
    pub fn dictionary(fields: IndexMap<String, Descriptor>) -> Self {
        Self::with_type(FieldType::Dictionary(fields))
    }

    /// An array field.
    ///
    /// A sequence descriptor supplies the item descriptors; any other
    /// descriptor becomes the single item.
    pub fn list(items: impl Into<Descriptor>) -> Self {
        let items = match items.into() {
            Descriptor::Seq(items) => items,
            single => vec![single],
        };
        Self::with_type(FieldType::List(items))
    }

    /// A positional array field.
    pub fn tuple(items: Vec<Descriptor>) -> Self {
        Self::with_type(FieldType::Tuple(items))
    }

    /// A reference to a model definition.
    pub fn object(model: ModelRef) -> Self {
        Self::with_type(FieldType::Object {
            model,
            object_name: None,
        })
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.attrs.name = Some(name.into());
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.attrs.description = Some(description.into());
        self
    }

    /// Set whether the value is required.
    pub fn required(mut self, required: bool) -> Self {
        self.attrs.required = Some(required);
        self
    }

    /// Set the default value.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.attrs.default = Some(value.into());
        self
    }

    /// Set the allowed values.
    pub fn enum_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.attrs.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set the parameter location.
    pub fn location(mut self, location: Location) -> Self {
        self.attrs.location = Some(location);
        self
    }

    /// Set the inclusive lower bound. Ignored for non-numeric fields.
    pub fn minimum(mut self, value: impl Into<Value>) -> Self {
        if let FieldType::Integer { minimum, .. } | FieldType::Float { minimum, .. } =
            &mut self.field_type
        {
            *minimum = Some(value.into());
        }
        self
    }

    /// Set the inclusive upper bound. Ignored for non-numeric fields.
    pub fn maximum(mut self, value: impl Into<Value>) -> Self {
        if let FieldType::Integer { maximum, .. } | FieldType::Float { maximum, .. } =
            &mut self.field_type
        {
            *maximum = Some(value.into());
        }
        self
    }

    /// Override the definition name of an object field. Ignored otherwise.
    pub fn object_name(mut self, name: impl Into<String>) -> Self {
        if let FieldType::Object { object_name, .. } = &mut self.field_type {
            *object_name = Some(name.into());
        }
        self
    }

    /// The shared attributes.
    pub fn attrs(&self) -> &FieldAttrs {
        &self.attrs
    }

    /// The variant-specific part.
    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    /// Serialize the field into a fresh fragment.
    ///
    /// Leaf variants never touch `definitions`. Containers resolve their
    /// children through it, and object fields register their model the first
    /// time it is seen.
    pub fn serialize(&self, definitions: &mut Definitions) -> Fragment {
        let mut fragment = match &self.field_type {
            FieldType::Integer { minimum, maximum } => {
                numeric_fragment("integer", "int64", minimum.as_ref(), maximum.as_ref())
            }
            FieldType::Float { minimum, maximum } => {
                numeric_fragment("number", "float", minimum.as_ref(), maximum.as_ref())
            }
            FieldType::String => typed("string", None),
            FieldType::Boolean => typed("boolean", None),
            FieldType::Date => typed("string", Some("date")),
            FieldType::DateTime => typed("string", Some("date-time")),
            FieldType::File => typed("file", None),
            FieldType::Dictionary(fields) => dictionary_fragment(fields, definitions),
            FieldType::List(items) => list_fragment(items, definitions),
            FieldType::Tuple(items) => tuple_fragment(items, definitions),
            FieldType::Object { model, object_name } => {
                let name = object_name.as_deref().unwrap_or_else(|| model.name());
                definitions.register_if_absent(model, name, &self.attrs);
                reference_fragment(name)
            }
        };
        self.attrs.merge_into(&mut fragment);
        fragment
    }
}

fn typed(schema_type: &str, format: Option<&str>) -> Fragment {
    let mut fragment = Fragment::new();
    fragment.insert("type".into(), Value::from(schema_type));
    if let Some(format) = format {
        fragment.insert("format".into(), Value::from(format));
    }
    fragment
}

fn numeric_fragment(
    schema_type: &str,
    format: &str,
    minimum: Option<&Value>,
    maximum: Option<&Value>,
) -> Fragment {
    let mut fragment = typed(schema_type, Some(format));
    if let Some(minimum) = minimum {
        fragment.insert("minimum".into(), minimum.clone());
    }
    if let Some(maximum) = maximum {
        fragment.insert("maximum".into(), maximum.clone());
    }
    fragment
}

/// `{"$ref": "#/definitions/<name>"}`.
pub(crate) fn reference_fragment(name: &str) -> Fragment {
    let mut fragment = Fragment::new();
    fragment.insert("$ref".into(), Value::from(format!("#/definitions/{name}")));
    fragment
}

pub(crate) fn properties_fragment<'a, I>(fields: I, definitions: &mut Definitions) -> Fragment
where
    I: IntoIterator<Item = (&'a str, &'a Descriptor)>,
{
    fields
        .into_iter()
        .map(|(key, descriptor)| {
            (
                key.to_string(),
                Value::Object(resolve(descriptor, definitions)),
            )
        })
        .collect()
}

pub(crate) fn dictionary_fragment(
    fields: &IndexMap<String, Descriptor>,
    definitions: &mut Definitions,
) -> Fragment {
    let properties = properties_fragment(
        fields.iter().map(|(key, descriptor)| (key.as_str(), descriptor)),
        definitions,
    );
    let mut fragment = typed("object", None);
    fragment.insert("properties".into(), Value::Object(properties));
    fragment
}

pub(crate) fn list_fragment(items: &[Descriptor], definitions: &mut Definitions) -> Fragment {
    let items_schema = match items {
        [] => Fragment::new(),
        [only] => resolve(only, definitions),
        many => tuple_fragment(many, definitions),
    };
    let mut fragment = typed("array", None);
    fragment.insert("items".into(), Value::Object(items_schema));
    fragment
}

fn tuple_fragment(items: &[Descriptor], definitions: &mut Definitions) -> Fragment {
    let schemas = items
        .iter()
        .map(|item| Value::Object(resolve(item, definitions)))
        .collect();
    let mut fragment = typed("array", None);
    fragment.insert("items".into(), Value::Array(schemas));
    fragment
}
