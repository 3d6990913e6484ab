//! Type resolution.
//!
//! [`resolve`] turns any [`Descriptor`] into a schema fragment. A descriptor
//! is either a type reference ("an integer", "the `User` model") or an
//! instance (a configured [`Field`], a mapping of property descriptors, a
//! sequence of item descriptors, or an arbitrary value).

use indexmap::IndexMap;
use serde_json::Value;

use crate::definitions::Definitions;
use crate::field::{dictionary_fragment, list_fragment, Field, FieldKind, Fragment};
use crate::model::{Describe, Model, ModelRef};

/// Native primitive types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Integer.
    Integer,
    /// String.
    String,
    /// Boolean.
    Boolean,
    /// Floating point number.
    Float,
    /// Calendar date.
    Date,
    /// Date and time.
    DateTime,
}

impl Primitive {
    /// The leaf field for this primitive.
    pub fn field(self) -> Field {
        match self {
            Self::Integer => Field::integer(),
            Self::String => Field::string(),
            Self::Boolean => Field::boolean(),
            Self::Float => Field::float(),
            Self::Date => Field::date(),
            Self::DateTime => Field::datetime(),
        }
    }
}

/// A reference to a type rather than a configured instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A field variant, instantiated with no arguments.
    Field(FieldKind),
    /// The generic mapping container.
    Dict,
    /// The generic sequence container.
    List,
    /// A native primitive.
    Primitive(Primitive),
    /// A user-declared model.
    Model(ModelRef),
}

/// Anything the resolver accepts.
#[derive(Debug, Clone)]
pub enum Descriptor {
    /// A type reference.
    Type(TypeRef),
    /// A configured field.
    Field(Field),
    /// Property name to property descriptor, in insertion order.
    Map(IndexMap<String, Descriptor>),
    /// Item descriptors.
    Seq(Vec<Descriptor>),
    /// Any other value; resolves to the empty fragment.
    Value(Value),
}

impl Descriptor {
    /// The descriptor registered for `T`.
    pub fn of<T: Describe + ?Sized>() -> Self {
        T::descriptor()
    }

    /// A reference to the model `M`.
    pub fn model<M: Model>() -> Self {
        Self::Type(TypeRef::Model(ModelRef::of::<M>()))
    }

    /// Build a mapping descriptor from `(name, descriptor)` pairs.
    pub fn map<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Descriptor)>,
        K: Into<String>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// The field attributes carried by this descriptor, if it is a field.
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field(field) => Some(field),
            _ => None,
        }
    }
}

impl From<Field> for Descriptor {
    fn from(field: Field) -> Self {
        Self::Field(field)
    }
}

impl From<TypeRef> for Descriptor {
    fn from(type_ref: TypeRef) -> Self {
        Self::Type(type_ref)
    }
}

impl From<Primitive> for Descriptor {
    fn from(primitive: Primitive) -> Self {
        Self::Type(TypeRef::Primitive(primitive))
    }
}

impl From<FieldKind> for Descriptor {
    fn from(kind: FieldKind) -> Self {
        Self::Type(TypeRef::Field(kind))
    }
}

impl From<ModelRef> for Descriptor {
    fn from(model: ModelRef) -> Self {
        Self::Type(TypeRef::Model(model))
    }
}

impl From<Vec<Descriptor>> for Descriptor {
    fn from(items: Vec<Descriptor>) -> Self {
        Self::Seq(items)
    }
}

impl From<IndexMap<String, Descriptor>> for Descriptor {
    fn from(fields: IndexMap<String, Descriptor>) -> Self {
        Self::Map(fields)
    }
}

/// JSON objects become mappings and arrays become sequences; scalars stay
/// opaque values.
impl From<Value> for Descriptor {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(object) => Self::Map(
                object
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
            Value::Array(items) => Self::Seq(items.into_iter().map(Self::from).collect()),
            scalar => Self::Value(scalar),
        }
    }
}

/// Resolve a descriptor into a schema fragment.
///
/// Never fails: descriptors without a schema meaning resolve to `{}`.
///
/// # Example
///
/// ```
/// use routedoc_core::{resolve, Definitions, Descriptor};
/// use serde_json::json;
///
/// let mut definitions = Definitions::new();
/// let fragment = resolve(&Descriptor::of::<i32>(), &mut definitions);
/// assert_eq!(serde_json::Value::Object(fragment), json!({"type": "integer", "format": "int64"}));
/// ```
pub fn resolve(descriptor: &Descriptor, definitions: &mut Definitions) -> Fragment {
    match descriptor {
        Descriptor::Type(type_ref) => resolve_type(type_ref, definitions),
        Descriptor::Field(field) => field.serialize(definitions),
        Descriptor::Map(fields) => dictionary_fragment(fields, definitions),
        Descriptor::Seq(items) => list_fragment(items, definitions),
        Descriptor::Value(_) => Fragment::new(),
    }
}

fn resolve_type(type_ref: &TypeRef, definitions: &mut Definitions) -> Fragment {
    match type_ref {
        TypeRef::Field(kind) => kind.instantiate().serialize(definitions),
        TypeRef::Dict => FieldKind::Dictionary.instantiate().serialize(definitions),
        TypeRef::List => FieldKind::List.instantiate().serialize(definitions),
        TypeRef::Primitive(primitive) => primitive.field().serialize(definitions),
        TypeRef::Model(model) => Field::object(*model).serialize(definitions),
    }
}
