//! User-declared object models.
//!
//! A model lists its fields explicitly, in declaration order, instead of
//! having them discovered at runtime. Each model gets one shared definition
//! in the generated document and is referenced everywhere else via `$ref`.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::resolve::{Descriptor, Primitive, TypeRef};

/// A user-declared object schema.
///
/// # Example
///
/// ```
/// use routedoc_core::{Descriptor, Model};
///
/// struct User;
///
/// impl Model for User {
///     fn fields() -> Vec<(&'static str, Descriptor)> {
///         vec![
///             ("id", Descriptor::of::<i64>()),
///             ("name", Descriptor::of::<String>()),
///         ]
///     }
/// }
///
/// assert_eq!(User::name(), "User");
/// ```
pub trait Model: 'static {
    /// Definition name. Defaults to the unqualified type name.
    fn name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Declared fields in declaration order.
    ///
    /// Names starting with `_` are private and left out of the definition.
    /// When a name is declared twice the last declaration wins.
    fn fields() -> Vec<(&'static str, Descriptor)>;
}

/// Strip the module path from a type name, keeping generic arguments.
fn short_type_name(full: &'static str) -> &'static str {
    let base_end = full.find('<').unwrap_or(full.len());
    let start = full[..base_end].rfind("::").map_or(0, |idx| idx + 2);
    &full[start..]
}

/// Type-erased handle to a [`Model`], usable as a registry key.
///
/// Equality and hashing go through the model's `TypeId`.
#[derive(Clone, Copy)]
pub struct ModelRef {
    id: TypeId,
    name: &'static str,
    fields: fn() -> Vec<(&'static str, Descriptor)>,
}

impl ModelRef {
    /// Handle for the model `M`.
    pub fn of<M: Model>() -> Self {
        Self {
            id: TypeId::of::<M>(),
            name: M::name(),
            fields: M::fields,
        }
    }

    /// The model's own name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The model's declared fields.
    pub fn fields(&self) -> Vec<(&'static str, Descriptor)> {
        (self.fields)()
    }
}

impl PartialEq for ModelRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ModelRef {}

impl Hash for ModelRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModelRef").field(&self.name).finish()
    }
}

/// Types with a known schema descriptor.
///
/// Implement this to map additional Rust types onto schema nodes without
/// touching the resolver.
pub trait Describe {
    /// The descriptor for this type.
    fn descriptor() -> Descriptor;
}

macro_rules! describe_primitive {
    ($primitive:expr => $($ty:ty),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn descriptor() -> Descriptor {
                    Descriptor::Type(TypeRef::Primitive($primitive))
                }
            }
        )+
    };
}

describe_primitive!(Primitive::Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
describe_primitive!(Primitive::Float => f32, f64);
describe_primitive!(Primitive::Boolean => bool);
describe_primitive!(Primitive::String => String, str, char);
describe_primitive!(Primitive::Date => chrono::NaiveDate);
describe_primitive!(Primitive::DateTime => chrono::NaiveDateTime);

impl<Tz: chrono::TimeZone> Describe for chrono::DateTime<Tz> {
    fn descriptor() -> Descriptor {
        Descriptor::Type(TypeRef::Primitive(Primitive::DateTime))
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    fn descriptor() -> Descriptor {
        T::descriptor()
    }
}

impl<T: Describe> Describe for Option<T> {
    fn descriptor() -> Descriptor {
        T::descriptor()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn descriptor() -> Descriptor {
        Descriptor::Seq(vec![T::descriptor()])
    }
}

impl Describe for serde_json::Map<String, serde_json::Value> {
    fn descriptor() -> Descriptor {
        Descriptor::Type(TypeRef::Dict)
    }
}
