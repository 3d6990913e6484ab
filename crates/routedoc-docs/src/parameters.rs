//! Operation parameters built from request and header descriptors.

use serde_json::Value;

use routedoc_core::{resolve, Definitions, Descriptor, Fragment, Location};

/// Parameters for one descriptor.
///
/// A descriptor located in `query`, `header`, `path` or `formData` yields a
/// parameter per property when it resolves to an object, or a single named
/// parameter otherwise. Anything else is the request body. `forced`
/// overrides the descriptor's own location.
///
/// Returns the reason on failure; the caller knows which operation it is for.
pub(crate) fn expand(
    descriptor: &Descriptor,
    forced: Option<Location>,
    definitions: &mut Definitions,
) -> Result<Vec<Fragment>, String> {
    let attrs = descriptor.as_field().map(|field| field.attrs());
    let mut fragment = resolve(descriptor, definitions);

    let location = match location_of(descriptor, forced) {
        None | Some(Location::Body) => {
            let required = attrs.and_then(|attrs| attrs.required);
            return Ok(vec![body_parameter(fragment, required)]);
        }
        Some(location) => location,
    };

    if let Some(Value::Object(properties)) = fragment.remove("properties") {
        return properties
            .into_iter()
            .map(|(name, property)| match property {
                Value::Object(property) => Ok(located(&name, location, property)),
                other => Err(format!("property '{name}' is not a schema: {other}")),
            })
            .collect();
    }

    let Some(name) = fragment
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
    else {
        return Err(format!("{} parameter has no name", location.as_str()));
    };
    Ok(vec![located(&name, location, fragment)])
}

/// Whether `descriptor` documents the request body.
pub(crate) fn is_body(descriptor: &Descriptor, forced: Option<Location>) -> bool {
    matches!(location_of(descriptor, forced), None | Some(Location::Body))
}

fn location_of(descriptor: &Descriptor, forced: Option<Location>) -> Option<Location> {
    forced.or_else(|| descriptor.as_field().and_then(|field| field.attrs().location))
}

// A schema's `required` lists property names; the flag belongs on the parameter.
fn body_parameter(mut schema: Fragment, required: Option<bool>) -> Fragment {
    if matches!(schema.get("required"), Some(Value::Bool(_))) {
        schema.remove("required");
    }
    let mut parameter = Fragment::new();
    parameter.insert("name".into(), Value::from("body"));
    parameter.insert("in".into(), Value::from(Location::Body.as_str()));
    if let Some(required) = required {
        parameter.insert("required".into(), Value::Bool(required));
    }
    parameter.insert("schema".into(), Value::Object(schema));
    parameter
}

// `name` and `in` lead; a `$ref` only means something under `schema`.
fn located(name: &str, location: Location, schema: Fragment) -> Fragment {
    let mut parameter = Fragment::new();
    parameter.insert("name".into(), Value::from(name));
    parameter.insert("in".into(), Value::from(location.as_str()));
    if location == Location::Path {
        parameter.insert("required".into(), Value::Bool(true));
    }
    for (key, value) in schema {
        match key.as_str() {
            "name" | "in" => {}
            "required" if location == Location::Path => {}
            "$ref" => {
                let mut reference = Fragment::new();
                reference.insert(key, value);
                parameter.insert("schema".into(), Value::Object(reference));
            }
            _ => {
                parameter.insert(key, value);
            }
        }
    }
    parameter
}
