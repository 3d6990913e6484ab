//! Registry of shared model definitions.
//!
//! The first time a model is referenced its definition is computed and
//! stored under the referencing object's name. Later references reuse the
//! stored entry and never recompute or overwrite it.

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use tracing::{debug, warn};

use crate::field::{properties_fragment, FieldAttrs, Fragment};
use crate::model::ModelRef;

/// A stored model definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    /// Name under `#/definitions/`.
    pub object_name: String,
    /// The definition schema.
    pub schema: Fragment,
}

/// Model definitions keyed by model identity, in registration order.
///
/// Construct a fresh registry per document (or per test). Mutation goes
/// through `&mut self`, so sharing one registry across threads requires an
/// external lock.
#[derive(Debug, Default)]
pub struct Definitions {
    entries: IndexMap<ModelRef, Definition>,
    in_progress: IndexSet<ModelRef>,
}

impl Definitions {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `model` under `object_name` unless it is already known.
    ///
    /// Returns the stored definition. Returns `None` while the model's own
    /// definition is still being computed, which happens when a model refers
    /// to itself; the caller's `$ref` then points at the entry that is about
    /// to be stored.
    pub fn register_if_absent(
        &mut self,
        model: &ModelRef,
        object_name: &str,
        attrs: &FieldAttrs,
    ) -> Option<&Definition> {
        if self.entries.contains_key(model) {
            return self.entries.get(model);
        }
        if !self.in_progress.insert(*model) {
            debug!(model = model.name(), "recursive model reference");
            return None;
        }

        let schema = self.compute(model, attrs);
        self.in_progress.shift_remove(model);

        if self.contains_name(object_name) {
            warn!(model = model.name(), object_name, "definition name already used by another model");
        }
        debug!(model = model.name(), object_name, "registered definition");
        let entry = self.entries.entry(*model).or_insert(Definition {
            object_name: object_name.to_string(),
            schema,
        });
        Some(entry)
    }

    fn compute(&mut self, model: &ModelRef, attrs: &FieldAttrs) -> Fragment {
        let mut declared: IndexMap<&'static str, _> = IndexMap::new();
        for (name, descriptor) in model.fields() {
            if name.starts_with('_') {
                continue;
            }
            if declared.insert(name, descriptor).is_some() {
                warn!(model = model.name(), field = name, "field declared twice, last declaration wins");
            }
        }

        let properties = properties_fragment(declared.iter().map(|(k, v)| (*k, v)), self);

        let mut schema = Fragment::new();
        schema.insert("type".into(), Value::from("object"));
        schema.insert("properties".into(), Value::Object(properties));
        if let Some(description) = attrs.description.as_deref().filter(|d| !d.is_empty()) {
            schema.insert("description".into(), Value::from(description));
        }
        schema
    }

    /// The stored definition for `model`.
    pub fn get(&self, model: &ModelRef) -> Option<&Definition> {
        self.entries.get(model)
    }

    /// Whether `model` has a definition.
    pub fn contains(&self, model: &ModelRef) -> bool {
        self.entries.contains_key(model)
    }

    /// Whether a definition is stored under `object_name`.
    pub fn contains_name(&self, object_name: &str) -> bool {
        self.entries.values().any(|d| d.object_name == object_name)
    }

    /// `(object_name, definition)` pairs in registration order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &Fragment)> {
        self.entries
            .values()
            .map(|d| (d.object_name.as_str(), &d.schema))
    }

    /// Number of stored definitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no definitions are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
