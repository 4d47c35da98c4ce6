//! Schema inference engine
//!
//! Walks a sample value and assembles a [`SchemaNode`]. Every set of sibling
//! objects found anywhere in the tree (array items, or the values of one
//! field across several samples) goes through [`merge_fields`] and
//! [`required_fields`], so nullability and type unions are computed from
//! all siblings at every depth, not just the first one.

use std::collections::BTreeSet;

use serde_json::{Map, Value};
use tracing::debug;

use super::config::InferenceConfig;
use super::error::InferenceError;
use super::formats::Format;
use super::merge::{merge_fields, object_samples, required_fields};
use super::types::{FieldDescriptor, SchemaNode, TypeDescriptor, TypeTag};

/// Schema inference engine
///
/// Holds only configuration; every call builds fresh intermediate state,
/// so one inferrer can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct SchemaInferrer {
    config: InferenceConfig,
}

impl SchemaInferrer {
    /// Create a new schema inferrer with default configuration
    pub fn new() -> Self {
        Self::with_config(InferenceConfig::default())
    }

    /// Create a new schema inferrer with custom configuration
    pub fn with_config(config: InferenceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Infer a schema node from one sample value
    pub fn infer(&self, sample: &Value) -> SchemaNode {
        self.infer_value(sample, 0)
    }

    /// Infer one schema node from several sample documents of the same shape
    ///
    /// The samples are treated like the items of one array. An empty slice
    /// yields a node that accepts anything.
    pub fn infer_samples(&self, samples: &[Value]) -> SchemaNode {
        match samples {
            [] => SchemaNode::any(),
            [single] => self.infer(single),
            _ => {
                let refs: Vec<&Value> = samples.iter().collect();
                match self.infer_items(&refs, 0) {
                    Some(node) => node,
                    // Heterogeneous samples: describe the first one
                    None => self.infer(&samples[0]),
                }
            }
        }
    }

    /// Parse JSON text and infer a schema node from it
    pub fn infer_json(&self, json: &str) -> Result<SchemaNode, InferenceError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(self.infer(&value))
    }

    /// Infer a schema and render it as a standalone JSON Schema document
    pub fn infer_document(&self, sample: &Value) -> Value {
        self.infer(sample).to_document(&self.config.dialect)
    }

    fn infer_value(&self, value: &Value, depth: usize) -> SchemaNode {
        match value {
            Value::Array(items) => {
                let refs: Vec<&Value> = items.iter().collect();
                self.infer_array(&refs, depth)
            }
            Value::Object(map) => self.infer_object(&[map], depth),
            scalar => SchemaNode::from_descriptor(self.describe(scalar)),
        }
    }

    fn describe(&self, value: &Value) -> TypeDescriptor {
        let mut descriptor = TypeDescriptor::of(value);
        if !self.config.detect_formats {
            descriptor.format = None;
        }
        descriptor
    }

    fn exceeds_depth(&self, depth: usize) -> bool {
        if depth >= self.config.max_depth {
            debug!(depth, "Maximum inference depth reached, describing by type only");
            return true;
        }
        false
    }

    fn infer_array(&self, items: &[&Value], depth: usize) -> SchemaNode {
        if self.exceeds_depth(depth) {
            return SchemaNode::array(None);
        }
        // Items share the array's depth; only objects open a new level
        SchemaNode::array(self.infer_items(items, depth))
    }

    /// Item schema for a set of array elements, or `None` for an item-less array
    ///
    /// Only arrays whose first element is an object get a field-aware item
    /// schema; non-object siblings are left out of that merge. Arrays of
    /// arrays and arrays of one scalar type get a matching item schema.
    /// Empty and otherwise heterogeneous arrays get none.
    fn infer_items(&self, items: &[&Value], depth: usize) -> Option<SchemaNode> {
        let first = items.first()?;

        if first.is_object() {
            let objects = object_samples(items.iter().copied());
            return Some(self.infer_object(&objects, depth));
        }

        let tag = TypeTag::of(first);
        if !items.iter().all(|item| TypeTag::of(item) == tag) {
            return None;
        }

        if tag == TypeTag::Array {
            let nested: Vec<&Value> = items
                .iter()
                .filter_map(|item| item.as_array())
                .flatten()
                .collect();
            return Some(self.infer_array(&nested, depth));
        }

        let formats: BTreeSet<Option<Format>> =
            items.iter().map(|item| self.describe(item).format).collect();
        let format = match formats.len() {
            1 => formats.into_iter().next().flatten(),
            _ => None,
        };
        Some(SchemaNode::from_descriptor(TypeDescriptor {
            type_tag: tag,
            format,
        }))
    }

    fn infer_object(&self, samples: &[&Map<String, Value>], depth: usize) -> SchemaNode {
        if self.exceeds_depth(depth) {
            return SchemaNode::from_descriptor(TypeDescriptor {
                type_tag: TypeTag::Object,
                format: None,
            });
        }

        let fields = merge_fields(samples);
        let required = required_fields(samples);

        let properties = fields
            .iter()
            .map(|(name, field)| (name.clone(), self.infer_field(name, field, samples, depth)))
            .collect();

        SchemaNode::object(properties, required)
    }

    fn infer_field(
        &self,
        name: &str,
        field: &FieldDescriptor,
        samples: &[&Map<String, Value>],
        depth: usize,
    ) -> SchemaNode {
        let mut node = SchemaNode::from_field(field);
        if !self.config.detect_formats {
            node.format = None;
        }

        if !field.types.iter().any(TypeTag::is_compound) {
            return node;
        }

        // Every non-null value this field took across the sibling samples
        let values: Vec<&Value> = samples
            .iter()
            .filter_map(|sample| sample.get(name))
            .filter(|value| !value.is_null())
            .collect();

        if field.types.contains(&TypeTag::Object) {
            let objects = object_samples(values.iter().copied());
            let child = self.infer_object(&objects, depth + 1);
            node.properties = child.properties;
            node.required = child.required;
        }

        if field.types.contains(&TypeTag::Array) {
            let items: Vec<&Value> = values
                .iter()
                .filter_map(|value| value.as_array())
                .flatten()
                .collect();
            node.items = self.infer_array(&items, depth + 1).items;
        }

        node
    }
}

/// Infer a schema node from one sample value with default configuration
pub fn infer_schema(sample: &Value) -> SchemaNode {
    SchemaInferrer::new().infer(sample)
}
