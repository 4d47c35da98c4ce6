//! Type tags, type descriptors and schema nodes

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use super::formats::{Format, detect_format};

/// Primitive classification of a JSON value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
}

impl TypeTag {
    /// Get the JSON Schema type name
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Null => "null",
            TypeTag::Boolean => "boolean",
            TypeTag::Number => "number",
            TypeTag::String => "string",
            TypeTag::Array => "array",
            TypeTag::Object => "object",
        }
    }

    /// Classify a JSON value
    pub fn of(value: &Value) -> TypeTag {
        match value {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Number(_) => TypeTag::Number,
            Value::String(_) => TypeTag::String,
            Value::Array(_) => TypeTag::Array,
            Value::Object(_) => TypeTag::Object,
        }
    }

    /// Whether values of this type are decomposed further by the inferrer
    pub fn is_compound(&self) -> bool {
        matches!(self, TypeTag::Array | TypeTag::Object)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema fragment describing a single value: `{type, format?}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub type_tag: TypeTag,
    pub format: Option<Format>,
}

impl TypeDescriptor {
    /// Describe one value. Arrays and objects are not inspected here.
    pub fn of(value: &Value) -> Self {
        let format = match value {
            Value::String(s) => detect_format(s),
            _ => None,
        };
        Self {
            type_tag: TypeTag::of(value),
            format,
        }
    }
}

/// Describe a single value as `{type, format?}`
pub fn describe(value: &Value) -> TypeDescriptor {
    TypeDescriptor::of(value)
}

/// Aggregate of one field across a set of sibling samples
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Non-null types observed for this field
    pub types: BTreeSet<TypeTag>,
    /// Absent or `null` in at least one sample
    pub nullable: bool,
    /// Present only when every non-null string value agreed on one format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
}

impl FieldDescriptor {
    /// Type union to render for this field, with `null` included if nullable
    pub fn type_union(&self) -> Vec<TypeTag> {
        let mut union: Vec<TypeTag> = self.types.iter().copied().collect();
        if self.nullable || union.is_empty() {
            union.push(TypeTag::Null);
        }
        union
    }
}

/// Recursive structural description of a value
///
/// An empty `types` list means the node accepts any value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaNode {
    pub types: Vec<TypeTag>,
    pub format: Option<Format>,
    /// Child nodes, for object nodes
    pub properties: Option<BTreeMap<String, SchemaNode>>,
    pub required: BTreeSet<String>,
    /// Item shape, for array nodes
    pub items: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    /// Node accepting any value
    pub fn any() -> Self {
        Self::default()
    }

    /// Node for a single-value descriptor
    pub fn from_descriptor(descriptor: TypeDescriptor) -> Self {
        Self {
            types: vec![descriptor.type_tag],
            format: descriptor.format,
            ..Self::default()
        }
    }

    /// Node for a merged field
    pub fn from_field(field: &FieldDescriptor) -> Self {
        Self {
            types: field.type_union(),
            format: field.format,
            ..Self::default()
        }
    }

    /// Object node with properties and required-field set
    pub fn object(properties: BTreeMap<String, SchemaNode>, required: BTreeSet<String>) -> Self {
        Self {
            types: vec![TypeTag::Object],
            properties: Some(properties),
            required,
            ..Self::default()
        }
    }

    /// Array node, item-less when `items` is `None`
    pub fn array(items: Option<SchemaNode>) -> Self {
        Self {
            types: vec![TypeTag::Array],
            items: items.map(Box::new),
            ..Self::default()
        }
    }

    pub fn has_type(&self, tag: TypeTag) -> bool {
        self.types.contains(&tag)
    }

    pub fn is_nullable(&self) -> bool {
        self.has_type(TypeTag::Null)
    }

    /// Look up a direct child property
    pub fn property(&self, name: &str) -> Option<&SchemaNode> {
        self.properties.as_ref().and_then(|p| p.get(name))
    }

    /// Convert to a JSON Schema fragment (no dialect identifier)
    pub fn to_json_schema(&self) -> Value {
        let mut schema = Map::new();

        match self.types.as_slice() {
            [] => {}
            [single] => {
                schema.insert("type".to_string(), json!(single.as_str()));
            }
            many => {
                let names: Vec<&str> = many.iter().map(TypeTag::as_str).collect();
                schema.insert("type".to_string(), json!(names));
            }
        }

        if let Some(format) = self.format {
            schema.insert("format".to_string(), json!(format.as_str()));
        }

        if let Some(ref properties) = self.properties {
            let props: Map<String, Value> = properties
                .iter()
                .map(|(name, node)| (name.clone(), node.to_json_schema()))
                .collect();
            schema.insert("properties".to_string(), Value::Object(props));

            if !self.required.is_empty() {
                schema.insert("required".to_string(), json!(self.required));
            }
        }

        if let Some(ref items) = self.items {
            schema.insert("items".to_string(), items.to_json_schema());
        }

        Value::Object(schema)
    }

    /// Convert to a standalone schema document carrying a dialect identifier
    pub fn to_document(&self, dialect: &str) -> Value {
        let mut document = self.to_json_schema();
        if let Value::Object(ref mut map) = document {
            map.insert("$schema".to_string(), json!(dialect));
        }
        document
    }
}
