//! Cross-sample field merging
//!
//! Given a set of sibling sample objects (for example every item of a
//! response array), computes per-field type sets, nullability and format
//! agreement, and the set of fields present and non-null in every sample.
//! Both passes must run over the same filtered sample slice so that
//! required-ness and type unions stay consistent.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::{Map, Value};

use super::formats::Format;
use super::types::{FieldDescriptor, TypeDescriptor, TypeTag};

/// Keep only the object samples; everything else is excluded from merging
pub fn object_samples<'a, I>(values: I) -> Vec<&'a Map<String, Value>>
where
    I: IntoIterator<Item = &'a Value>,
{
    values.into_iter().filter_map(Value::as_object).collect()
}

/// Merge a set of sample objects into one descriptor per field name
///
/// An empty sample slice yields an empty mapping.
pub fn merge_fields(samples: &[&Map<String, Value>]) -> BTreeMap<String, FieldDescriptor> {
    let names: BTreeSet<&String> = samples.iter().flat_map(|sample| sample.keys()).collect();

    names
        .into_iter()
        .map(|name| (name.clone(), merge_field(name, samples)))
        .collect()
}

fn merge_field(name: &str, samples: &[&Map<String, Value>]) -> FieldDescriptor {
    let mut field = FieldDescriptor::default();
    let mut formats: BTreeSet<Format> = BTreeSet::new();
    let mut unformatted_strings = false;

    for sample in samples {
        let value = match sample.get(name) {
            None | Some(Value::Null) => {
                field.nullable = true;
                continue;
            }
            Some(value) => value,
        };

        let descriptor = TypeDescriptor::of(value);
        field.types.insert(descriptor.type_tag);
        match descriptor.format {
            Some(format) => {
                formats.insert(format);
            }
            None if value.is_string() => unformatted_strings = true,
            None => {}
        }
    }

    // A format is kept only when every non-null value was a string and all
    // of them agreed on it
    let string_only = field.types.len() == 1 && field.types.contains(&TypeTag::String);
    if string_only && formats.len() == 1 && !unformatted_strings {
        field.format = formats.into_iter().next();
    }

    field
}

/// Fields present and non-null in every sample
///
/// An empty sample slice yields an empty set.
pub fn required_fields(samples: &[&Map<String, Value>]) -> BTreeSet<String> {
    let Some((first, rest)) = samples.split_first() else {
        return BTreeSet::new();
    };

    first
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, _)| name)
        .filter(|name| {
            rest.iter()
                .all(|sample| sample.get(name.as_str()).is_some_and(|v| !v.is_null()))
        })
        .cloned()
        .collect()
}
