//! Swagger 2.0 schema objects, as consumed by the resolver.
//!
//! Only the keywords that influence type resolution are modelled. Everything
//! else is ignored, except vendor extensions (`x-*`), which are kept so they
//! can be carried through to the renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Vendor extensions of a schema, keyed by lower-cased name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Extensions(Map<String, Value>);

impl Extensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an extension. The key is matched case-insensitively.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(&key.to_lowercase())
    }

    /// Returns the extension value when it is a boolean.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Returns the extension value when it is a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: &str, value: Value) {
        self.0.insert(key.to_lowercase(), value);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Extensions {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut ext = Extensions::new();
        for (k, v) in iter {
            ext.insert(&k, v);
        }
        ext
    }
}

impl<'de> Deserialize<'de> for Extensions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Receives every key not claimed by `Schema`; keep only vendor extensions.
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter(|(k, _)| k.to_lowercase().starts_with("x-"))
            .collect())
    }
}

/// A slot that is either a boolean allow-flag or a schema
/// (`additionalProperties`, `additionalItems`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrBool {
    Bool(bool),
    Schema(Box<Schema>),
}

impl SchemaOrBool {
    /// True when the slot explicitly allows extra values.
    pub fn allows(&self) -> bool {
        matches!(self, SchemaOrBool::Bool(true))
    }

    pub fn schema(&self) -> Option<&Schema> {
        match self {
            SchemaOrBool::Schema(s) => Some(s),
            SchemaOrBool::Bool(_) => None,
        }
    }
}

/// The `items` slot: a single schema for homogeneous arrays, or an ordered
/// list for tuples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrArray {
    // Must come first: a struct also deserializes from a JSON array.
    Tuple(Vec<Schema>),
    Single(Box<Schema>),
}

impl SchemaOrArray {
    /// The single item schema, if this is not a tuple.
    pub fn schema(&self) -> Option<&Schema> {
        match self {
            SchemaOrArray::Single(s) => Some(s),
            SchemaOrArray::Tuple(_) => None,
        }
    }

    /// The tuple members; empty for the single-schema form.
    pub fn schemas(&self) -> &[Schema] {
        match self {
            SchemaOrArray::Tuple(v) => v,
            SchemaOrArray::Single(_) => &[],
        }
    }
}

/// A Swagger 2.0 schema object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Declared type names. Normally zero or one.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "string_or_seq",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub types: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<SchemaOrBool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<SchemaOrArray>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_items: Option<SchemaOrBool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub all_of: Vec<Schema>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default)]
    pub read_only: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    #[serde(default)]
    pub exclusive_minimum: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,

    #[serde(default)]
    pub exclusive_maximum: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Schema {
    /// Parse a schema from a JSON value.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }

    /// The `$ref` pointer, when non-empty.
    pub fn ref_str(&self) -> Option<&str> {
        self.reference.as_deref().filter(|r| !r.is_empty())
    }

    pub fn has_ref(&self) -> bool {
        self.ref_str().is_some()
    }

    /// The discriminator property name, when non-empty.
    pub fn discriminator(&self) -> Option<&str> {
        self.discriminator.as_deref().filter(|d| !d.is_empty())
    }
}

/// `type`/`format`/`items` triple of a non-body parameter, header or items
/// object. These never carry references or object structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimpleItems {
    #[serde(rename = "type", default)]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SimpleItems>>,
}

fn string_or_seq<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}
