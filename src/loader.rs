//! Swagger document loading and local reference lookup.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::error::{LoadError, ResolveError};
use crate::schema::Schema;

const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// A parsed Swagger document.
///
/// Holds the raw JSON for pointer navigation and the parsed top-level
/// definitions.
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
    definitions: BTreeMap<String, Schema>,
}

impl Document {
    /// Build a document from already-parsed JSON.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidDocument` if the root is not an object or a
    /// definition is not a valid schema.
    pub fn from_value(root: Value) -> Result<Self, LoadError> {
        if !root.is_object() {
            return Err(LoadError::InvalidDocument {
                message: "document root must be an object".to_string(),
            });
        }

        let mut definitions = BTreeMap::new();
        if let Some(defs) = root.get("definitions") {
            let defs = defs.as_object().ok_or_else(|| LoadError::InvalidDocument {
                message: "definitions must be an object".to_string(),
            })?;
            for (name, def) in defs {
                let schema = Schema::from_value(def).map_err(|e| LoadError::InvalidDocument {
                    message: format!("definition {}: {}", name, e),
                })?;
                definitions.insert(name.clone(), schema);
            }
        }

        Ok(Self { root, definitions })
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Top-level named definitions.
    pub fn definitions(&self) -> &BTreeMap<String, Schema> {
        &self.definitions
    }

    pub fn definition(&self, name: &str) -> Option<&Schema> {
        self.definitions.get(name)
    }

    /// Dereference a local JSON pointer (`#/...`) and parse its target.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::ReferenceResolution` for non-local references,
    /// missing targets, or targets that are not schemas.
    pub fn resolve_ref(&self, reference: &str) -> Result<Schema, ResolveError> {
        if !reference.starts_with('#') {
            return Err(ResolveError::reference(
                reference,
                "only local references are supported",
            ));
        }
        if let Some(name) = definition_name(reference) {
            return self
                .definitions
                .get(&name)
                .cloned()
                .ok_or_else(|| ResolveError::reference(reference, "definition not found"));
        }

        let target = navigate_fragment(&self.root, reference)
            .ok_or_else(|| ResolveError::reference(reference, "fragment not found"))?;
        Schema::from_value(target).map_err(|e| ResolveError::reference(reference, e.to_string()))
    }
}

/// Load a document from a file path.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// `LoadError::InvalidJson` if it isn't valid JSON, or
/// `LoadError::InvalidDocument` if its definitions aren't valid schemas.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_document_str(&content)
}

/// Load a document from a JSON string.
///
/// # Errors
///
/// Returns `LoadError::InvalidJson` if the string isn't valid JSON.
pub fn load_document_str(content: &str) -> Result<Document, LoadError> {
    let root: Value =
        serde_json::from_str(content).map_err(|source| LoadError::InvalidJson { source })?;
    Document::from_value(root)
}

/// Navigate a JSON Pointer fragment (e.g., "#/definitions/Pet/properties/id").
pub fn navigate_fragment<'v>(root: &'v Value, fragment: &str) -> Option<&'v Value> {
    let path = fragment.trim_start_matches('#').trim_start_matches('/');
    if path.is_empty() {
        return Some(root);
    }

    let mut current = root;
    for part in path.split('/') {
        let key = unescape(part);
        current = match current {
            Value::Array(arr) => arr.get(key.parse::<usize>().ok()?)?,
            other => other.get(&key)?,
        };
    }
    Some(current)
}

/// Name of the top-level definition a reference points to, if it points to
/// one directly (`#/definitions/Pet`, not `#/definitions/Pet/properties/id`).
pub fn definition_name(reference: &str) -> Option<String> {
    let rest = reference.strip_prefix(DEFINITIONS_PREFIX)?;
    if rest.is_empty() || rest.contains('/') {
        return None;
    }
    Some(unescape(rest))
}

// JSON Pointer encoding: ~1 = /, ~0 = ~
fn unescape(part: &str) -> String {
    part.replace("~1", "/").replace("~0", "~")
}
