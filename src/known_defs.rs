//! Index of the named definitions of a document, and their declared Go names.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::diagnostics::Diagnostics;
use crate::loader::Document;
use crate::schema::Schema;
use crate::types::{X_GO_NAME, X_GO_TYPE};

/// Declared Go name of a definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DefinitionName {
    pub go_type: String,
    /// Import path of an external type.
    pub pkg: String,
    /// Package alias of an external type.
    pub pkg_alias: String,
}

#[derive(Deserialize)]
struct ExternalType {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default)]
    import: Option<ExternalImport>,
}

#[derive(Deserialize)]
struct ExternalImport {
    package: String,
    #[serde(default)]
    alias: Option<String>,
}

/// Go name of a definition, honouring `x-go-name` and `x-go-type`.
///
/// `case` maps plain names to Go identifiers; without it the definition name
/// is returned unchanged. An `x-go-type` without an import names a builtin
/// type. A malformed `x-go-type` is reported and ignored.
pub fn known_def_go_type(
    def: &str,
    schema: &Schema,
    case: Option<&dyn Fn(&str) -> String>,
    diagnostics: &dyn Diagnostics,
) -> DefinitionName {
    let apply = |name: &str| case.map_or_else(|| name.to_string(), |c| c(name));

    if let Some(name) = schema.extensions.get_str(X_GO_NAME) {
        return DefinitionName {
            go_type: apply(name),
            ..DefinitionName::default()
        };
    }

    let Some(raw) = schema.extensions.get(X_GO_TYPE) else {
        return DefinitionName {
            go_type: apply(def),
            ..DefinitionName::default()
        };
    };

    match ExternalType::deserialize(raw) {
        Ok(ExternalType {
            type_name,
            import: Some(import),
        }) => {
            let alias = import.alias.filter(|a| !a.is_empty()).unwrap_or_else(|| {
                import
                    .package
                    .rsplit('/')
                    .next()
                    .unwrap_or(&import.package)
                    .to_string()
            });
            if diagnostics.debug_enabled() {
                diagnostics.debug(&format!(
                    "known def type {}: {}.{} from {}",
                    X_GO_TYPE, alias, type_name, import.package
                ));
            }
            DefinitionName {
                go_type: format!("{}.{}", alias, type_name),
                pkg: import.package,
                pkg_alias: alias,
            }
        }
        Ok(ExternalType {
            type_name,
            import: None,
        }) => DefinitionName {
            go_type: type_name,
            ..DefinitionName::default()
        },
        Err(e) => {
            diagnostics.warn(&format!(
                "ignoring malformed {} on definition {}: {}",
                X_GO_TYPE, def, e
            ));
            DefinitionName {
                go_type: apply(def),
                ..DefinitionName::default()
            }
        }
    }
}

/// The declared names of every top-level definition of a document.
///
/// Built once per document and shared by every resolver derived from it.
#[derive(Debug, Clone, Default)]
pub struct KnownDefinitions {
    names: BTreeSet<String>,
}

impl KnownDefinitions {
    pub fn build(doc: &Document, diagnostics: &dyn Diagnostics) -> Self {
        let names = doc
            .definitions()
            .iter()
            .map(|(name, schema)| known_def_go_type(name, schema, None, diagnostics).go_type)
            .collect();
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
