//! Swagger Type Resolver
//!
//! Resolution of Swagger 2.0 schemas into Go type descriptors for code
//! generation.
//!
//! Given a schema node, the resolver decides which Go type it becomes
//! (primitive, slice, map, tuple, struct, `interface{}` or stream), whether it
//! is rendered behind a pointer, and how it is named. Templates consume the
//! resulting [`ResolvedType`]; this crate renders no source besides
//! [`ResolvedType::zero`].
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use swagger_types::{Document, Resolution, ResolverOptions, Schema};
//!
//! let doc = Document::from_value(json!({
//!     "definitions": {
//!         "Tag": {
//!             "type": "object",
//!             "properties": { "name": { "type": "string" } }
//!         }
//!     }
//! }))
//! .unwrap();
//!
//! let resolution = Resolution::new(&doc, ResolverOptions::new("models"));
//! let resolver = resolution.resolver();
//!
//! let tags = Schema::from_value(&json!({
//!     "type": "array",
//!     "items": { "$ref": "#/definitions/Tag" }
//! }))
//! .unwrap();
//! let resolved = resolver.resolve_schema(Some(&tags), true, false).unwrap();
//!
//! assert!(resolved.is_array);
//! assert_eq!(resolved.go_type, "[]models.Tag");
//! assert_eq!(resolved.zero(), "make([]models.Tag, 0, 50)");
//! ```
//!
//! # Extensions
//!
//! | Extension | Effect |
//! |-----------|--------|
//! | `x-go-name` | Name of the generated type |
//! | `x-go-type` | Reuse an existing type instead of generating one |
//! | `x-nullable`, `x-isnullable` | Force the pointer decision |
//! | `x-omitempty` | Carried through as [`ResolvedType::is_empty_omitted`] |

mod array;
mod diagnostics;
mod error;
mod known_defs;
mod loader;
mod mapping;
mod naming;
mod nullability;
mod object;
mod resolver;
mod schema;
mod simple;
mod types;
mod zero;

pub use diagnostics::{Diagnostics, Silent, TracingDiagnostics};
pub use error::{LoadError, ResolveError};
pub use known_defs::{known_def_go_type, DefinitionName, KnownDefinitions};
pub use loader::{definition_name, load_document, load_document_str, navigate_fragment, Document};
pub use mapping::{
    go_type_for, go_type_for_format, is_custom_formatter, is_primitive, normalize_format,
    swagger_type_name, zero_literal, IFACE,
};
pub use naming::{GoNames, IdentifierCase};
pub use nullability::{
    is_zero_value, nullable_bool, nullable_extension, nullable_number, nullable_strfmt,
    nullable_string, nullable_structure, structural_extension,
};
pub use resolver::{Resolution, TypeResolver};
pub use schema::{Extensions, Schema, SchemaOrArray, SchemaOrBool, SimpleItems};
pub use simple::{simple_resolved_type, type_for_header};
pub use types::{
    ResolvedType, ResolverOptions, X_CLASS, X_GO_CUSTOM_TAG, X_GO_NAME, X_GO_TYPE, X_IS_NULLABLE,
    X_NULLABLE, X_OMIT_EMPTY, X_SCHEMES,
};
