//! Core types for type resolution.

use serde::Serialize;

use crate::schema::Extensions;

// Swagger type names.
pub const ARRAY: &str = "array";
pub const FILE: &str = "file";
pub const NUMBER: &str = "number";
pub const INTEGER: &str = "integer";
pub const BOOLEAN: &str = "boolean";
pub const STRING: &str = "string";
pub const OBJECT: &str = "object";
pub const NULL: &str = "null";
pub const BINARY: &str = "binary";

/// Class name used by a discriminator.
pub const X_CLASS: &str = "x-class";
/// Additional struct tag on serializer fields.
pub const X_GO_CUSTOM_TAG: &str = "x-go-custom-tag";
/// Name of the generated Go type, bypassing casing rules.
pub const X_GO_NAME: &str = "x-go-name";
/// Reuse an existing Go type instead of generating one.
pub const X_GO_TYPE: &str = "x-go-type";
pub const X_IS_NULLABLE: &str = "x-isnullable";
/// Turns the schema into a pointer.
pub const X_NULLABLE: &str = "x-nullable";
pub const X_OMIT_EMPTY: &str = "x-omitempty";
/// Additional schemes supported by an operation.
pub const X_SCHEMES: &str = "x-schemes";

/// A schema that has been resolved and analyzed for use in a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedType {
    pub is_anonymous: bool,
    pub is_array: bool,
    pub is_map: bool,
    pub is_interface: bool,
    pub is_primitive: bool,
    pub is_custom_formatter: bool,
    pub is_aliased: bool,
    pub is_nullable: bool,
    pub is_stream: bool,
    pub is_empty_omitted: bool,

    /// Rendered as an anonymous struct with `P{index}` properties.
    pub is_tuple: bool,
    pub has_additional_items: bool,

    /// Rendered as a struct.
    pub is_complex_object: bool,

    /// Polymorphic base type.
    pub is_base_type: bool,
    pub has_discriminator: bool,

    pub go_type: String,
    pub pkg: String,
    pub pkg_alias: String,
    pub aliased_type: String,
    pub swagger_type: String,
    pub swagger_format: String,
    pub extensions: Extensions,

    /// Element type of an array or map.
    pub elem_type: Option<Box<ResolvedType>>,

    /// A nullable element is used within a map whose own nullability was
    /// decided separately; the renderer must not add a pointer for it.
    pub is_map_null_override: bool,
}

impl ResolvedType {
    /// Open-ended `interface{}` value.
    pub(crate) fn interface() -> Self {
        Self {
            is_interface: true,
            go_type: crate::mapping::IFACE.to_string(),
            ..Self::default()
        }
    }
}

/// Options for a type resolver.
#[derive(Debug, Clone, Default)]
pub struct ResolverOptions {
    /// Go package of generated models. When set, references to known
    /// definitions are qualified with it.
    pub models_package: String,
    /// Emit debug diagnostics while resolving.
    pub debug: bool,
}

impl ResolverOptions {
    pub fn new(models_package: impl Into<String>) -> Self {
        Self {
            models_package: models_package.into(),
            debug: false,
        }
    }

    /// Enable debug diagnostics.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}
