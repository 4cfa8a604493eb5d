//! Nullability rules.
//!
//! A nullable type is rendered behind a pointer. Each rule first honours an
//! explicit `x-nullable` / `x-isnullable` extension, then falls back to
//! structural heuristics. The numeric and string rules keep a few
//! backward-compatibility branches that must not be simplified: changing them
//! changes the generated code of existing specs.

use serde_json::Value;

use crate::schema::{Extensions, Schema};
use crate::types::{BINARY, X_IS_NULLABLE, X_NULLABLE};

/// Explicit nullability override, if any.
///
/// `x-nullable` wins over `x-isnullable`. Non-boolean values are ignored.
pub fn nullable_extension(ext: &Extensions) -> Option<bool> {
    ext.get_bool(X_NULLABLE)
        .or_else(|| ext.get_bool(X_IS_NULLABLE))
}

/// Override as read by the structural rule, where `x-isnullable` is checked
/// first.
pub fn structural_extension(ext: &Extensions) -> Option<bool> {
    ext.get_bool(X_IS_NULLABLE)
        .or_else(|| ext.get_bool(X_NULLABLE))
}

/// Structural rule: an object with properties is nullable.
pub fn nullable_structure(schema: &Schema) -> bool {
    structural_extension(&schema.extensions).unwrap_or(!schema.properties.is_empty())
}

/// Rule for booleans and other untyped values.
pub fn nullable_bool(schema: &Schema, is_required: bool) -> bool {
    if let Some(nullable) = nullable_extension(&schema.extensions) {
        return nullable;
    }
    let has_default = schema.default.is_some();
    let required = is_required && !has_default && !schema.read_only;
    let optional = !is_required && (has_default || schema.read_only);

    required || optional
}

/// Rule for `number` and `integer`.
pub fn nullable_number(schema: &Schema, is_required: bool) -> bool {
    if let Some(nullable) = nullable_extension(&schema.extensions) {
        return nullable;
    }
    let has_default = has_non_zero_default(schema);

    let is_min = schema
        .minimum
        .is_some_and(|min| min != 0.0 || schema.exclusive_minimum);
    let bc_min = schema
        .minimum
        .is_some_and(|min| min == 0.0 && !schema.exclusive_minimum);
    let is_max = schema.minimum.is_none()
        && schema
            .maximum
            .is_some_and(|max| max != 0.0 || schema.exclusive_maximum);
    let bc_max = schema
        .maximum
        .is_some_and(|max| max == 0.0 && !schema.exclusive_maximum);
    let (is_min_max, bc_min_max) = match (schema.minimum, schema.maximum) {
        (Some(min), Some(max)) => (min < max, min < 0.0 && 0.0 < max),
        _ => (false, false),
    };

    !schema.read_only
        && (is_required
            || (has_default && !(is_min || is_max || is_min_max))
            || bc_min
            || bc_max
            || bc_min_max)
}

/// Rule for plain strings.
pub fn nullable_string(schema: &Schema, is_required: bool) -> bool {
    if let Some(nullable) = nullable_extension(&schema.extensions) {
        return nullable;
    }
    let has_default = has_non_zero_default(schema);

    let is_min = schema.min_length.is_some_and(|len| len != 0);
    let bc_min = schema.min_length == Some(0);

    !schema.read_only && (is_required || (has_default && !is_min) || bc_min)
}

/// Rule for formatted strings. A binary stream is never nullable, not even
/// through an extension.
pub fn nullable_strfmt(schema: &Schema, is_required: bool) -> bool {
    let not_binary = schema.format.as_deref() != Some(BINARY);
    if let Some(nullable) = nullable_extension(&schema.extensions) {
        if not_binary {
            return nullable;
        }
    }
    let has_default = has_non_zero_default(schema);

    let nullable = !schema.read_only && (is_required || has_default);
    not_binary && nullable
}

fn has_non_zero_default(schema: &Schema) -> bool {
    schema.default.as_ref().is_some_and(|v| !is_zero_value(v))
}

/// Zero-ness of a JSON default value, as the generated Go code would see it.
pub fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
