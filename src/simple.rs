//! Resolution of simple types: non-body parameters, headers and their items.

use crate::mapping::{go_type_for, go_type_for_format, is_custom_formatter, is_primitive, IFACE};
use crate::schema::SimpleItems;
use crate::types::{ResolvedType, ARRAY, BINARY, FILE};

/// Resolve a `type`/`format`/`items` triple.
pub fn simple_resolved_type(
    type_name: &str,
    format: Option<&str>,
    items: Option<&SimpleItems>,
) -> ResolvedType {
    let mut result = ResolvedType {
        swagger_type: type_name.to_string(),
        swagger_format: format.unwrap_or_default().to_string(),
        ..ResolvedType::default()
    };

    // rendered as an io.ReadCloser
    if type_name == FILE {
        result.is_primitive = true;
        result.is_stream = true;
        result.go_type = go_type_for(BINARY).unwrap_or_default().to_string();
        return result;
    }

    if let Some(format) = format.filter(|f| !f.is_empty()) {
        if let Some(go_type) = go_type_for_format(format) {
            result.go_type = go_type.to_string();
            result.is_primitive = true;
            result.is_stream = format == BINARY;
            result.is_custom_formatter = !result.is_stream && is_custom_formatter(go_type);
            return result;
        }
    }

    if let Some(go_type) = go_type_for(type_name) {
        result.go_type = go_type.to_string();
        result.is_primitive = true;
        return result;
    }

    if type_name == ARRAY {
        result.is_array = true;
        let Some(items) = items else {
            result.go_type = format!("[]{}", IFACE);
            return result;
        };
        let elem = simple_resolved_type(
            &items.type_name,
            items.format.as_deref(),
            items.items.as_deref(),
        );
        result.go_type = format!("[]{}", elem.go_type);
        result.elem_type = Some(Box::new(elem));
        return result;
    }

    result.go_type = type_name.to_string();
    result.is_primitive = is_primitive(type_name);
    result
}

/// Resolve the type of a response header.
pub fn type_for_header(header: &SimpleItems) -> ResolvedType {
    simple_resolved_type(
        &header.type_name,
        header.format.as_deref(),
        header.items.as_deref(),
    )
}
