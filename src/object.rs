//! Resolution of object schemas: compositions, structs, maps and free-form
//! values.

use crate::error::ResolveError;
use crate::mapping::IFACE;
use crate::nullability::{nullable_structure, structural_extension};
use crate::resolver::{Trail, TypeResolver};
use crate::schema::{Schema, SchemaOrArray, SchemaOrBool};
use crate::types::{ResolvedType, OBJECT};

impl TypeResolver<'_> {
    pub(crate) fn resolve_object(
        &self,
        schema: &Schema,
        is_anonymous: bool,
        trail: &mut Trail,
    ) -> Result<ResolvedType, ResolveError> {
        self.debug(|| {
            format!(
                "resolving object {} (anon: {})",
                self.model_name(),
                is_anonymous
            )
        });

        let mut result = ResolvedType {
            is_anonymous,
            is_base_type: schema.discriminator().is_some(),
            ..ResolvedType::default()
        };
        if !is_anonymous {
            let declared = self.declared_name(self.model_name(), schema);
            result.swagger_type = OBJECT.to_string();
            result.go_type = declared.go_type;
            result.pkg = declared.pkg;
            result.pkg_alias = declared.pkg_alias;
        }

        // composition is terminal
        if !schema.all_of.is_empty() {
            if is_anonymous {
                result.go_type = self.go_type_name(self.model_name());
            }
            result.is_complex_object = true;
            result.is_nullable = self.object_nullability(schema);
            result.swagger_type = OBJECT.to_string();
            return Ok(result);
        }

        // keep going: a struct may also declare additional properties
        if !schema.properties.is_empty() {
            result.is_nullable = self.object_nullability(schema);
            result.is_complex_object = true;
        }

        if let Some(value_schema) = schema
            .additional_properties
            .as_ref()
            .and_then(SchemaOrBool::schema)
        {
            return self.resolve_map(result, schema, value_schema, is_anonymous, trail);
        }

        if !schema.properties.is_empty() {
            return Ok(result);
        }

        // nothing to go by: a free-form payload
        Ok(ResolvedType {
            go_type: IFACE.to_string(),
            is_map: true,
            swagger_type: OBJECT.to_string(),
            is_nullable: false,
            is_interface: true,
            ..result
        })
    }

    /// `additionalProperties` with a schema. Without declared properties this
    /// is a plain map; with them, the element type is kept for the renderer.
    fn resolve_map(
        &self,
        mut result: ResolvedType,
        schema: &Schema,
        value_schema: &Schema,
        is_anonymous: bool,
        trail: &mut Trail,
    ) -> Result<ResolvedType, ResolveError> {
        let mut elem = self.resolve(Some(value_schema), !value_schema.has_ref(), false, trail)?;

        result.is_map = !result.is_complex_object;
        result.swagger_type = OBJECT.to_string();

        elem.is_nullable = nullable_structure(value_schema);
        result.go_type = if elem.is_nullable {
            format!("map[string]*{}", elem.go_type)
        } else {
            format!("map[string]{}", elem.go_type)
        };

        // The map and its element decided nullability separately. For
        // map[string][]...[]T and map[string]Alias the renderer must stick to
        // the element's own verdict instead of adding a pointer.
        let needs_override = result.is_map
            && (elem.is_array || value_schema.has_ref() || elem.is_aliased || elem.is_anonymous);
        if needs_override {
            result.is_map_null_override =
                !(elem.is_array && self.terminal_is_anonymous_nullable(value_schema, &elem)?);
        }

        self.infer_aliasing(&mut result, schema, is_anonymous);
        result.elem_type = Some(Box::new(elem));
        Ok(result)
    }

    /// Nullability of an object as a whole: compositions follow their
    /// branches, structs the structural rule.
    fn object_nullability(&self, schema: &Schema) -> bool {
        if !schema.all_of.is_empty() {
            return structural_extension(&schema.extensions)
                .unwrap_or_else(|| schema.all_of.iter().any(|s| self.is_nullable(s)));
        }
        if !schema.properties.is_empty() {
            return self.is_nullable(schema);
        }
        false
    }

    /// Whether the innermost element of nested arrays is an anonymous type
    /// that is nullable on its own.
    ///
    /// Walks `elem`, already resolved from `schema`, instead of resolving the
    /// items again. Array resolution rewrites element nullability, so the
    /// element's own verdict is recomputed from its schema.
    fn terminal_is_anonymous_nullable(
        &self,
        schema: &Schema,
        elem: &ResolvedType,
    ) -> Result<bool, ResolveError> {
        let mut current = schema;
        let mut resolved = elem;
        let mut terminal = None;
        while let Some(items) = current.items.as_ref().and_then(SchemaOrArray::schema) {
            let Some(next) = resolved.elem_type.as_deref() else {
                break;
            };
            terminal = Some((items, next));
            current = items;
            resolved = next;
        }

        let Some((item, resolved)) = terminal else {
            return Ok(false);
        };
        // only inline objects and non-definition pointers to them are anonymous
        if !resolved.is_anonymous {
            return Ok(false);
        }
        Ok(match item.ref_str() {
            Some(reference) => self.is_nullable(&self.document().resolve_ref(reference)?),
            None => self.object_nullability(item),
        })
    }
}
