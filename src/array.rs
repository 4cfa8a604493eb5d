//! Resolution of array schemas.

use crate::error::ResolveError;
use crate::mapping::IFACE;
use crate::resolver::{Trail, TypeResolver};
use crate::schema::{Schema, SchemaOrArray};
use crate::types::{ResolvedType, ARRAY};

impl TypeResolver<'_> {
    /// Arrays are never nullable themselves; only their elements may be.
    pub(crate) fn resolve_array(
        &self,
        schema: &Schema,
        is_anonymous: bool,
        trail: &mut Trail,
    ) -> Result<ResolvedType, ResolveError> {
        self.debug(|| format!("resolving array (anon: {})", is_anonymous));

        let mut result = ResolvedType {
            is_array: true,
            swagger_type: ARRAY.to_string(),
            has_additional_items: schema
                .additional_items
                .as_ref()
                .is_some_and(|ai| ai.allows() || ai.schema().is_some()),
            extensions: schema.extensions.clone(),
            ..ResolvedType::default()
        };

        let item = match &schema.items {
            None => {
                result.go_type = format!("[]{}", IFACE);
                result.elem_type = Some(Box::new(ResolvedType::interface()));
                self.infer_aliasing(&mut result, schema, is_anonymous);
                return Ok(result);
            }
            // tuple members are resolved one by one by the renderer
            Some(SchemaOrArray::Tuple(members)) if !members.is_empty() => {
                result.is_array = false;
                result.is_tuple = true;
                self.infer_aliasing(&mut result, schema, is_anonymous);
                return Ok(result);
            }
            Some(SchemaOrArray::Tuple(_)) => None,
            Some(SchemaOrArray::Single(item)) => Some(item.as_ref()),
        };

        let mut elem = self.resolve(item, true, false, trail)?;
        // a polymorphic element already carries its own indirection
        elem.is_nullable = item.is_some_and(|s| self.is_nullable(s)) && !elem.has_discriminator;
        result.go_type = if elem.is_nullable && !elem.go_type.starts_with('*') {
            format!("[]*{}", elem.go_type)
        } else {
            format!("[]{}", elem.go_type)
        };
        result.elem_type = Some(Box::new(elem));
        self.infer_aliasing(&mut result, schema, is_anonymous);

        Ok(result)
    }
}
