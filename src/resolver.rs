//! Schema resolution - decides the Go type of a schema node.

use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::ResolveError;
use crate::known_defs::{known_def_go_type, DefinitionName, KnownDefinitions};
use crate::loader::{definition_name, Document};
use crate::mapping::{
    go_type_for, go_type_for_format, is_custom_formatter, is_primitive, normalize_format, IFACE,
};
use crate::naming::{GoNames, IdentifierCase};
use crate::nullability::{
    nullable_bool, nullable_number, nullable_string, nullable_strfmt, structural_extension,
};
use crate::schema::Schema;
use crate::types::{
    ResolvedType, ResolverOptions, ARRAY, BINARY, BOOLEAN, FILE, INTEGER, NULL, NUMBER, OBJECT,
    STRING, X_OMIT_EMPTY,
};

/// References currently being expanded, outermost first.
pub(crate) type Trail = Vec<String>;

/// Owns the collaborators needed to resolve the schemas of one document.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use swagger_types::{Document, Resolution, ResolverOptions};
///
/// let doc = Document::from_value(json!({
///     "definitions": {
///         "Pet": {
///             "type": "object",
///             "properties": { "name": { "type": "string" } }
///         }
///     }
/// }))
/// .unwrap();
///
/// let resolution = Resolution::new(&doc, ResolverOptions::new("models"));
/// let pet = resolution.resolver().resolve_definition("Pet").unwrap();
/// assert!(pet.is_complex_object);
/// assert_eq!(pet.go_type, "models.Pet");
/// ```
#[derive(Debug)]
pub struct Resolution<'d> {
    doc: &'d Document,
    known_defs: KnownDefinitions,
    names: GoNames,
    diagnostics: TracingDiagnostics,
    options: ResolverOptions,
}

impl<'d> Resolution<'d> {
    pub fn new(doc: &'d Document, options: ResolverOptions) -> Self {
        let diagnostics = TracingDiagnostics::new(options.debug);
        let known_defs = KnownDefinitions::build(doc, &diagnostics);
        Self {
            doc,
            known_defs,
            names: GoNames,
            diagnostics,
            options,
        }
    }

    pub fn known_definitions(&self) -> &KnownDefinitions {
        &self.known_defs
    }

    /// A resolver with no current model name.
    pub fn resolver(&self) -> TypeResolver<'_> {
        TypeResolver::new(
            self.doc,
            &self.known_defs,
            &self.names,
            &self.diagnostics,
            self.options.models_package.clone(),
        )
    }
}

/// Resolves schemas of a document into [`ResolvedType`]s.
///
/// A resolver only borrows its collaborators, so it is cheap to derive one
/// per model with [`TypeResolver::with_model_name`] and safe to share across
/// threads.
#[derive(Clone)]
pub struct TypeResolver<'a> {
    doc: &'a Document,
    known_defs: &'a KnownDefinitions,
    names: &'a dyn IdentifierCase,
    diagnostics: &'a dyn Diagnostics,
    models_package: String,
    model_name: String,
}

impl<'a> TypeResolver<'a> {
    pub fn new(
        doc: &'a Document,
        known_defs: &'a KnownDefinitions,
        names: &'a dyn IdentifierCase,
        diagnostics: &'a dyn Diagnostics,
        models_package: impl Into<String>,
    ) -> Self {
        Self {
            doc,
            known_defs,
            names,
            diagnostics,
            models_package: models_package.into(),
            model_name: String::new(),
        }
    }

    /// Derive a resolver for the named model, sharing every collaborator.
    pub fn with_model_name(&self, name: impl Into<String>) -> Self {
        Self {
            model_name: name.into(),
            ..self.clone()
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn models_package(&self) -> &str {
        &self.models_package
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Resolve a schema node.
    ///
    /// `is_anonymous` is true for inline schemas, `is_required` when the
    /// containing object requires the value. `None` resolves to `interface{}`.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::ReferenceResolution` if a `$ref` cannot be
    /// dereferenced, or `ResolveError::UnresolvableType` for an unknown type.
    pub fn resolve_schema(
        &self,
        schema: Option<&Schema>,
        is_anonymous: bool,
        is_required: bool,
    ) -> Result<ResolvedType, ResolveError> {
        self.resolve(schema, is_anonymous, is_required, &mut Trail::new())
    }

    /// Resolve a top-level definition as a named model.
    ///
    /// # Errors
    ///
    /// Returns `ResolveError::ReferenceResolution` if there is no such
    /// definition, or any error of [`TypeResolver::resolve_schema`].
    pub fn resolve_definition(&self, name: &str) -> Result<ResolvedType, ResolveError> {
        let schema = self.doc.definition(name).ok_or_else(|| {
            ResolveError::reference(&format!("#/definitions/{}", name), "definition not found")
        })?;
        let mut trail = vec![definition_key(name)];
        self.with_model_name(name)
            .resolve(Some(schema), false, false, &mut trail)
    }

    /// Nullability of a schema used as a whole: an explicit extension, else
    /// an object with properties or a composition.
    pub fn is_nullable(&self, schema: &Schema) -> bool {
        structural_extension(&schema.extensions)
            .unwrap_or(!schema.properties.is_empty() || !schema.all_of.is_empty())
    }

    /// Whether `x-omitempty: true` is set.
    pub fn is_empty_omitted(&self, schema: &Schema) -> bool {
        schema.extensions.get_bool(X_OMIT_EMPTY) == Some(true)
    }

    /// Go name of a model, qualified with the models package when it is a
    /// known definition.
    pub fn go_type_name(&self, name: &str) -> String {
        if name.is_empty() {
            return String::new();
        }
        let go_name = self.names.to_go_name(name);
        if !self.models_package.is_empty() && self.known_defs.contains(name) {
            return format!("{}.{}", self.models_package, go_name);
        }
        go_name
    }

    /// Declared Go name of a definition, as every call site must see it.
    pub(crate) fn declared_name(&self, def: &str, schema: &Schema) -> DefinitionName {
        if def.is_empty() {
            return DefinitionName::default();
        }
        let case = |name: &str| self.go_type_name(name);
        known_def_go_type(def, schema, Some(&case), self.diagnostics)
    }

    pub(crate) fn debug(&self, message: impl FnOnce() -> String) {
        if self.diagnostics.debug_enabled() {
            self.diagnostics.debug(&message());
        }
    }

    pub(crate) fn resolve(
        &self,
        schema: Option<&Schema>,
        is_anonymous: bool,
        is_required: bool,
        trail: &mut Trail,
    ) -> Result<ResolvedType, ResolveError> {
        self.debug(|| {
            format!(
                "resolving schema (anon: {}, req: {}) {}",
                is_anonymous, is_required, self.model_name
            )
        });
        let Some(schema) = schema else {
            return Ok(ResolvedType::interface());
        };

        if let Some(reference) = schema.ref_str() {
            let mut result = self.resolve_ref(reference, is_required, trail)?;
            if !is_anonymous {
                result.is_map = false;
                result.is_complex_object = true;
            }
            return Ok(result);
        }

        let mut result = self.resolve_structure(schema, is_anonymous, is_required, trail)?;
        result.is_empty_omitted = self.is_empty_omitted(schema);
        Ok(result)
    }

    fn resolve_structure(
        &self,
        schema: &Schema,
        is_anonymous: bool,
        is_required: bool,
        trail: &mut Trail,
    ) -> Result<ResolvedType, ResolveError> {
        let tpe = self.first_type(schema);

        // rendered as an io.ReadCloser
        if tpe == FILE {
            return Ok(ResolvedType {
                swagger_type: FILE.to_string(),
                is_primitive: true,
                is_stream: true,
                go_type: go_type_for(BINARY).unwrap_or_default().to_string(),
                ..ResolvedType::default()
            });
        }

        if let Some(result) = self.resolve_format(schema, is_anonymous, is_required) {
            return Ok(result);
        }

        match tpe {
            ARRAY => self.resolve_array(schema, is_anonymous, trail),

            NUMBER | INTEGER | BOOLEAN => {
                let mut result = ResolvedType {
                    go_type: go_type_for(tpe).unwrap_or_default().to_string(),
                    swagger_type: tpe.to_string(),
                    is_primitive: true,
                    extensions: schema.extensions.clone(),
                    ..ResolvedType::default()
                };
                self.infer_aliasing(&mut result, schema, is_anonymous);
                result.is_nullable = if tpe == BOOLEAN {
                    nullable_bool(schema, is_required)
                } else {
                    nullable_number(schema, is_required)
                };
                Ok(result)
            }

            STRING => {
                let mut result = ResolvedType {
                    go_type: STRING.to_string(),
                    swagger_type: STRING.to_string(),
                    is_primitive: true,
                    extensions: schema.extensions.clone(),
                    ..ResolvedType::default()
                };
                self.infer_aliasing(&mut result, schema, is_anonymous);
                result.is_nullable = nullable_string(schema, is_required);
                Ok(result)
            }

            OBJECT => {
                let mut result = self.resolve_object(schema, is_anonymous, trail)?;
                // a local discriminator wins over whatever a reference carried
                result.has_discriminator = schema.discriminator().is_some();
                Ok(result)
            }

            NULL => Ok(ResolvedType {
                swagger_type: OBJECT.to_string(),
                ..ResolvedType::interface()
            }),

            _ => Err(ResolveError::UnresolvableType {
                types: schema.types.clone(),
                format: schema.format.clone(),
            }),
        }
    }

    fn resolve_ref(
        &self,
        reference: &str,
        is_required: bool,
        trail: &mut Trail,
    ) -> Result<ResolvedType, ResolveError> {
        self.debug(|| {
            format!(
                "resolving ref (anon: false, req: {}) {}",
                is_required, reference
            )
        });
        let target = self.doc.resolve_ref(reference).map_err(|e| {
            self.debug(|| format!("error resolving ref {}: {}", reference, e));
            e
        })?;
        let def = definition_name(reference);
        let key = match &def {
            Some(name) => definition_key(name),
            None => reference.to_string(),
        };

        if trail.contains(&key) {
            return Ok(self.name_only_ref(reference, def.as_deref(), &target));
        }

        trail.push(key);
        let resolved = match def.as_deref() {
            Some(name) => {
                self.with_model_name(name)
                    .resolve(Some(&target), false, is_required, trail)
            }
            None => self.resolve(Some(&target), true, is_required, trail),
        };
        trail.pop();
        let mut result = resolved?;

        if let Some(name) = def.as_deref() {
            let declared = self.declared_name(name, &target);
            self.debug(|| {
                format!(
                    "type name {}, package {}, alias {}",
                    declared.go_type, declared.pkg, declared.pkg_alias
                )
            });
            result.go_type = declared.go_type;
            result.pkg = declared.pkg;
            result.pkg_alias = declared.pkg_alias;
        }
        result.is_base_type = result.has_discriminator;
        result.is_nullable = self.is_nullable(&target);
        Ok(result)
    }

    /// Stand-in for a reference met again while it is being expanded: the
    /// type is only named, never inlined a second time. A pointer that is not
    /// a definition has no name and gets the structural type of its target.
    fn name_only_ref(&self, reference: &str, def: Option<&str>, target: &Schema) -> ResolvedType {
        self.debug(|| format!("reference cycle on {}, using its name only", reference));
        let tpe = self.first_type(target);
        let has_discriminator = target.discriminator().is_some();
        let mut result = ResolvedType {
            swagger_type: tpe.to_string(),
            is_nullable: self.is_nullable(target),
            has_discriminator,
            is_base_type: has_discriminator,
            ..ResolvedType::default()
        };

        match def {
            Some(name) => {
                let declared = self.declared_name(name, target);
                result.go_type = declared.go_type;
                result.pkg = declared.pkg;
                result.pkg_alias = declared.pkg_alias;
                result.is_complex_object = tpe == OBJECT;
            }
            None => {
                result.go_type = structural_go_type(target, tpe);
                result.is_array = tpe == ARRAY;
                result.is_interface = result.go_type == IFACE;
                result.is_primitive = is_primitive(&result.go_type);
            }
        }
        result
    }

    fn resolve_format(
        &self,
        schema: &Schema,
        is_anonymous: bool,
        is_required: bool,
    ) -> Option<ResolvedType> {
        let format = schema.format.as_deref().filter(|f| !f.is_empty())?;
        let normalized = normalize_format(format);
        let go_type = go_type_for(&normalized)?;
        self.debug(|| {
            format!(
                "resolving format {} (anon: {}, req: {})",
                format, is_anonymous, is_required
            )
        });

        let is_binary = normalized == BINARY;
        let swagger_type = schema
            .types
            .first()
            .filter(|t| !t.is_empty())
            .map_or(STRING, String::as_str);

        let mut result = ResolvedType {
            swagger_type: swagger_type.to_string(),
            swagger_format: format.to_string(),
            go_type: go_type.to_string(),
            // a binary stream is an io.ReadCloser, not a primitive
            is_primitive: !is_binary,
            is_stream: is_binary,
            is_custom_formatter: !is_binary && is_custom_formatter(go_type),
            extensions: schema.extensions.clone(),
            ..ResolvedType::default()
        };
        self.infer_aliasing(&mut result, schema, is_anonymous);

        result.is_nullable = match swagger_type {
            STRING => nullable_strfmt(schema, is_required),
            NUMBER | INTEGER => nullable_number(schema, is_required),
            _ => self.is_nullable(schema),
        };
        Some(result)
    }

    /// A named definition becomes an alias over its structural type.
    pub(crate) fn infer_aliasing(
        &self,
        result: &mut ResolvedType,
        schema: &Schema,
        is_anonymous: bool,
    ) {
        if is_anonymous || self.model_name.is_empty() {
            return;
        }
        let declared = self.declared_name(&self.model_name, schema);
        result.aliased_type = std::mem::replace(&mut result.go_type, declared.go_type);
        result.is_aliased = true;
        result.pkg = declared.pkg;
        result.pkg_alias = declared.pkg_alias;
    }

    pub(crate) fn first_type<'s>(&self, schema: &'s Schema) -> &'s str {
        match schema.types.first() {
            None => OBJECT,
            Some(t) if t.is_empty() => OBJECT,
            Some(t) => {
                if schema.types.len() > 1 {
                    self.diagnostics.warn(&format!(
                        "JSON-Schema type definition as array with several types is not supported in {:?}. Taking the first type: {}",
                        schema.types, t
                    ));
                }
                t
            }
        }
    }
}

impl std::fmt::Debug for TypeResolver<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeResolver")
            .field("models_package", &self.models_package)
            .field("model_name", &self.model_name)
            .field("known_defs", &self.known_defs.len())
            .finish()
    }
}

/// Go type of a schema without descending into it.
fn structural_go_type(schema: &Schema, tpe: &str) -> String {
    if let Some(go_type) = schema.format.as_deref().and_then(go_type_for_format) {
        return go_type.to_string();
    }
    match tpe {
        STRING => STRING.to_string(),
        ARRAY => format!("[]{}", IFACE),
        FILE => go_type_for(BINARY).unwrap_or(IFACE).to_string(),
        other => go_type_for(other).unwrap_or(IFACE).to_string(),
    }
}

fn definition_key(name: &str) -> String {
    format!("definitions:{}", name)
}
