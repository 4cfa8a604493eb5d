//! Integration tests for schema type resolution.

use serde_json::{json, Value};
use swagger_types::{
    load_document, Document, ResolveError, ResolvedType, Resolution, ResolverOptions, Schema,
};

fn document(definitions: Value) -> Document {
    Document::from_value(json!({
        "swagger": "2.0",
        "info": { "title": "test", "version": "1.0" },
        "paths": {},
        "definitions": definitions
    }))
    .unwrap()
}

fn schema(value: Value) -> Schema {
    Schema::from_value(&value).unwrap()
}

fn resolve_inline(doc: &Document, value: Value, is_required: bool) -> ResolvedType {
    let resolution = Resolution::new(doc, ResolverOptions::default());
    resolution
        .resolver()
        .resolve_schema(Some(&schema(value)), true, is_required)
        .unwrap()
}

// === Resolution invariants ===

mod invariants {
    use super::*;

    fn petstore() -> Document {
        document(json!({
            "Pet": {
                "type": "object",
                "discriminator": "petType",
                "properties": {
                    "petType": { "type": "string" },
                    "tags": { "type": "array", "items": { "$ref": "#/definitions/Tag" } }
                }
            },
            "Tag": {
                "type": "object",
                "properties": { "name": { "type": "string" } }
            },
            "Labels": {
                "type": "object",
                "additionalProperties": { "type": "array", "items": { "type": "string" } }
            },
            "Pair": {
                "type": "array",
                "items": [{ "type": "string" }, { "type": "integer" }]
            }
        }))
    }

    #[test]
    fn resolution_is_idempotent() {
        let doc = petstore();
        let resolution = Resolution::new(&doc, ResolverOptions::new("models"));
        let resolver = resolution.resolver();

        for name in ["Pet", "Tag", "Labels", "Pair"] {
            let first = resolver.resolve_definition(name).unwrap();
            let second = resolver.resolve_definition(name).unwrap();
            assert_eq!(first, second, "{name}");
        }

        let s = schema(json!({ "$ref": "#/definitions/Pet" }));
        for (anon, req) in [(true, true), (true, false), (false, true), (false, false)] {
            let first = resolver.resolve_schema(Some(&s), anon, req).unwrap();
            let second = resolver.resolve_schema(Some(&s), anon, req).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn array_and_tuple_are_exclusive() {
        let doc = petstore();
        let resolution = Resolution::new(&doc, ResolverOptions::default());
        let resolver = resolution.resolver();

        for name in ["Pet", "Tag", "Labels", "Pair"] {
            let rt = resolver.resolve_definition(name).unwrap();
            assert!(!(rt.is_array && rt.is_tuple), "{name}");
        }
        let pair = resolver.resolve_definition("Pair").unwrap();
        assert!(pair.is_tuple);
        assert!(!pair.is_array);
    }

    #[test]
    fn input_schema_is_not_mutated() {
        let doc = petstore();
        let before = doc.definition("Pet").cloned().unwrap();
        let resolution = Resolution::new(&doc, ResolverOptions::default());
        resolution.resolver().resolve_definition("Pet").unwrap();
        assert_eq!(doc.definition("Pet"), Some(&before));
    }

    #[test]
    fn reference_names_are_stable_across_call_sites() {
        let doc = document(json!({
            "Name": { "type": "string" },
            "Person": {
                "type": "object",
                "properties": {
                    "first": { "$ref": "#/definitions/Name" },
                    "last": { "$ref": "#/definitions/Name" }
                }
            },
            "Names": { "type": "array", "items": { "$ref": "#/definitions/Name" } }
        }));
        let resolution = Resolution::new(&doc, ResolverOptions::new("models"));
        let resolver = resolution.resolver();

        let direct = resolver.resolve_definition("Name").unwrap();
        let person = doc.definition("Person").unwrap();
        let first = resolver
            .with_model_name("Person")
            .resolve_schema(person.properties.get("first"), true, true)
            .unwrap();
        let last = resolver
            .with_model_name("Person")
            .resolve_schema(person.properties.get("last"), true, false)
            .unwrap();
        let names = resolver.resolve_definition("Names").unwrap();

        assert_eq!(direct.go_type, "models.Name");
        assert_eq!(first.go_type, direct.go_type);
        assert_eq!(last.go_type, direct.go_type);
        assert_eq!(names.elem_type.unwrap().go_type, direct.go_type);
    }
}

// === Nullability overrides ===

mod overrides {
    use super::*;

    #[test]
    fn extension_dominates_every_heuristic() {
        let doc = document(json!({}));
        let cases = [
            json!({ "type": "integer", "minimum": 0 }),
            json!({ "type": "integer", "default": 5 }),
            json!({ "type": "number", "minimum": -1, "maximum": 1 }),
            json!({ "type": "string", "minLength": 0 }),
            json!({ "type": "string", "default": "abc" }),
            json!({ "type": "string", "format": "date" }),
            json!({ "type": "boolean", "default": true }),
            json!({ "type": "object", "properties": { "a": { "type": "string" } } }),
            json!({ "allOf": [{ "type": "object", "properties": { "a": { "type": "string" } } }] }),
        ];

        for base in cases {
            for value in [true, false] {
                for key in ["x-nullable", "x-isnullable"] {
                    let mut s = base.clone();
                    s[key] = json!(value);
                    for required in [true, false] {
                        let rt = resolve_inline(&doc, s.clone(), required);
                        assert_eq!(rt.is_nullable, value, "{s} required={required}");
                    }
                }
            }
        }
    }

    #[test]
    fn ref_uses_target_override() {
        let doc = document(json!({
            "Tag": {
                "type": "object",
                "x-nullable": false,
                "properties": { "name": { "type": "string" } }
            }
        }));
        let rt = resolve_inline(&doc, json!({ "$ref": "#/definitions/Tag" }), true);
        assert!(!rt.is_nullable);
    }
}

// === Numeric and string boundaries ===

mod boundaries {
    use super::*;

    #[test]
    fn required_integer_without_default_is_nullable() {
        let doc = document(json!({}));
        let rt = resolve_inline(&doc, json!({ "type": "integer" }), true);
        assert!(rt.is_nullable);
        assert_eq!(rt.go_type, "int64");
    }

    #[test]
    fn optional_integer_without_bounds_is_not_nullable() {
        let doc = document(json!({}));
        let rt = resolve_inline(&doc, json!({ "type": "integer" }), false);
        assert!(!rt.is_nullable);
    }

    #[test]
    fn zero_admitting_bounds_keep_pointers() {
        let doc = document(json!({}));
        assert!(resolve_inline(&doc, json!({ "type": "integer", "minimum": 0 }), false).is_nullable);
        assert!(resolve_inline(&doc, json!({ "type": "integer", "maximum": 0 }), false).is_nullable);
        assert!(
            resolve_inline(&doc, json!({ "type": "integer", "minimum": -3, "maximum": 3 }), false)
                .is_nullable
        );
        assert!(
            !resolve_inline(
                &doc,
                json!({ "type": "integer", "minimum": 0, "exclusiveMinimum": true }),
                false
            )
            .is_nullable
        );
    }

    #[test]
    fn non_zero_default_without_bounds() {
        let doc = document(json!({}));
        assert!(resolve_inline(&doc, json!({ "type": "number", "default": 2 }), false).is_nullable);
        assert!(!resolve_inline(&doc, json!({ "type": "number", "default": 0 }), false).is_nullable);
        assert!(
            !resolve_inline(&doc, json!({ "type": "number", "default": 2, "minimum": 1 }), false)
                .is_nullable
        );
    }

    #[test]
    fn read_only_numbers_are_values() {
        let doc = document(json!({}));
        let rt = resolve_inline(&doc, json!({ "type": "integer", "readOnly": true }), true);
        assert!(!rt.is_nullable);
    }

    #[test]
    fn strings() {
        let doc = document(json!({}));
        assert!(resolve_inline(&doc, json!({ "type": "string" }), true).is_nullable);
        assert!(!resolve_inline(&doc, json!({ "type": "string" }), false).is_nullable);
        assert!(resolve_inline(&doc, json!({ "type": "string", "minLength": 0 }), false).is_nullable);
        assert!(
            !resolve_inline(&doc, json!({ "type": "string", "default": "a", "minLength": 1 }), false)
                .is_nullable
        );
    }
}

// === Arrays ===

mod arrays {
    use super::*;

    #[test]
    fn array_of_nullable_objects_has_one_indirection() {
        let doc = document(json!({}));
        let rt = resolve_inline(
            &doc,
            json!({
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": { "id": { "type": "integer" } }
                }
            }),
            true,
        );
        assert!(rt.is_array);
        assert!(!rt.is_nullable);

        let elem = rt.elem_type.as_ref().unwrap();
        assert!(elem.is_nullable);
        assert!(!elem.go_type.starts_with('*'));
        assert_eq!(rt.go_type, format!("[]*{}", elem.go_type));
        assert!(!rt.go_type.contains("**"));
    }

    #[test]
    fn array_of_base_types_is_not_indirected() {
        let doc = document(json!({
            "Shape": {
                "type": "object",
                "discriminator": "kind",
                "properties": { "kind": { "type": "string" } }
            }
        }));
        let rt = resolve_inline(
            &doc,
            json!({ "type": "array", "items": { "$ref": "#/definitions/Shape" } }),
            false,
        );
        assert_eq!(rt.go_type, "[]Shape");
        assert!(rt.elem_type.unwrap().is_base_type);
    }

    #[test]
    fn array_without_items_degrades_to_interface() {
        let doc = document(json!({}));
        let rt = resolve_inline(&doc, json!({ "type": "array" }), false);
        assert_eq!(rt.go_type, "[]interface{}");
    }
}

// === Maps and objects ===

mod objects {
    use super::*;

    #[test]
    fn hybrid_properties_and_additional_properties() {
        let doc = document(json!({}));
        let rt = resolve_inline(
            &doc,
            json!({
                "type": "object",
                "properties": { "id": { "type": "string" } },
                "additionalProperties": { "type": "integer" }
            }),
            false,
        );
        assert!(rt.is_complex_object);
        assert!(!rt.is_map);
        let elem = rt.elem_type.unwrap();
        assert_eq!(elem.go_type, "int64");
    }

    #[test]
    fn pure_map_of_refs() {
        let doc = document(json!({
            "Tag": {
                "type": "object",
                "properties": { "name": { "type": "string" } }
            }
        }));
        let resolution = Resolution::new(&doc, ResolverOptions::new("models"));
        let rt = resolution
            .resolver()
            .resolve_schema(
                Some(&schema(json!({
                    "type": "object",
                    "additionalProperties": { "$ref": "#/definitions/Tag" }
                }))),
                true,
                false,
            )
            .unwrap();
        assert!(rt.is_map);
        assert!(rt.is_map_null_override);
        assert_eq!(rt.go_type, "map[string]models.Tag");
        assert_eq!(rt.zero(), "make(map[string]models.Tag, 50)");
    }

    #[test]
    fn long_chain_of_maps_of_arrays_resolves_once_per_level() {
        const DEPTH: usize = 40;
        let mut definitions = serde_json::Map::new();
        for i in 0..DEPTH {
            definitions.insert(
                format!("Level{i}"),
                json!({
                    "type": "object",
                    "additionalProperties": {
                        "type": "array",
                        "items": { "$ref": format!("#/definitions/Level{}", i + 1) }
                    }
                }),
            );
        }
        definitions.insert(
            format!("Level{DEPTH}"),
            json!({ "type": "object", "properties": { "id": { "type": "string" } } }),
        );
        let doc = document(Value::Object(definitions));

        let resolution = Resolution::new(&doc, ResolverOptions::default());
        let rt = resolution.resolver().resolve_definition("Level0").unwrap();
        assert_eq!(rt.go_type, "Level0");
        assert_eq!(rt.aliased_type, "map[string][]Level1");
        assert!(rt.is_map_null_override);
    }

    #[test]
    fn map_of_arrays_of_polymorphic_inline_objects() {
        let doc = document(json!({}));
        let rt = resolve_inline(
            &doc,
            json!({
                "type": "object",
                "additionalProperties": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "discriminator": "kind",
                        "properties": { "kind": { "type": "string" } }
                    }
                }
            }),
            false,
        );
        assert!(rt.is_map);
        // the element dropped its pointer, the inline object is still nullable
        assert!(!rt.elem_type.unwrap().elem_type.unwrap().is_nullable);
        assert!(!rt.is_map_null_override);
    }

    #[test]
    fn free_form_object() {
        let doc = document(json!({}));
        let rt = resolve_inline(&doc, json!({}), false);
        assert!(rt.is_interface);
        assert!(rt.is_map);
        assert_eq!(rt.zero(), "nil");
    }

    #[test]
    fn composition_named_after_model() {
        let doc = document(json!({
            "Base": {
                "type": "object",
                "properties": { "id": { "type": "string" } }
            },
            "Derived": {
                "allOf": [
                    { "$ref": "#/definitions/Base" },
                    { "type": "object", "properties": { "extra": { "type": "string" } } }
                ]
            }
        }));
        let resolution = Resolution::new(&doc, ResolverOptions::new("models"));
        let rt = resolution.resolver().resolve_definition("Derived").unwrap();
        assert!(rt.is_complex_object);
        assert!(rt.is_nullable);
        assert_eq!(rt.go_type, "models.Derived");
        assert_eq!(rt.zero(), "new(models.Derived)");
    }
}

// === Formats ===

mod formats {
    use super::*;

    #[test]
    fn date_format() {
        let doc = document(json!({}));
        let optional = resolve_inline(&doc, json!({ "type": "string", "format": "date" }), false);
        assert!(optional.is_primitive);
        assert!(optional.is_custom_formatter);
        assert!(!optional.is_nullable);
        assert_eq!(optional.go_type, "strfmt.Date");
        assert_eq!(optional.zero(), "strfmt.Date{}");

        let required = resolve_inline(&doc, json!({ "type": "string", "format": "date" }), true);
        assert!(required.is_nullable);
    }

    #[test]
    fn hyphenated_format() {
        let doc = document(json!({}));
        let rt = resolve_inline(&doc, json!({ "type": "string", "format": "date-time" }), false);
        assert_eq!(rt.go_type, "strfmt.DateTime");
    }

    #[test]
    fn unknown_format_falls_back_to_type() {
        let doc = document(json!({}));
        let rt = resolve_inline(&doc, json!({ "type": "string", "format": "zipcode" }), false);
        assert_eq!(rt.go_type, "string");
        assert!(!rt.is_custom_formatter);
    }

    #[test]
    fn named_format_is_aliased() {
        let doc = document(json!({ "Birthday": { "type": "string", "format": "date" } }));
        let resolution = Resolution::new(&doc, ResolverOptions::default());
        let rt = resolution.resolver().resolve_definition("Birthday").unwrap();
        assert!(rt.is_aliased);
        assert_eq!(rt.aliased_type, "strfmt.Date");
        assert_eq!(rt.go_type, "Birthday");
        assert_eq!(rt.zero(), "Birthday(strfmt.Date{})");
    }
}

// === Polymorphism ===

mod polymorphism {
    use super::*;

    #[test]
    fn discriminator_is_inherited_through_ref() {
        let doc = document(json!({
            "Pet": {
                "type": "object",
                "discriminator": "petType",
                "required": ["petType"],
                "properties": { "petType": { "type": "string" } }
            },
            "AnyPet": { "$ref": "#/definitions/Pet" }
        }));
        let resolution = Resolution::new(&doc, ResolverOptions::default());
        let resolver = resolution.resolver();

        let pet = resolver.resolve_definition("Pet").unwrap();
        assert!(pet.has_discriminator);
        assert!(pet.is_base_type);

        let any_pet = resolver.resolve_definition("AnyPet").unwrap();
        assert!(any_pet.has_discriminator);
        assert!(any_pet.is_base_type);
        assert_eq!(any_pet.go_type, "Pet");
    }
}

// === References ===

mod references {
    use super::*;

    #[test]
    fn self_referencing_map_terminates() {
        let doc = document(json!({
            "Tree": {
                "type": "object",
                "additionalProperties": { "$ref": "#/definitions/Tree" }
            }
        }));
        let resolution = Resolution::new(&doc, ResolverOptions::default());
        let rt = resolution.resolver().resolve_definition("Tree").unwrap();
        assert_eq!(rt.go_type, "Tree");
        assert_eq!(rt.aliased_type, "map[string]Tree");
    }

    #[test]
    fn mutually_referencing_arrays_terminate() {
        let doc = document(json!({
            "Even": { "type": "array", "items": { "$ref": "#/definitions/Odd" } },
            "Odd": { "type": "array", "items": { "$ref": "#/definitions/Even" } }
        }));
        let resolution = Resolution::new(&doc, ResolverOptions::default());
        let resolver = resolution.resolver();

        let even = resolver.resolve_definition("Even").unwrap();
        let odd = even.elem_type.unwrap();
        assert_eq!(odd.go_type, "Odd");
        assert_eq!(odd.elem_type.unwrap().go_type, "Even");

        // entering through a reference rather than the definition itself
        let via_ref = resolver
            .resolve_schema(Some(&schema(json!({ "$ref": "#/definitions/Even" }))), true, false)
            .unwrap();
        assert_eq!(via_ref.go_type, "Even");
    }

    #[test]
    fn deep_self_reference_does_not_overflow() {
        let doc = document(json!({
            "Matrix": {
                "type": "array",
                "items": {
                    "type": "array",
                    "items": { "$ref": "#/definitions/Matrix" }
                }
            }
        }));
        let resolution = Resolution::new(&doc, ResolverOptions::default());
        let rt = resolution.resolver().resolve_definition("Matrix").unwrap();
        assert_eq!(rt.aliased_type, "[][]Matrix");
    }

    #[test]
    fn unresolvable_reference_propagates() {
        let doc = document(json!({
            "Broken": {
                "type": "array",
                "items": { "$ref": "#/definitions/Nowhere" }
            }
        }));
        let resolution = Resolution::new(&doc, ResolverOptions::default());
        let err = resolution.resolver().resolve_definition("Broken").unwrap_err();
        assert!(matches!(err, ResolveError::ReferenceResolution { .. }));
    }

    #[test]
    fn unknown_definition_is_a_reference_error() {
        let doc = document(json!({}));
        let resolution = Resolution::new(&doc, ResolverOptions::default());
        let err = resolution.resolver().resolve_definition("Ghost").unwrap_err();
        assert!(matches!(err, ResolveError::ReferenceResolution { .. }));
    }

    #[test]
    fn unresolvable_type_propagates_from_items() {
        let doc = document(json!({}));
        let resolution = Resolution::new(&doc, ResolverOptions::default());
        let s = schema(json!({ "type": "array", "items": { "type": "tuple" } }));
        let err = resolution
            .resolver()
            .resolve_schema(Some(&s), true, false)
            .unwrap_err();
        assert!(matches!(err, ResolveError::UnresolvableType { .. }));
    }

    #[test]
    fn external_types_are_reused() {
        let doc = document(json!({
            "Money": {
                "type": "string",
                "x-go-type": {
                    "type": "Decimal",
                    "import": { "package": "github.com/shopspring/decimal" }
                }
            }
        }));
        let resolution = Resolution::new(&doc, ResolverOptions::new("models"));
        let rt = resolution
            .resolver()
            .resolve_schema(Some(&schema(json!({ "$ref": "#/definitions/Money" }))), true, false)
            .unwrap();
        assert_eq!(rt.go_type, "decimal.Decimal");
        assert_eq!(rt.pkg, "github.com/shopspring/decimal");
        assert_eq!(rt.pkg_alias, "decimal");
    }
}

// === Loading ===

mod loading {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resolve_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("swagger.json");
        fs::write(
            &path,
            r#"{
                "swagger": "2.0",
                "definitions": {
                    "Id": { "type": "string", "format": "uuid" }
                }
            }"#,
        )
        .unwrap();

        let doc = load_document(&path).unwrap();
        let resolution = Resolution::new(&doc, ResolverOptions::new("models").debug(true));
        let rt = resolution.resolver().resolve_definition("Id").unwrap();
        assert_eq!(rt.go_type, "models.ID");
        assert_eq!(rt.aliased_type, "strfmt.UUID");
        assert_eq!(rt.zero(), "models.ID(strfmt.UUID(\"\"))");
    }
}
