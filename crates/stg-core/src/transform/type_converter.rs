use crate::error::ConvertError;
use crate::parse::schema::{Schema, SchemaKind, SchemaOrRef};
use crate::parse::spec::SwaggerSpec;
use crate::view::{PropertyExpr, TypeExpr, TypeKind};

use super::name_normalizer::to_safe_type_name;

/// Convert a schema node to a TypeScript type expression.
///
/// References are named, never expanded; only `allOf` inheritance reads the
/// referenced definition, to copy its properties.
pub fn convert(schema: &SchemaOrRef, spec: &SwaggerSpec) -> Result<TypeExpr, ConvertError> {
    convert_inner(schema, spec, &mut Vec::new())
}

/// Convert the body of the definition `name`. The name seeds the `allOf`
/// visited stack so a definition never inherits from itself.
pub fn convert_definition(
    name: &str,
    schema: &SchemaOrRef,
    spec: &SwaggerSpec,
) -> Result<TypeExpr, ConvertError> {
    convert_inner(schema, spec, &mut vec![name.to_string()])
}

/// Remove `Array<...>` wrapping to get the bare importable name.
pub fn strip_container(type_expr: &str) -> String {
    let mut bare = type_expr.replace('>', "");
    while bare.contains("Array<") {
        bare = bare.replace("Array<", "");
    }
    bare
}

fn convert_inner(
    schema: &SchemaOrRef,
    spec: &SwaggerSpec,
    inherited: &mut Vec<String>,
) -> Result<TypeExpr, ConvertError> {
    let mut converted = match schema.kind()? {
        SchemaKind::Reference(ref_path) => {
            let (name, _) = spec.lookup_definition(ref_path)?;
            let type_name = to_safe_type_name(name);
            let mut t = TypeExpr::new(type_name.clone(), TypeKind::Reference);
            t.import_target = Some(type_name);
            t
        }
        SchemaKind::Enum(values) => {
            let literals: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            TypeExpr::new(literals.join(" | "), TypeKind::Enum)
        }
        SchemaKind::Primitive(primitive) => TypeExpr::new(primitive.as_str(), TypeKind::Primitive),
        SchemaKind::Array(items) => {
            let element = convert_inner(items, spec, inherited)?;
            let mut t = TypeExpr::new(format!("Array<{}>", element.expr), TypeKind::Array);
            t.import_target = element.import_target.clone();
            t.element = Some(Box::new(element));
            t
        }
        SchemaKind::Map(values) => {
            let value = convert_inner(values, spec, inherited)?;
            let mut t = TypeExpr::new(
                format!("{{ [key: string]: {} }}", value.expr),
                TypeKind::Map,
            );
            t.import_target = value.import_target.clone();
            t.element = Some(Box::new(value));
            t
        }
        SchemaKind::Object(object) => {
            let mut t = TypeExpr::new("object", TypeKind::Object);
            t.properties = object_properties(object, spec, inherited)?;
            t
        }
    };
    converted.description = schema.description().map(str::to_string);
    Ok(converted)
}

fn object_properties(
    schema: &Schema,
    spec: &SwaggerSpec,
    inherited: &mut Vec<String>,
) -> Result<Vec<PropertyExpr>, ConvertError> {
    let mut properties = Vec::new();

    for member in &schema.all_of {
        match member {
            SchemaOrRef::Ref { ref_path } => {
                let (name, parent) = spec.lookup_definition(ref_path)?;
                if inherited.iter().any(|n| n == name) {
                    log::warn!("allOf cycle through `{name}`, not inheriting again");
                    continue;
                }
                inherited.push(name.to_string());
                let parent = convert_inner(parent, spec, inherited);
                inherited.pop();
                properties.extend(parent?.properties);
            }
            SchemaOrRef::Schema(_) => {
                properties.extend(convert_inner(member, spec, inherited)?.properties);
            }
        }
    }

    for (name, prop) in &schema.properties {
        properties.push(PropertyExpr {
            name: name.clone(),
            type_expr: convert_inner(prop, spec, inherited)?,
            optional: !schema.required.contains(name),
        });
    }

    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;

    fn spec_with(definitions: &str) -> SwaggerSpec {
        let yaml = format!(
            "swagger: '2.0'\ninfo:\n  title: T\n  version: '1'\ndefinitions:\n{definitions}"
        );
        serde_yaml_ng::from_str(&yaml).unwrap()
    }

    fn node(yaml: &str) -> SchemaOrRef {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    const PETS: &str = r#"
  Pet:
    type: object
    required: [name]
    properties:
      id:
        type: integer
      name:
        type: string
  pet-store.model:
    type: string
"#;

    #[test]
    fn test_primitives() {
        let spec = spec_with(PETS);
        assert_eq!(convert(&node("type: string"), &spec).unwrap().expr, "string");
        assert_eq!(convert(&node("type: integer"), &spec).unwrap().expr, "number");
        assert_eq!(convert(&node("type: number"), &spec).unwrap().expr, "number");
        assert_eq!(convert(&node("type: boolean"), &spec).unwrap().expr, "boolean");
        assert_eq!(convert(&node("type: file"), &spec).unwrap().expr, "any");
        let s = convert(&node("type: string"), &spec).unwrap();
        assert!(s.is_atomic());
        assert!(s.import_target.is_none());
    }

    #[test]
    fn test_reference_uses_safe_name() {
        let spec = spec_with(PETS);
        let t = convert(&node("$ref: '#/definitions/pet-store.model'"), &spec).unwrap();
        assert_eq!(t.kind, TypeKind::Reference);
        assert_eq!(t.expr, "PetStoreModel");
        assert_eq!(t.import_target.as_deref(), Some("PetStoreModel"));
    }

    #[test]
    fn test_unknown_reference() {
        let spec = spec_with(PETS);
        let err = convert(&node("$ref: '#/definitions/Dog'"), &spec).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Resolve(ResolveError::RefTargetNotFound(_))
        ));
    }

    #[test]
    fn test_array_of_refs() {
        let spec = spec_with(PETS);
        let t = convert(&node("type: array\nitems:\n  $ref: '#/definitions/Pet'"), &spec).unwrap();
        assert_eq!(t.kind, TypeKind::Array);
        assert_eq!(t.expr, "Array<Pet>");
        assert_eq!(t.import_target.as_deref(), Some("Pet"));
        assert_eq!(t.element.unwrap().kind, TypeKind::Reference);
    }

    #[test]
    fn test_enum_literals() {
        let spec = spec_with(PETS);
        let t = convert(&node("type: string\nenum: [available, sold]"), &spec).unwrap();
        assert_eq!(t.kind, TypeKind::Enum);
        assert_eq!(t.expr, r#""available" | "sold""#);
        let t = convert(&node("type: integer\nenum: [1, 2]"), &spec).unwrap();
        assert_eq!(t.expr, "1 | 2");
    }

    #[test]
    fn test_object_properties() {
        let spec = spec_with(PETS);
        let (_, pet) = spec.lookup_definition("Pet").unwrap();
        let t = convert(pet, &spec).unwrap();
        assert_eq!(t.expr, "object");
        let names: Vec<(&str, bool)> = t
            .properties
            .iter()
            .map(|p| (p.name.as_str(), p.optional))
            .collect();
        assert_eq!(names, vec![("id", true), ("name", false)]);
    }

    #[test]
    fn test_map() {
        let spec = spec_with(PETS);
        let t = convert(
            &node("type: object\nadditionalProperties:\n  $ref: '#/definitions/Pet'"),
            &spec,
        )
        .unwrap();
        assert_eq!(t.kind, TypeKind::Map);
        assert_eq!(t.expr, "{ [key: string]: Pet }");
        assert_eq!(t.import_target.as_deref(), Some("Pet"));
    }

    #[test]
    fn test_all_of_inherits_properties() {
        let spec = spec_with(
            r#"
  Base:
    properties:
      id:
        type: integer
  Dog:
    allOf:
      - $ref: '#/definitions/Base'
      - properties:
          bark:
            type: boolean
"#,
        );
        let (_, dog) = spec.lookup_definition("Dog").unwrap();
        let t = convert_definition("Dog", dog, &spec).unwrap();
        let names: Vec<&str> = t.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["id", "bark"]);
    }

    #[test]
    fn test_all_of_cycle_terminates() {
        let spec = spec_with(
            r#"
  A:
    allOf:
      - $ref: '#/definitions/B'
    properties:
      a:
        type: string
  B:
    allOf:
      - $ref: '#/definitions/A'
    properties:
      b:
        type: string
"#,
        );
        let (_, a) = spec.lookup_definition("A").unwrap();
        let t = convert_definition("A", a, &spec).unwrap();
        let names: Vec<&str> = t.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_malformed_nodes() {
        let spec = spec_with(PETS);
        assert!(matches!(
            convert(&node("type: array"), &spec),
            Err(ConvertError::MissingItems)
        ));
        assert!(matches!(
            convert(&node("type: date"), &spec),
            Err(ConvertError::Unsupported(_))
        ));
    }

    #[test]
    fn test_strip_container() {
        assert_eq!(strip_container("Array<Pet>"), "Pet");
        assert_eq!(strip_container("Array<Array<Pet>>"), "Pet");
        assert_eq!(strip_container("Pet"), "Pet");
    }

    #[test]
    fn test_strip_container_is_idempotent() {
        for x in [
            "Pet",
            "Array<Pet>",
            "Array<Array<string>>",
            "ArrArray<ay<Pet>",
            ">>Array<",
            "",
        ] {
            let once = strip_container(x);
            assert_eq!(strip_container(&once), once, "not idempotent for {x:?}");
        }
    }
}
