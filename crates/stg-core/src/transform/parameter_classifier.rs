use crate::error::TransformError;
use crate::parse::parameter::{ParameterLocation, ParameterOrRef};
use crate::parse::spec::SwaggerSpec;
use crate::view::{Cardinality, ParamLocation, ParameterRecord};

use super::name_normalizer::camel_case;
use super::type_converter::convert;

/// Classify one declared parameter. `Ok(None)` means the parameter carries an
/// exclusion extension and produces no binding.
pub fn classify(
    param: &ParameterOrRef,
    spec: &SwaggerSpec,
) -> Result<Option<ParameterRecord>, TransformError> {
    if param.is_excluded() {
        log::debug!("skipping excluded parameter reference");
        return Ok(None);
    }

    let param = match param {
        ParameterOrRef::Ref { ref_path, .. } => spec.lookup_parameter(ref_path)?,
        ParameterOrRef::Parameter(p) => p.as_ref(),
    };

    if param.is_excluded() {
        log::debug!("skipping excluded parameter `{}`", param.name);
        return Ok(None);
    }

    let location = match param.location {
        ParameterLocation::Body => ParamLocation::Body,
        ParameterLocation::Path => ParamLocation::Path,
        ParameterLocation::Query => ParamLocation::Query,
        ParameterLocation::Header => ParamLocation::Header,
        ParameterLocation::FormData => ParamLocation::Form,
        ParameterLocation::Other(ref other) => {
            log::debug!("parameter `{}` has unrecognized location `{other}`", param.name);
            ParamLocation::Unrecognized
        }
    };

    let pattern = match location {
        ParamLocation::Query => param.pattern().map(str::to_string),
        _ => None,
    };

    let singleton = match param.enum_values.as_slice() {
        [only] => Some(only.clone()),
        _ => None,
    };

    let cardinality = if param.required {
        Cardinality::Required
    } else {
        Cardinality::Optional
    };

    Ok(Some(ParameterRecord {
        name: param.name.clone(),
        camel_case_name: camel_case(&param.name),
        location,
        description: param.description.clone(),
        cardinality,
        singleton,
        pattern,
        type_expr: convert(&param.type_schema(), spec)?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConvertError, ResolveError};

    fn spec() -> SwaggerSpec {
        serde_yaml_ng::from_str(
            r#"
swagger: '2.0'
info:
  title: T
  version: '1'
parameters:
  limitParam:
    name: limit
    in: query
    type: integer
  hidden:
    name: trace
    in: header
    type: string
    x-exclude-from-bindings: true
definitions:
  Pet:
    type: object
"#,
        )
        .unwrap()
    }

    fn param(yaml: &str) -> ParameterOrRef {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    #[test]
    fn test_locations() {
        let spec = spec();
        let cases = [
            ("body", ParamLocation::Body),
            ("path", ParamLocation::Path),
            ("query", ParamLocation::Query),
            ("header", ParamLocation::Header),
            ("formData", ParamLocation::Form),
            ("cookie", ParamLocation::Unrecognized),
        ];
        for (location, expected) in cases {
            let p = param(&format!("name: x\nin: {location}\ntype: string"));
            let record = classify(&p, &spec).unwrap().unwrap();
            assert_eq!(record.location, expected, "in: {location}");
        }
    }

    #[test]
    fn test_camel_case_name_and_cardinality() {
        let spec = spec();
        let record = classify(
            &param("name: X-Request-Id\nin: header\nrequired: true\ntype: string"),
            &spec,
        )
        .unwrap()
        .unwrap();
        assert_eq!(record.camel_case_name, "xRequestId");
        assert_eq!(record.cardinality.marker(), "");
        assert!(record.is_required());

        let record = classify(&param("name: page_size\nin: query\ntype: integer"), &spec)
            .unwrap()
            .unwrap();
        assert_eq!(record.camel_case_name, "pageSize");
        assert_eq!(record.cardinality.marker(), "?");
    }

    #[test]
    fn test_singleton_enum() {
        let spec = spec();
        let record = classify(
            &param("name: format\nin: query\ntype: string\nenum: [only]"),
            &spec,
        )
        .unwrap()
        .unwrap();
        assert!(record.is_singleton());
        assert_eq!(record.singleton, Some(serde_json::json!("only")));

        for values in ["[]", "[a, b]"] {
            let record = classify(
                &param(&format!("name: f\nin: query\ntype: string\nenum: {values}")),
                &spec,
            )
            .unwrap()
            .unwrap();
            assert!(!record.is_singleton(), "enum: {values}");
        }
    }

    #[test]
    fn test_name_pattern_only_for_query() {
        let spec = spec();
        let record = classify(
            &param("name: filter\nin: query\ntype: string\nx-name-pattern: 'filter[*]'"),
            &spec,
        )
        .unwrap()
        .unwrap();
        assert!(record.is_pattern_type());
        assert_eq!(record.pattern.as_deref(), Some("filter[*]"));

        let record = classify(
            &param("name: filter\nin: header\ntype: string\nx-name-pattern: 'X-*'"),
            &spec,
        )
        .unwrap()
        .unwrap();
        assert!(!record.is_pattern_type());
    }

    #[test]
    fn test_excluded_parameters() {
        let spec = spec();
        let p = param("name: a\nin: query\ntype: string\nx-exclude-from-bindings: true");
        assert!(classify(&p, &spec).unwrap().is_none());
        let p = param("name: X-AppEngine-Country\nin: header\ntype: string\nx-proxy-header: true");
        assert!(classify(&p, &spec).unwrap().is_none());
        assert!(classify(&param("$ref: '#/parameters/hidden'"), &spec)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_exclusion_beside_ref() {
        let spec = spec();
        for extension in ["x-exclude-from-bindings: true", "x-proxy-header: gae"] {
            let p = param(&format!("$ref: '#/parameters/limitParam'\n{extension}"));
            assert!(classify(&p, &spec).unwrap().is_none(), "{extension}");
        }
        let p = param("$ref: '#/parameters/limitParam'\nx-exclude-from-bindings: false");
        assert!(classify(&p, &spec).unwrap().is_some());
    }

    #[test]
    fn test_non_boolean_exclusion_is_ignored() {
        let spec = spec();
        let p = param("name: a\nin: query\ntype: string\nx-exclude-from-bindings: 'yes'");
        let record = classify(&p, &spec).unwrap().unwrap();
        assert_eq!(record.name, "a");
    }

    #[test]
    fn test_ref_parameter() {
        let spec = spec();
        let record = classify(&param("$ref: '#/parameters/limitParam'"), &spec)
            .unwrap()
            .unwrap();
        assert_eq!(record.name, "limit");
        assert_eq!(record.type_expr.expr, "number");
    }

    #[test]
    fn test_unresolved_ref_is_an_error() {
        let spec = spec();
        let err = classify(&param("$ref: '#/parameters/missing'"), &spec).unwrap_err();
        assert!(matches!(
            err,
            TransformError::Resolve(ResolveError::RefTargetNotFound(_))
        ));
    }

    #[test]
    fn test_body_schema_type() {
        let spec = spec();
        let record = classify(
            &param("name: pet\nin: body\nschema:\n  $ref: '#/definitions/Pet'"),
            &spec,
        )
        .unwrap()
        .unwrap();
        assert_eq!(record.type_expr.import_target.as_deref(), Some("Pet"));
    }

    #[test]
    fn test_conversion_error_propagates() {
        let spec = spec();
        let err = classify(&param("name: ids\nin: query\ntype: array"), &spec).unwrap_err();
        assert!(matches!(err, TransformError::Convert(ConvertError::MissingItems)));
    }
}
