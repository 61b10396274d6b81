use indexmap::IndexSet;

use crate::parse::operation::Operation;
use crate::parse::security::{SecurityRequirement, SecuritySchemeType};
use crate::parse::spec::SwaggerSpec;
use crate::view::SecurityFlags;

/// Work out which authentication mechanisms an operation needs.
pub fn resolve(spec: &SwaggerSpec, op: &Operation) -> SecurityFlags {
    let mut flags = SecurityFlags {
        is_secure: spec.security.is_some() || op.security.is_some(),
        ..SecurityFlags::default()
    };

    let Some(definitions) = spec.security_definitions.as_ref() else {
        return flags;
    };

    let merged = merge_requirements(
        spec.security.as_deref().unwrap_or_default(),
        op.security.as_deref().unwrap_or_default(),
    );

    for (name, scheme) in definitions {
        if !merged.iter().any(|entry| entry.contains(name.as_str())) {
            continue;
        }
        match scheme.scheme_type {
            SecuritySchemeType::OAuth2 => flags.is_secure_token = true,
            SecuritySchemeType::ApiKey => flags.is_secure_api_key = true,
            SecuritySchemeType::Basic => flags.is_secure_basic = true,
        }
    }

    flags
}

/// Entry `i` of the result holds the scheme names of document entry `i` and
/// operation entry `i` together.
fn merge_requirements<'a>(
    document: &'a [SecurityRequirement],
    operation: &'a [SecurityRequirement],
) -> Vec<IndexSet<&'a str>> {
    let len = document.len().max(operation.len());
    (0..len)
        .map(|i| {
            document
                .get(i)
                .into_iter()
                .chain(operation.get(i))
                .flat_map(|req| req.keys().map(String::as_str))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(extra: &str) -> SwaggerSpec {
        let yaml = format!("swagger: '2.0'\ninfo:\n  title: T\n  version: '1'\n{extra}");
        serde_yaml_ng::from_str(&yaml).unwrap()
    }

    fn op(yaml: &str) -> Operation {
        serde_yaml_ng::from_str(yaml).unwrap()
    }

    const DEFINITIONS: &str = r#"
securityDefinitions:
  petstore_auth:
    type: oauth2
    flow: implicit
    authorizationUrl: https://example.com/oauth
    scopes:
      read: read pets
  api_key:
    type: apiKey
    name: api_key
    in: header
  basic:
    type: basic
"#;

    #[test]
    fn test_definitions_without_requirements_are_not_secure() {
        let spec = spec(DEFINITIONS);
        let flags = resolve(&spec, &op("operationId: list"));
        assert_eq!(flags, SecurityFlags::default());
    }

    #[test]
    fn test_operation_requirement() {
        let spec = spec(DEFINITIONS);
        let flags = resolve(&spec, &op("security:\n  - api_key: []"));
        assert!(flags.is_secure);
        assert!(flags.is_secure_api_key);
        assert!(!flags.is_secure_token);
        assert!(!flags.is_secure_basic);
    }

    #[test]
    fn test_document_and_operation_merge() {
        let spec = spec(&format!("{DEFINITIONS}security:\n  - petstore_auth: [read]\n"));
        let flags = resolve(&spec, &op("security:\n  - basic: []\n  - api_key: []"));
        assert!(flags.is_secure);
        assert!(flags.is_secure_token);
        assert!(flags.is_secure_basic);
        assert!(flags.is_secure_api_key);
    }

    #[test]
    fn test_global_requirement_applies_without_override() {
        let spec = spec(&format!("{DEFINITIONS}security:\n  - basic: []\n"));
        let flags = resolve(&spec, &op("operationId: list"));
        assert!(flags.is_secure);
        assert!(flags.is_secure_basic);
        assert!(!flags.is_secure_token);
    }

    #[test]
    fn test_no_definitions_short_circuits() {
        let spec = spec("security:\n  - api_key: []\n");
        let flags = resolve(&spec, &op("operationId: list"));
        assert!(flags.is_secure);
        assert!(!flags.is_secure_api_key);
    }

    #[test]
    fn test_scheme_names_match_exactly() {
        let spec = spec(DEFINITIONS);
        let flags = resolve(&spec, &op("security:\n  - api_key_v2: []"));
        assert!(flags.is_secure);
        assert!(!flags.is_secure_api_key);
    }
}
