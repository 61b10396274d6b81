//! Lookup of `$ref` targets in the document's shared tables.
//!
//! Swagger 2.0 keeps reusable objects at the top level (`definitions`,
//! `parameters`, `responses`). A reference is either a local JSON pointer
//! into one of those tables (`#/definitions/Pet`) or a bare name (`Pet`).
//! Each lookup resolves exactly one hop; nothing here follows the target's
//! own references.

use super::parameter::Parameter;
use super::response::Response;
use super::schema::SchemaOrRef;
use super::spec::SwaggerSpec;
use crate::error::ResolveError;

impl SwaggerSpec {
    /// Resolve a schema reference to its definition name and node.
    pub fn lookup_definition(
        &self,
        ref_path: &str,
    ) -> Result<(&str, &SchemaOrRef), ResolveError> {
        let name = parse_ref_name(ref_path, "definitions")?;
        self.definitions
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }

    pub fn lookup_parameter(&self, ref_path: &str) -> Result<&Parameter, ResolveError> {
        let name = parse_ref_name(ref_path, "parameters")?;
        self.parameters
            .get(name)
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }

    pub fn lookup_response(&self, ref_path: &str) -> Result<&Response, ResolveError> {
        let name = parse_ref_name(ref_path, "responses")?;
        self.responses
            .get(name)
            .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.to_string()))
    }
}

/// Parse a `$ref` like `#/definitions/Foo` (or a bare `Foo`) and extract the name.
pub fn parse_ref_name<'a>(
    ref_path: &'a str,
    expected_section: &str,
) -> Result<&'a str, ResolveError> {
    if !ref_path.contains('/') && !ref_path.contains('#') {
        if ref_path.is_empty() {
            return Err(ResolveError::InvalidRefFormat(ref_path.to_string()));
        }
        return Ok(ref_path);
    }

    let stripped = ref_path
        .strip_prefix("#/")
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    let (section, name) = stripped
        .split_once('/')
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))?;
    if section != expected_section {
        return Err(ResolveError::InvalidRefFormat(format!(
            "expected section '{}', got '{}' in {}",
            expected_section, section, ref_path
        )));
    }
    if name.is_empty() {
        return Err(ResolveError::InvalidRefFormat(ref_path.to_string()));
    }
    Ok(name)
}
