pub mod operation;
pub mod parameter;
pub mod ref_resolve;
pub mod response;
pub mod schema;
pub mod security;
pub mod spec;

use serde::Deserialize;

use crate::error::ParseError;
use spec::SwaggerSpec;

/// The only `swagger` version this crate accepts.
pub const SUPPORTED_VERSION: &str = "2.0";

/// Just the version field, read before the rest of the document.
#[derive(Deserialize)]
struct VersionHeader {
    #[serde(default)]
    swagger: Option<serde_json::Value>,
}

impl VersionHeader {
    fn check(self) -> Result<(), ParseError> {
        match self.swagger {
            Some(serde_json::Value::String(v)) if v == SUPPORTED_VERSION => Ok(()),
            Some(serde_json::Value::String(v)) => Err(ParseError::UnsupportedVersion(v)),
            Some(other) => Err(ParseError::UnsupportedVersion(other.to_string())),
            None => Err(ParseError::UnsupportedVersion("<missing>".to_string())),
        }
    }
}

/// Parse a Swagger document from YAML.
pub fn from_yaml(input: &str) -> Result<SwaggerSpec, ParseError> {
    serde_yaml_ng::from_str::<VersionHeader>(input)?.check()?;
    Ok(serde_yaml_ng::from_str(input)?)
}

/// Parse a Swagger document from JSON.
pub fn from_json(input: &str) -> Result<SwaggerSpec, ParseError> {
    serde_json::from_str::<VersionHeader>(input)?.check()?;
    Ok(serde_json::from_str(input)?)
}

/// Reject anything that is not declared as exactly `swagger: "2.0"`.
pub fn validate_version(spec: &SwaggerSpec) -> Result<(), ParseError> {
    if spec.swagger != SUPPORTED_VERSION {
        return Err(ParseError::UnsupportedVersion(spec.swagger.clone()));
    }
    Ok(())
}
