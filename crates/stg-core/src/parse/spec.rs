use indexmap::IndexMap;
use serde::Deserialize;

use super::operation::{ExternalDocs, PathItem};
use super::parameter::Parameter;
use super::response::Response;
use super::schema::SchemaOrRef;
use super::security::{SecurityRequirement, SecurityScheme};

/// Info object describing the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Info {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub version: String,

    #[serde(rename = "termsOfService", default)]
    pub terms_of_service: Option<String>,
}

/// Tag definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Top-level Swagger 2.0 document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SwaggerSpec {
    pub swagger: String,

    pub info: Info,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(rename = "basePath", default)]
    pub base_path: Option<String>,

    #[serde(default)]
    pub schemes: Vec<String>,

    #[serde(default)]
    pub consumes: Option<Vec<String>>,

    #[serde(default)]
    pub produces: Option<Vec<String>>,

    #[serde(default, deserialize_with = "super::operation::deserialize_paths")]
    pub paths: IndexMap<String, PathItem>,

    #[serde(default)]
    pub definitions: IndexMap<String, SchemaOrRef>,

    #[serde(default)]
    pub parameters: IndexMap<String, Parameter>,

    #[serde(default)]
    pub responses: IndexMap<String, Response>,

    #[serde(rename = "securityDefinitions", default)]
    pub security_definitions: Option<IndexMap<String, SecurityScheme>>,

    #[serde(default)]
    pub security: Option<Vec<SecurityRequirement>>,

    #[serde(default)]
    pub tags: Vec<Tag>,

    #[serde(rename = "externalDocs", default)]
    pub external_docs: Option<ExternalDocs>,
}
