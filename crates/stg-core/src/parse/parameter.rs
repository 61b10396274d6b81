use std::borrow::Cow;

use serde::Deserialize;

use super::schema::{Schema, SchemaOrRef, SchemaType};

/// Parameter location (`in`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ParameterLocation {
    Body,
    Path,
    Query,
    Header,
    FormData,
    /// Any value outside the five Swagger 2.0 locations.
    Other(String),
}

impl From<String> for ParameterLocation {
    fn from(value: String) -> Self {
        match value.as_str() {
            "body" => ParameterLocation::Body,
            "path" => ParameterLocation::Path,
            "query" => ParameterLocation::Query,
            "header" => ParameterLocation::Header,
            "formData" => ParameterLocation::FormData,
            _ => ParameterLocation::Other(value),
        }
    }
}

/// An API parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Body parameters carry a full schema.
    #[serde(default)]
    pub schema: Option<SchemaOrRef>,

    // Non-body parameters describe their type inline.
    #[serde(rename = "type", default)]
    pub param_type: Option<SchemaType>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "collectionFormat", default)]
    pub collection_format: Option<String>,

    #[serde(rename = "default", default)]
    pub default_value: Option<serde_json::Value>,

    #[serde(rename = "enum", default)]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(rename = "x-exclude-from-bindings", default)]
    pub exclude_from_bindings: Option<serde_json::Value>,

    #[serde(rename = "x-proxy-header", default)]
    pub proxy_header: Option<serde_json::Value>,

    #[serde(rename = "x-name-pattern", default)]
    pub name_pattern: Option<serde_json::Value>,
}

impl Parameter {
    /// Whether a vendor extension asks for this parameter to be left out of
    /// generated bindings.
    pub fn is_excluded(&self) -> bool {
        is_excluded(&self.exclude_from_bindings, &self.proxy_header)
    }

    /// The `x-name-pattern` extension, when it is a string.
    pub fn pattern(&self) -> Option<&str> {
        self.name_pattern.as_ref().and_then(serde_json::Value::as_str)
    }

    /// The schema describing this parameter's value: `schema` for body
    /// parameters, otherwise one assembled from the inline type fields.
    pub fn type_schema(&self) -> Cow<'_, SchemaOrRef> {
        match &self.schema {
            Some(schema) => Cow::Borrowed(schema),
            None => Cow::Owned(SchemaOrRef::Schema(Box::new(Schema {
                schema_type: self.param_type.clone(),
                format: self.format.clone(),
                description: self.description.clone(),
                default_value: self.default_value.clone(),
                items: self.items.clone(),
                enum_values: self.enum_values.clone(),
                ..Schema::default()
            }))),
        }
    }
}

/// Only a literal `true` excludes through `x-exclude-from-bindings`; any
/// truthy `x-proxy-header` does.
fn is_excluded(
    exclude_from_bindings: &Option<serde_json::Value>,
    proxy_header: &Option<serde_json::Value>,
) -> bool {
    matches!(exclude_from_bindings, Some(serde_json::Value::Bool(true)))
        || proxy_header.as_ref().is_some_and(is_truthy)
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

/// A reference or inline parameter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParameterOrRef {
    /// A `$ref`, with any exclusion extensions declared beside it.
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,

        #[serde(rename = "x-exclude-from-bindings", default)]
        exclude_from_bindings: Option<serde_json::Value>,

        #[serde(rename = "x-proxy-header", default)]
        proxy_header: Option<serde_json::Value>,
    },
    Parameter(Box<Parameter>),
}

impl ParameterOrRef {
    /// Exclusion as declared at the use site, before any `$ref` is followed.
    pub fn is_excluded(&self) -> bool {
        match self {
            ParameterOrRef::Ref {
                exclude_from_bindings,
                proxy_header,
                ..
            } => is_excluded(exclude_from_bindings, proxy_header),
            ParameterOrRef::Parameter(p) => p.is_excluded(),
        }
    }
}
