use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConvertError;

/// A Swagger 2.0 `type` keyword value.
///
/// Unknown values are kept rather than rejected at parse time; the type
/// converter reports them when (and if) the node is actually converted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    File,
    Unknown(String),
}

impl From<String> for SchemaType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "string" => SchemaType::String,
            "number" => SchemaType::Number,
            "integer" => SchemaType::Integer,
            "boolean" => SchemaType::Boolean,
            "array" => SchemaType::Array,
            "object" => SchemaType::Object,
            "file" => SchemaType::File,
            _ => SchemaType::Unknown(value),
        }
    }
}

/// A reference or inline schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaOrRef {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Schema(Box<Schema>),
}

/// A Swagger 2.0 schema object.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Schema {
    #[serde(rename = "type", default)]
    pub schema_type: Option<SchemaType>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(rename = "default", default)]
    pub default_value: Option<serde_json::Value>,

    #[serde(default)]
    pub properties: IndexMap<String, SchemaOrRef>,

    #[serde(default)]
    pub required: Vec<String>,

    #[serde(rename = "additionalProperties", default)]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(default)]
    pub items: Option<Box<SchemaOrRef>>,

    #[serde(rename = "allOf", default)]
    pub all_of: Vec<SchemaOrRef>,

    #[serde(rename = "enum", default)]
    pub enum_values: Vec<serde_json::Value>,

    #[serde(default)]
    pub discriminator: Option<String>,

    #[serde(rename = "readOnly", default)]
    pub read_only: Option<bool>,

    #[serde(default)]
    pub example: Option<serde_json::Value>,
}

/// `additionalProperties` can be a boolean or a schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<SchemaOrRef>),
}

/// The shape of a schema node, decided once from the raw document fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaKind<'a> {
    Reference(&'a str),
    Enum(&'a [serde_json::Value]),
    Primitive(Primitive),
    Array(&'a SchemaOrRef),
    /// An object with no named properties and a schema for its values.
    Map(&'a SchemaOrRef),
    Object(&'a Schema),
}

/// Scalar target types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    String,
    Number,
    Boolean,
    Any,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Any => "any",
        }
    }
}

impl SchemaOrRef {
    /// Classify this node. `$ref` wins over everything, then `enum`, then `type`.
    pub fn kind(&self) -> Result<SchemaKind<'_>, ConvertError> {
        match self {
            SchemaOrRef::Ref { ref_path } => Ok(SchemaKind::Reference(ref_path)),
            SchemaOrRef::Schema(schema) => schema.kind(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            SchemaOrRef::Ref { .. } => None,
            SchemaOrRef::Schema(schema) => schema.description.as_deref(),
        }
    }
}

impl Schema {
    pub fn kind(&self) -> Result<SchemaKind<'_>, ConvertError> {
        if !self.enum_values.is_empty() {
            return Ok(SchemaKind::Enum(&self.enum_values));
        }

        match &self.schema_type {
            Some(SchemaType::String) => Ok(SchemaKind::Primitive(Primitive::String)),
            Some(SchemaType::Number | SchemaType::Integer) => {
                Ok(SchemaKind::Primitive(Primitive::Number))
            }
            Some(SchemaType::Boolean) => Ok(SchemaKind::Primitive(Primitive::Boolean)),
            Some(SchemaType::File) => Ok(SchemaKind::Primitive(Primitive::Any)),
            Some(SchemaType::Array) => match &self.items {
                Some(items) => Ok(SchemaKind::Array(items)),
                None => Err(ConvertError::MissingItems),
            },
            Some(SchemaType::Unknown(other)) => {
                Err(ConvertError::Unsupported(format!("type `{other}`")))
            }
            Some(SchemaType::Object) | None => {
                if self.properties.is_empty() && self.all_of.is_empty() {
                    if let Some(AdditionalProperties::Schema(values)) = &self.additional_properties
                    {
                        return Ok(SchemaKind::Map(values));
                    }
                }
                Ok(SchemaKind::Object(self))
            }
        }
    }
}
