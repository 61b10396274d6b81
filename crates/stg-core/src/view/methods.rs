use crate::parse::operation::{ExternalDocs, HttpMethod};

use super::types::TypeExpr;

/// One generated client method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodRecord {
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    /// The path with `{` rewritten to `${parameters.` for template literals.
    pub path_format_string: String,
    pub summary: Option<String>,
    pub external_docs: Option<ExternalDocs>,
    pub tags: Vec<String>,
    pub deprecated: bool,
    pub security: SecurityFlags,
    pub parameters: Vec<ParameterRecord>,
    pub headers: Vec<HeaderRecord>,
    /// Type expression of the `200` response, or the configured default.
    pub response_type: String,
    pub response_import: Option<String>,
}

/// Which authentication a method (or the whole document) needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecurityFlags {
    pub is_secure: bool,
    pub is_secure_token: bool,
    pub is_secure_api_key: bool,
    pub is_secure_basic: bool,
}

impl SecurityFlags {
    /// Fold one method's flags into the document-wide flags. A mechanism only
    /// counts when the method itself is secure.
    pub fn absorb(&mut self, method: &SecurityFlags) {
        if !method.is_secure {
            return;
        }
        self.is_secure_token |= method.is_secure_token;
        self.is_secure_api_key |= method.is_secure_api_key;
        self.is_secure_basic |= method.is_secure_basic;
    }
}

/// A fixed request header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRecord {
    pub name: String,
    pub value: String,
}

/// A classified parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRecord {
    pub name: String,
    pub camel_case_name: String,
    pub location: ParamLocation,
    pub description: Option<String>,
    pub cardinality: Cardinality,
    /// The only legal value, when the enum has exactly one entry.
    pub singleton: Option<serde_json::Value>,
    /// `x-name-pattern` of a query parameter, e.g. `filter[*]`.
    pub pattern: Option<String>,
    pub type_expr: TypeExpr,
}

impl ParameterRecord {
    pub fn is_singleton(&self) -> bool {
        self.singleton.is_some()
    }

    pub fn is_pattern_type(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn is_required(&self) -> bool {
        self.cardinality == Cardinality::Required
    }
}

/// Parameter location. `Unrecognized` carries no locality at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Body,
    Path,
    Query,
    Header,
    Form,
    Unrecognized,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    Required,
    Optional,
}

impl Cardinality {
    /// `""` for required, `"?"` for optional.
    pub fn marker(&self) -> &'static str {
        match self {
            Cardinality::Required => "",
            Cardinality::Optional => "?",
        }
    }
}
