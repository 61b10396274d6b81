use indexmap::IndexSet;

use super::methods::{MethodRecord, SecurityFlags};

/// Type names the target language provides; they are never imported.
pub const BUILTIN_TYPES: &[&str] = &["object", "void", "string", "number", "boolean", "any"];

pub fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Everything a template author needs to render one client.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub info: ViewInfo,
    /// Document-wide mechanism flags, OR-ed over the secure methods.
    pub security: SecurityFlags,
    pub methods: Vec<MethodRecord>,
    pub definitions: Vec<TypeRecord>,
    pub types_to_import: IndexSet<String>,
}

impl ViewModel {
    /// `import { A, B } from './types';` for the collected type names.
    pub fn import_statement(&self) -> String {
        let names: Vec<&str> = self.types_to_import.iter().map(String::as_str).collect();
        format!("import {{ {} }} from './types';", names.join(", "))
    }
}

/// Document-level metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewInfo {
    pub description: Option<String>,
    pub class_name: String,
    pub module_name: String,
    pub is_es6: bool,
    pub imports: Vec<String>,
    /// `scheme://host/basePath`, or empty when any part is missing.
    pub domain: String,
    pub base_path: Option<String>,
    /// The document declares `securityDefinitions`.
    pub is_secure: bool,
}

/// An exported type produced from one entry of `definitions`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRecord {
    pub name: String,
    pub description: Option<String>,
    pub type_expr: TypeExpr,
}

/// A schema node rendered in the target type system.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeExpr {
    /// Type text, e.g. `string`, `Array<Pet>`, `"a" | "b"`.
    pub expr: String,
    pub kind: TypeKind,
    /// Bare user-defined name to import, if any (arrays inherit it from their element).
    pub import_target: Option<String>,
    pub description: Option<String>,
    pub properties: Vec<PropertyExpr>,
    pub element: Option<Box<TypeExpr>>,
}

impl TypeExpr {
    pub fn new(expr: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            expr: expr.into(),
            kind,
            import_target: None,
            description: None,
            properties: Vec::new(),
            element: None,
        }
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive | TypeKind::Enum)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Reference,
    Enum,
    Primitive,
    Array,
    Map,
    Object,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Reference => "ref",
            TypeKind::Enum => "enum",
            TypeKind::Primitive => "primitive",
            TypeKind::Array => "array",
            TypeKind::Map => "map",
            TypeKind::Object => "object",
        }
    }
}

/// A named property of an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyExpr {
    pub name: String,
    pub type_expr: TypeExpr,
    pub optional: bool,
}
