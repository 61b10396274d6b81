use indexmap::IndexSet;

use super::methods::{MethodRecord, SecurityFlags};
use super::types::{TypeRecord, ViewInfo, ViewModel, is_builtin_type};
use crate::transform::type_converter::strip_container;

/// Accumulates records during one traversal and hands out the finished
/// [`ViewModel`] by value. Nothing is observable until [`build`](Self::build).
#[derive(Debug)]
pub struct ViewModelBuilder {
    info: ViewInfo,
    security: SecurityFlags,
    methods: Vec<MethodRecord>,
    definitions: Vec<TypeRecord>,
    types_to_import: IndexSet<String>,
}

impl ViewModelBuilder {
    pub fn new(info: ViewInfo) -> Self {
        Self {
            info,
            security: SecurityFlags::default(),
            methods: Vec::new(),
            definitions: Vec::new(),
            types_to_import: IndexSet::new(),
        }
    }

    /// Add a retained method; its parameter and response types join the import set.
    pub fn push_method(&mut self, method: MethodRecord) {
        if self.methods.iter().any(|m| m.name == method.name) {
            log::warn!(
                "duplicate method name `{}` ({} {})",
                method.name,
                method.method,
                method.path
            );
        }

        for param in &method.parameters {
            if let Some(ref target) = param.type_expr.import_target {
                self.record_import(target);
            }
        }
        if let Some(ref target) = method.response_import {
            self.record_import(target);
        }
        self.security.absorb(&method.security);
        self.methods.push(method);
    }

    pub fn push_definition(&mut self, definition: TypeRecord) {
        if let Some(ref target) = definition.type_expr.import_target {
            self.record_import(target);
        }
        self.definitions.push(definition);
    }

    fn record_import(&mut self, type_expr: &str) {
        let name = strip_container(type_expr);
        if name.is_empty() || is_builtin_type(&name) {
            return;
        }
        self.types_to_import.insert(name);
    }

    pub fn build(self) -> ViewModel {
        ViewModel {
            info: self.info,
            security: self.security,
            methods: self.methods,
            definitions: self.definitions,
            types_to_import: self.types_to_import,
        }
    }
}
