//! Template context built from a [`ViewModel`].
//!
//! The view model is language-agnostic. The TypeScript-specific pieces the
//! built-in templates need, such as quoted keys, string literals and inline
//! object shapes, are computed here; templates never escape anything.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use minijinja::{Value, context};
use stg_core::view::{
    HeaderRecord, MethodRecord, ParamLocation, ParameterRecord, PropertyExpr, TypeExpr, TypeKind,
    TypeRecord, ViewModel,
};

/// Build the root context. `extra` keys replace view keys of the same name.
pub fn view_context(view: &ViewModel, extra: &IndexMap<String, serde_json::Value>) -> Value {
    let class_name = &view.info.class_name;
    let methods: Vec<Value> = view
        .methods
        .iter()
        .map(|m| method_context(m, class_name))
        .collect();
    let definitions: Vec<Value> = view.definitions.iter().map(definition_context).collect();
    let types_to_import: Vec<&str> = view.types_to_import.iter().map(String::as_str).collect();

    let mut root: BTreeMap<String, Value> = BTreeMap::new();
    let mut put = |key: &str, value: Value| {
        root.insert(key.to_string(), value);
    };
    put("description", Value::from_serialize(&view.info.description));
    put("class_name", Value::from(class_name.as_str()));
    put("module_name", Value::from(view.info.module_name.as_str()));
    put("is_es6", Value::from(view.info.is_es6));
    put("imports", Value::from_serialize(&view.info.imports));
    put("domain", Value::from(view.info.domain.as_str()));
    put("domain_literal", Value::from(string_literal(&view.info.domain)));
    put("base_path", Value::from_serialize(&view.info.base_path));
    put("is_secure", Value::from(view.info.is_secure));
    put("is_secure_token", Value::from(view.security.is_secure_token));
    put("is_secure_api_key", Value::from(view.security.is_secure_api_key));
    put("is_secure_basic", Value::from(view.security.is_secure_basic));
    put("methods", Value::from(methods));
    put("definitions", Value::from(definitions));
    put("has_imports", Value::from(!types_to_import.is_empty()));
    put("types_to_import", Value::from_serialize(&types_to_import));
    put("import_statement", Value::from(view.import_statement()));

    for (key, value) in extra {
        log::debug!("extra context key `{key}`");
        root.insert(key.clone(), Value::from_serialize(value));
    }

    Value::from_serialize(&root)
}

fn method_context(method: &MethodRecord, class_name: &str) -> Value {
    let parameters: Vec<Value> = method.parameters.iter().map(parameter_context).collect();
    let headers: Vec<Value> = method.headers.iter().map(header_context).collect();
    let body = method
        .parameters
        .iter()
        .find(|p| p.location == ParamLocation::Body)
        .map(|p| string_literal(&p.name));
    let has = |location: ParamLocation| method.parameters.iter().any(|p| p.location == location);
    let security_kinds: Vec<&str> = [
        (method.security.is_secure_token, "token"),
        (method.security.is_secure_api_key, "apiKey"),
        (method.security.is_secure_basic, "basic"),
    ]
    .into_iter()
    .filter_map(|(set, kind)| set.then_some(kind))
    .collect();
    let external_docs = method.external_docs.as_ref().map(|docs| {
        context! {
            url => docs.url.clone(),
            description => docs.description.clone(),
        }
    });

    context! {
        name => method.name.clone(),
        class_name => class_name,
        method => method.method.as_str(),
        is_get => method.method.as_str() == "GET",
        is_post => method.method.as_str() == "POST",
        path => method.path.clone(),
        path_format_string => method.path_format_string.clone(),
        summary => method.summary.clone(),
        external_docs => external_docs,
        tags => method.tags.clone(),
        deprecated => method.deprecated,
        is_secure => method.security.is_secure,
        is_secure_token => method.security.is_secure_token,
        is_secure_api_key => method.security.is_secure_api_key,
        is_secure_basic => method.security.is_secure_basic,
        security_kinds => security_kinds,
        parameters => parameters,
        has_parameters => !method.parameters.is_empty(),
        has_required_parameters => method.parameters.iter().any(ParameterRecord::is_required),
        has_form_parameters => has(ParamLocation::Form),
        body_name_literal => body,
        headers => headers,
        response_type => method.response_type.clone(),
    }
}

fn parameter_context(param: &ParameterRecord) -> Value {
    let location = match param.location {
        ParamLocation::Body => "body",
        ParamLocation::Path => "path",
        ParamLocation::Query => "query",
        ParamLocation::Header => "header",
        ParamLocation::Form => "formData",
        ParamLocation::Unrecognized => "",
    };
    let singleton_literal = param
        .singleton
        .as_ref()
        .map(|value| serde_json::to_string(value).unwrap_or_default());

    context! {
        name => param.name.clone(),
        name_literal => string_literal(&param.name),
        key => property_key(&param.name),
        camel_case_name => param.camel_case_name.clone(),
        description => param.description.clone(),
        location => location,
        is_body_parameter => param.location == ParamLocation::Body,
        is_path_parameter => param.location == ParamLocation::Path,
        is_query_parameter => param.location == ParamLocation::Query,
        is_header_parameter => param.location == ParamLocation::Header,
        is_form_parameter => param.location == ParamLocation::Form,
        cardinality => param.cardinality.marker(),
        is_required => param.is_required(),
        is_singleton => param.is_singleton(),
        singleton_literal => singleton_literal,
        is_pattern_type => param.is_pattern_type(),
        pattern => param.pattern.clone(),
        type_expr => type_context(&param.type_expr),
    }
}

fn header_context(header: &HeaderRecord) -> Value {
    context! {
        name => header.name.clone(),
        value => header.value.clone(),
        name_literal => string_literal(&header.name),
        value_literal => string_literal(&header.value),
    }
}

fn definition_context(definition: &TypeRecord) -> Value {
    context! {
        name => definition.name.clone(),
        description => definition.description.clone(),
        type_expr => type_context(&definition.type_expr),
    }
}

fn type_context(t: &TypeExpr) -> Value {
    let properties: Vec<Value> = t.properties.iter().map(property_context).collect();
    context! {
        expr => t.expr.clone(),
        inline => inline_type(t),
        kind => t.kind.as_str(),
        is_atomic => t.is_atomic(),
        is_ref => t.kind == TypeKind::Reference,
        is_enum => t.kind == TypeKind::Enum,
        is_array => t.kind == TypeKind::Array,
        is_map => t.kind == TypeKind::Map,
        is_object => t.kind == TypeKind::Object,
        target => t.import_target.clone(),
        description => t.description.clone(),
        properties => properties,
    }
}

fn property_context(prop: &PropertyExpr) -> Value {
    context! {
        name => prop.name.clone(),
        key => property_key(&prop.name),
        optional => prop.optional,
        cardinality => if prop.optional { "?" } else { "" },
        description => prop.type_expr.description.clone(),
        type_expr => type_context(&prop.type_expr),
    }
}

/// The type written out in full, with inline object shapes expanded.
pub fn inline_type(t: &TypeExpr) -> String {
    match (t.kind, t.element.as_deref()) {
        (TypeKind::Object, _) if !t.properties.is_empty() => {
            let members: Vec<String> = t
                .properties
                .iter()
                .map(|p| {
                    let marker = if p.optional { "?" } else { "" };
                    format!(
                        "{}{marker}: {}",
                        property_key(&p.name),
                        inline_type(&p.type_expr)
                    )
                })
                .collect();
            format!("{{ {} }}", members.join("; "))
        }
        (TypeKind::Array, Some(element)) => format!("Array<{}>", inline_type(element)),
        (TypeKind::Map, Some(value)) => format!("{{ [key: string]: {} }}", inline_type(value)),
        _ => t.expr.clone(),
    }
}

/// An object key: bare when it is a valid identifier, quoted otherwise.
pub fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_' || first == '$')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        None => false,
    };
    if valid {
        name.to_string()
    } else {
        string_literal(name)
    }
}

fn string_literal(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}
