use heck::ToLowerCamelCase;

use crate::parse::operation::HttpMethod;

/// Replace `.`, `-`, `{` and `}` with `_`. Used for `operationId`s.
pub fn to_identifier(raw: &str) -> String {
    raw.replace(['.', '-', '{', '}'], "_")
}

/// lowerCamelCase, splitting on any non-alphanumeric run and case change.
pub fn camel_case(raw: &str) -> String {
    raw.to_lower_camel_case()
}

/// Exported type name for a definition: identifier-safe, camel-cased, first
/// letter upper-cased. Distinct inputs may map to the same name.
pub fn to_safe_type_name(raw: &str) -> String {
    capitalize_first(&camel_case(&to_identifier(raw)))
}

/// Derive a method name from HTTP method + path when there is no `operationId`.
///
/// Examples:
/// - `GET /` → `get`
/// - `GET /users` → `getUsers`
/// - `GET /users/{userId}` → `getUsersByUserId`
/// - `DELETE /store/order/{orderId}/` → `deleteStoreOrderByOrderId`
pub fn path_to_method_name(method: HttpMethod, path: &str) -> String {
    let verb = method.as_str().to_lowercase();
    if path == "/" || path.is_empty() {
        return verb;
    }

    let clean = path.strip_suffix('/').unwrap_or(path);
    let clean = clean.strip_prefix('/').unwrap_or(clean);
    let segments: Vec<String> = clean.split('/').map(rewrite_segment).collect();

    let result = camel_case(&segments.join("-"));
    format!("{verb}{}", capitalize_first(&result))
}

/// `{userId}` → `byUserId`; other segments are left alone.
fn rewrite_segment(segment: &str) -> String {
    match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        Some(name) => format!("by{}", capitalize_first(name)),
        None => segment.to_string(),
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
