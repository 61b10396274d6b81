use crate::config::GenerateOptions;
use crate::error::{ConvertError, TransformError};
use crate::parse::operation::{HttpMethod, Operation};
use crate::parse::parameter::ParameterOrRef;
use crate::parse::response::ResponseOrRef;
use crate::parse::spec::SwaggerSpec;
use crate::view::{HeaderRecord, MethodRecord, TypeExpr};

use super::name_normalizer::{path_to_method_name, to_identifier};
use super::parameter_classifier::classify;
use super::security_resolver;
use super::type_converter::convert;

/// What every operation build reads but never changes.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    pub spec: &'a SwaggerSpec,
    pub options: &'a GenerateOptions,
}

/// Build the method record for `method path`. `Ok(None)` means the
/// operation was filtered out by `generate_for_path`.
pub fn build(
    ctx: &BuildContext<'_>,
    path: &str,
    method: HttpMethod,
    op: &Operation,
    path_params: &[ParameterOrRef],
) -> Result<Option<MethodRecord>, TransformError> {
    let name = match op.operation_id.as_deref() {
        Some(id) => to_identifier(id),
        None => path_to_method_name(method, path),
    };

    let (response_type, response_import) = match success_response(ctx.spec, op) {
        Ok(t) => (t.expr, t.import_target),
        Err(e) => {
            log::debug!(
                "{method} {path}: falling back to `{}` ({e})",
                ctx.options.default_response_type
            );
            (ctx.options.default_response_type.clone(), None)
        }
    };

    let mut parameters = Vec::new();
    for param in op.parameters.iter().chain(path_params) {
        if let Some(record) = classify(param, ctx.spec)? {
            parameters.push(record);
        }
    }

    let record = MethodRecord {
        name,
        method,
        path: path.to_string(),
        path_format_string: path.replace('{', "${parameters."),
        summary: op.description.clone().or_else(|| op.summary.clone()),
        external_docs: op.external_docs.clone(),
        tags: op.tags.clone(),
        deprecated: op.deprecated.unwrap_or(false),
        security: security_resolver::resolve(ctx.spec, op),
        parameters,
        headers: headers(ctx.spec, op),
        response_type,
        response_import,
    };

    if let Some(filter) = ctx.options.generate_for_path.as_deref() {
        if !first_segment_matches(path, filter) {
            log::debug!("{method} {path}: outside generate_for_path `{filter}`");
            return Ok(None);
        }
    }

    Ok(Some(record))
}

/// Convert the schema of the `200` response.
fn success_response(spec: &SwaggerSpec, op: &Operation) -> Result<TypeExpr, ConvertError> {
    let response = match op.responses.get("200") {
        Some(ResponseOrRef::Ref { ref_path }) => spec.lookup_response(ref_path)?,
        Some(ResponseOrRef::Response(r)) => r,
        None => return Err(ConvertError::MissingSchema("no 200 response".to_string())),
    };
    let schema = response
        .schema
        .as_ref()
        .ok_or_else(|| ConvertError::MissingSchema("200 response has no schema".to_string()))?;
    convert(schema, spec)
}

/// `Accept` from `produces`, `Content-Type` from the first `consumes` entry.
/// Operation-level lists replace document-level ones.
fn headers(spec: &SwaggerSpec, op: &Operation) -> Vec<HeaderRecord> {
    let mut headers = Vec::new();

    if let Some(produces) = op.produces.as_ref().or(spec.produces.as_ref()) {
        headers.push(HeaderRecord {
            name: "Accept".to_string(),
            value: produces.join(", "),
        });
    }

    let consumes = op.consumes.as_ref().or(spec.consumes.as_ref());
    if let Some(content_type) = consumes.and_then(|c| c.first()) {
        headers.push(HeaderRecord {
            name: "Content-Type".to_string(),
            value: content_type.clone(),
        });
    }

    headers
}

fn first_segment_matches(path: &str, filter: &str) -> bool {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let first = trimmed.split('/').next().unwrap_or_default();
    !first.is_empty() && first.eq_ignore_ascii_case(filter)
}
