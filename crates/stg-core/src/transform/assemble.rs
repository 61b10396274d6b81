use crate::config::GenerateOptions;
use crate::error::TransformError;
use crate::parse::spec::SwaggerSpec;
use crate::parse::validate_version;
use crate::view::{ViewInfo, ViewModel, ViewModelBuilder};

use super::definition_builder;
use super::operation_builder::{self, BuildContext};

/// Assemble the view model with default options.
pub fn assemble(spec: &SwaggerSpec) -> Result<ViewModel, TransformError> {
    assemble_with_options(spec, GenerateOptions::default())
}

/// Walk `paths` then `definitions`, both in document order, and collect the
/// result into a [`ViewModel`].
pub fn assemble_with_options(
    spec: &SwaggerSpec,
    options: GenerateOptions,
) -> Result<ViewModel, TransformError> {
    validate_version(spec)?;

    let mut builder = ViewModelBuilder::new(view_info(spec, &options));
    let ctx = BuildContext {
        spec,
        options: &options,
    };

    let mut skipped = 0usize;
    for (path, item) in &spec.paths {
        for (method, op) in &item.operations {
            match operation_builder::build(&ctx, path, *method, op, &item.parameters)? {
                Some(record) => builder.push_method(record),
                None => skipped += 1,
            }
        }
    }

    for (name, schema) in &spec.definitions {
        builder.push_definition(definition_builder::build(name, schema, spec)?);
    }

    let view = builder.build();
    log::info!(
        "assembled {} methods ({} filtered out), {} definitions, {} imported types",
        view.methods.len(),
        skipped,
        view.definitions.len(),
        view.types_to_import.len()
    );
    Ok(view)
}

fn view_info(spec: &SwaggerSpec, options: &GenerateOptions) -> ViewInfo {
    ViewInfo {
        description: spec.info.description.clone(),
        class_name: options.class_name.clone(),
        module_name: options.module_name.clone(),
        is_es6: options.is_es6,
        imports: options.imports.clone(),
        domain: domain(spec),
        base_path: spec.base_path.clone(),
        is_secure: spec.security_definitions.is_some(),
    }
}

/// `scheme://host/basePath` with trailing slashes trimmed, or empty when
/// any of the three parts is missing.
fn domain(spec: &SwaggerSpec) -> String {
    let scheme = spec.schemes.first().filter(|s| !s.is_empty());
    let host = spec.host.as_deref().filter(|h| !h.is_empty());
    let base_path = spec.base_path.as_deref().filter(|b| !b.is_empty());
    match (scheme, host, base_path) {
        (Some(scheme), Some(host), Some(base_path)) => {
            format!("{scheme}://{host}{}", base_path.trim_end_matches('/'))
        }
        _ => String::new(),
    }
}
