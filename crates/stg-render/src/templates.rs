use stg_core::config::OutputMode;

use crate::error::RenderError;

const CLASS: &str = include_str!("../templates/class.ts.j2");
const METHOD: &str = include_str!("../templates/method.ts.j2");
const TYPE: &str = include_str!("../templates/type.ts.j2");
const TYPES_WRAPPER: &str = include_str!("../templates/types_wrapper.ts.j2");
const CLASS_WRAPPER: &str = include_str!("../templates/class_wrapper.ts.j2");

/// Request option types shared by every mode that emits methods. Always
/// registered as `request`.
pub(crate) const REQUEST: &str = include_str!("../templates/request.ts.j2");

/// Template text supplied by the user; `None` falls back to the built-in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateOverrides {
    pub class: Option<String>,
    pub method: Option<String>,
    pub type_decl: Option<String>,
    pub types_wrapper: Option<String>,
    pub class_wrapper: Option<String>,
}

/// The template set one output mode renders with.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedTemplates<'a> {
    Client {
        class: &'a str,
        method: &'a str,
        type_decl: &'a str,
    },
    Types {
        types_wrapper: &'a str,
        type_decl: &'a str,
    },
    ClassWrapper {
        class_wrapper: &'a str,
        method: &'a str,
        type_decl: &'a str,
    },
    Custom {
        class: &'a str,
        method: &'a str,
        type_decl: &'a str,
    },
}

/// Pick the templates for `mode`. Custom mode has no built-in class or
/// method template, so both must be supplied.
pub fn resolve_templates(
    mode: OutputMode,
    overrides: &TemplateOverrides,
) -> Result<ResolvedTemplates<'_>, RenderError> {
    let type_decl = pick(&overrides.type_decl, TYPE);
    let resolved = match mode {
        OutputMode::Client => ResolvedTemplates::Client {
            class: pick(&overrides.class, CLASS),
            method: pick(&overrides.method, METHOD),
            type_decl,
        },
        OutputMode::Types => ResolvedTemplates::Types {
            types_wrapper: pick(&overrides.types_wrapper, TYPES_WRAPPER),
            type_decl,
        },
        OutputMode::ClassWrapper => ResolvedTemplates::ClassWrapper {
            class_wrapper: pick(&overrides.class_wrapper, CLASS_WRAPPER),
            method: pick(&overrides.method, METHOD),
            type_decl,
        },
        OutputMode::Custom => ResolvedTemplates::Custom {
            class: overrides
                .class
                .as_deref()
                .ok_or(RenderError::MissingTemplate("class"))?,
            method: overrides
                .method
                .as_deref()
                .ok_or(RenderError::MissingTemplate("method"))?,
            type_decl,
        },
    };
    Ok(resolved)
}

fn pick<'a>(user: &'a Option<String>, builtin: &'static str) -> &'a str {
    user.as_deref().unwrap_or(builtin)
}
