use indexmap::IndexMap;
use minijinja::{AutoEscape, Environment, Value};
use stg_core::ViewRenderer;
use stg_core::config::OutputMode;
use stg_core::view::ViewModel;

use crate::context::view_context;
use crate::error::RenderError;
use crate::templates::{REQUEST, ResolvedTemplates, TemplateOverrides, resolve_templates};

/// Everything that decides how a view model becomes text.
#[derive(Debug, Clone, Default)]
pub struct RenderSettings {
    pub mode: OutputMode,
    pub overrides: TemplateOverrides,
    pub extra_context: IndexMap<String, serde_json::Value>,
}

/// Renders view models with `minijinja`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl ViewRenderer for TemplateRenderer {
    type Config = RenderSettings;
    type Error = RenderError;

    fn render(&self, view: &ViewModel, config: &RenderSettings) -> Result<String, RenderError> {
        render_view(view, config)
    }
}

/// Resolve the templates for the configured mode and render the view.
pub fn render_view(view: &ViewModel, settings: &RenderSettings) -> Result<String, RenderError> {
    let templates = resolve_templates(settings.mode, &settings.overrides)?;
    let ctx = view_context(view, &settings.extra_context);
    log::debug!("rendering {} methods in {:?} mode", view.methods.len(), settings.mode);

    match templates {
        ResolvedTemplates::Client {
            class,
            method,
            type_decl,
        } => render_client(class, method, type_decl, ctx),
        ResolvedTemplates::Types {
            types_wrapper,
            type_decl,
        } => render_types(types_wrapper, type_decl, ctx),
        ResolvedTemplates::ClassWrapper {
            class_wrapper,
            method,
            type_decl,
        } => render_class_wrapper(class_wrapper, method, type_decl, ctx),
        ResolvedTemplates::Custom {
            class,
            method,
            type_decl,
        } => render_custom(class, method, type_decl, ctx),
    }
}

fn render_client(
    class: &str,
    method: &str,
    type_decl: &str,
    ctx: Value,
) -> Result<String, RenderError> {
    render_entry(
        "class",
        &[("class", class), ("method", method), ("type", type_decl)],
        ctx,
    )
}

fn render_types(types_wrapper: &str, type_decl: &str, ctx: Value) -> Result<String, RenderError> {
    render_entry(
        "types_wrapper",
        &[("types_wrapper", types_wrapper), ("type", type_decl)],
        ctx,
    )
}

fn render_class_wrapper(
    class_wrapper: &str,
    method: &str,
    type_decl: &str,
    ctx: Value,
) -> Result<String, RenderError> {
    render_entry(
        "class_wrapper",
        &[
            ("class_wrapper", class_wrapper),
            ("method", method),
            ("type", type_decl),
        ],
        ctx,
    )
}

/// User templates get the same partial names as the built-ins, so a custom
/// `class` can still `{% include "type" %}`.
fn render_custom(
    class: &str,
    method: &str,
    type_decl: &str,
    ctx: Value,
) -> Result<String, RenderError> {
    log::debug!("rendering with user-supplied class and method templates");
    render_entry(
        "class",
        &[("class", class), ("method", method), ("type", type_decl)],
        ctx,
    )
}

/// Register `templates` and render the one named `entry`.
fn render_entry<'a>(
    entry: &str,
    templates: &[(&'static str, &'a str)],
    ctx: Value,
) -> Result<String, RenderError> {
    let mut env = environment()?;
    for &(name, source) in templates {
        env.add_template(name, source)?;
    }
    Ok(env.get_template(entry)?.render(ctx)?)
}

/// Escape `*/` sequences that would prematurely close JSDoc comment blocks.
fn escape_jsdoc(value: String) -> String {
    value.replace("*/", "*\\/")
}

fn string_literal(value: String) -> String {
    serde_json::Value::String(value).to_string()
}

/// Generated code, not markup: autoescape stays off for every template.
fn environment<'a>() -> Result<Environment<'a>, RenderError> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("escape_jsdoc", escape_jsdoc);
    env.add_filter("string_literal", string_literal);
    env.add_template("request", REQUEST)?;
    Ok(env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stg_core::parse;
    use stg_core::transform::assemble;

    const PETSTORE: &str = r#"
swagger: '2.0'
info:
  title: Petstore
  description: "Pets <b>&</b> more */"
  version: '1.0'
host: petstore.example.com
basePath: /v1
schemes: [https]
produces: [application/json]
securityDefinitions:
  key:
    type: apiKey
    name: api_key
    in: header
paths:
  /pets:
    get:
      operationId: listPets
      security:
        - key: []
      parameters:
        - name: limit
          in: query
          type: integer
        - name: status
          in: query
          type: string
          enum: [available]
      responses:
        '200':
          description: ok
          schema:
            type: array
            items:
              $ref: '#/definitions/Pet'
    post:
      parameters:
        - name: body
          in: body
          required: true
          schema:
            $ref: '#/definitions/Pet'
      responses:
        '201':
          description: created
  /pets/{id}:
    get:
      parameters:
        - name: id
          in: path
          required: true
          type: string
      responses:
        '200':
          description: ok
          schema:
            $ref: '#/definitions/Pet'
definitions:
  Pet:
    type: object
    required: [name]
    properties:
      name:
        type: string
      tag:
        type: string
  Status:
    type: string
    enum: [available, sold]
"#;

    fn view() -> ViewModel {
        assemble(&parse::from_yaml(PETSTORE).unwrap()).unwrap()
    }

    fn settings(mode: OutputMode) -> RenderSettings {
        RenderSettings {
            mode,
            ..RenderSettings::default()
        }
    }

    #[test]
    fn test_client_mode() {
        let out = TemplateRenderer
            .render(&view(), &settings(OutputMode::Client))
            .unwrap();
        assert!(out.contains("export class Api {"), "{out}");
        assert!(out.contains("export interface Pet {"));
        assert!(out.contains("  name: string;"));
        assert!(out.contains("  tag?: string;"));
        assert!(out.contains(r#"export type Status = "available" | "sold";"#));
        assert!(out.contains("export type RequestFn"));
        assert!(out.contains(r#"domain: string = "https://petstore.example.com/v1""#));
        assert!(out.contains("listPets(parameters: {"));
        assert!(out.contains("} = {}): Promise<Array<Pet>> {"));
        assert!(out.contains(r#"query["status"] = "available";"#));
        assert!(out.contains("security: ['apiKey'],"));
        assert!(out.contains("getPetsById(parameters: {"));
        assert!(out.contains("url: this.domain + `/pets/${parameters.id}`,"));
        assert!(out.contains(r#"body: parameters["body"],"#));
        assert!(out.contains(r#""Accept": "application/json","#));
        // Client mode declares the types inline, so nothing is imported.
        assert!(!out.contains("from './types'"));
    }

    #[test]
    fn test_output_is_not_escaped() {
        let out = TemplateRenderer
            .render(&view(), &settings(OutputMode::Client))
            .unwrap();
        assert!(out.contains("Pets <b>&</b> more *\\/"));
        assert!(!out.contains("&amp;"));
    }

    #[test]
    fn test_non_es6_uses_export_assignment() {
        let mut view = view();
        view.info.is_es6 = false;
        let out = render_view(&view, &settings(OutputMode::Client)).unwrap();
        assert!(out.contains("\nclass Api {"));
        assert!(out.contains("export = Api;"));
    }

    #[test]
    fn test_types_mode() {
        let out = render_view(&view(), &settings(OutputMode::Types)).unwrap();
        assert!(out.contains("export interface Pet {"));
        assert!(!out.contains("class Api"));
        assert!(!out.contains("RequestFn"));
    }

    #[test]
    fn test_class_wrapper_mode() {
        let out = render_view(&view(), &settings(OutputMode::ClassWrapper)).unwrap();
        assert!(out.contains("import { Pet } from './types';"));
        assert!(out.contains("export function createApi(request: RequestFn"));
        assert!(out.contains("listPets(parameters: {"));
        assert!(!out.contains("export interface Pet"));
    }

    #[test]
    fn test_custom_mode() {
        let settings = RenderSettings {
            mode: OutputMode::Custom,
            overrides: TemplateOverrides {
                class: Some(
                    "{{ banner }}\n{% for method in methods %}{% include \"method\" %};{% endfor %}"
                        .to_string(),
                ),
                method: Some(
                    "{{ method.method }} {{ method.name }} -> {{ method.response_type }}".to_string(),
                ),
                ..TemplateOverrides::default()
            },
            extra_context: IndexMap::from([(
                "banner".to_string(),
                serde_json::json!("// custom"),
            )]),
        };
        let out = render_view(&view(), &settings).unwrap();
        assert_eq!(
            out,
            "// custom\nGET listPets -> Array<Pet>;POST postPets -> void;GET getPetsById -> Pet;"
        );
    }

    #[test]
    fn test_custom_mode_without_templates() {
        assert!(matches!(
            render_view(&view(), &settings(OutputMode::Custom)),
            Err(RenderError::MissingTemplate("class"))
        ));
    }

    #[test]
    fn test_template_syntax_error() {
        let settings = RenderSettings {
            mode: OutputMode::Types,
            overrides: TemplateOverrides {
                types_wrapper: Some("{% for %}".to_string()),
                ..TemplateOverrides::default()
            },
            ..RenderSettings::default()
        };
        assert!(matches!(
            render_view(&view(), &settings),
            Err(RenderError::Template(_))
        ));
    }
}
