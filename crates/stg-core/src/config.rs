use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.stg.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StgConfig {
    pub input: String,
    pub output: String,
    pub options: GenerateOptions,
    pub render: RenderConfig,
}

impl Default for StgConfig {
    fn default() -> Self {
        Self {
            input: "swagger.yaml".to_string(),
            output: "src/api/client.ts".to_string(),
            options: GenerateOptions::default(),
            render: RenderConfig::default(),
        }
    }
}

/// Options that steer the view-model assembly.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    pub class_name: String,
    pub module_name: String,
    /// Keep only operations whose first path segment matches (case-insensitive).
    pub generate_for_path: Option<String>,
    pub is_es6: bool,
    /// Extra import lines passed through to the templates verbatim.
    pub imports: Vec<String>,
    /// Return type used when the `200` response cannot be converted.
    pub default_response_type: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            class_name: "Api".to_string(),
            module_name: "api".to_string(),
            generate_for_path: None,
            is_es6: true,
            imports: Vec::new(),
            default_response_type: "void".to_string(),
        }
    }
}

/// Rendering options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub mode: OutputMode,
    pub templates: TemplatePaths,
    /// Values merged over the template context.
    pub extra_context: IndexMap<String, serde_json::Value>,
}

/// What the renderer produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Types plus a client class (`class` with `method` and `type` partials).
    #[default]
    Client,
    /// Only the type declarations (`types_wrapper`).
    Types,
    /// Only the class of request functions (`class_wrapper`).
    ClassWrapper,
    /// Caller-supplied `class` and `method` templates.
    Custom,
}

/// Template files overriding the built-in ones, relative to the config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TemplatePaths {
    pub class: Option<PathBuf>,
    pub method: Option<PathBuf>,
    #[serde(rename = "type")]
    pub type_decl: Option<PathBuf>,
    pub types_wrapper: Option<PathBuf>,
    pub class_wrapper: Option<PathBuf>,
}

impl TemplatePaths {
    /// Join every relative path onto `dir`, the config file's directory.
    pub fn relative_to(&self, dir: &Path) -> TemplatePaths {
        let join = |p: &Option<PathBuf>| p.as_ref().map(|p| dir.join(p));
        TemplatePaths {
            class: join(&self.class),
            method: join(&self.method),
            type_decl: join(&self.type_decl),
            types_wrapper: join(&self.types_wrapper),
            class_wrapper: join(&self.class_wrapper),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".stg.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<StgConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: StgConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# stg configuration
input: swagger.yaml
output: src/api/client.ts

options:
  class_name: Api
  module_name: api
  # generate_for_path: pets     # keep only operations under /pets
  is_es6: true
  imports: []
  default_response_type: void

render:
  mode: client          # client | types | class_wrapper | custom
  templates: {}
    # class: templates/class.j2
    # method: templates/method.j2
  extra_context: {}
"#
}
