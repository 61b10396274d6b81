use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use stg_core::ViewRenderer;
use stg_core::config::{self, CONFIG_FILE_NAME, StgConfig, TemplatePaths};
use stg_core::parse::{self, spec::SwaggerSpec};
use stg_core::transform;
use stg_core::view::ViewModel;
use stg_render::{RenderSettings, TemplateOverrides, TemplateRenderer};

#[derive(Parser)]
#[command(name = "stg", about = "Swagger 2.0 to TypeScript generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript from a Swagger 2.0 document
    Generate {
        /// Path to the Swagger document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// File to write the generated code to
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a Swagger 2.0 document
    Validate {
        /// Path to the Swagger document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the view model built from a Swagger document
    Inspect {
        /// Path to the Swagger document
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Initialize a new stg configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, output } => cmd_generate(input, output),

        Commands::Validate { input } => cmd_validate(input),

        Commands::Inspect { input, format } => cmd_inspect(input, format),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "stg", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<StgConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

/// Directory holding the config file; template paths are relative to it.
fn config_dir() -> &'static Path {
    Path::new(CONFIG_FILE_NAME)
        .parent()
        .unwrap_or_else(|| Path::new(""))
}

fn load_spec(path: &Path) -> Result<SwaggerSpec> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let parsed = match ext {
        "json" => parse::from_json(&content),
        _ => parse::from_yaml(&content),
    }
    .with_context(|| format!("failed to parse {}", path.display()))?;

    Ok(parsed)
}

/// Read every configured template file.
fn read_overrides(paths: &TemplatePaths) -> Result<TemplateOverrides> {
    let read = |path: &Option<PathBuf>| -> Result<Option<String>> {
        path.as_ref()
            .map(|p| {
                fs::read_to_string(p)
                    .with_context(|| format!("failed to read template {}", p.display()))
            })
            .transpose()
    };

    Ok(TemplateOverrides {
        class: read(&paths.class)?,
        method: read(&paths.method)?,
        type_decl: read(&paths.type_decl)?,
        types_wrapper: read(&paths.types_wrapper)?,
        class_wrapper: read(&paths.class_wrapper)?,
    })
}

fn cmd_generate(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output = output.unwrap_or_else(|| PathBuf::from(&cfg.output));

    let spec = load_spec(&input)?;
    let view = transform::assemble_with_options(&spec, cfg.options)
        .with_context(|| format!("failed to build view model for {}", input.display()))?;

    let settings = RenderSettings {
        mode: cfg.render.mode,
        overrides: read_overrides(&cfg.render.templates.relative_to(config_dir()))?,
        extra_context: cfg.render.extra_context,
    };
    let source = TemplateRenderer
        .render(&view, &settings)
        .context("failed to render templates")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(&output, source).with_context(|| format!("failed to write {}", output.display()))?;

    eprintln!(
        "Generated {} methods and {} types → {}",
        view.methods.len(),
        view.definitions.len(),
        output.display()
    );
    Ok(())
}

fn cmd_validate(input: PathBuf) -> Result<()> {
    let parsed = load_spec(&input)?;

    eprintln!(
        "Valid Swagger {} document: {}",
        parsed.swagger, parsed.info.title
    );
    eprintln!("  Version: {}", parsed.info.version);
    eprintln!("  Paths: {}", parsed.paths.len());
    eprintln!("  Definitions: {}", parsed.definitions.len());

    // Also validate that every operation and definition converts.
    let view = transform::assemble(&parsed)?;
    eprintln!("  Methods: {}", view.methods.len());
    eprintln!("  Imported types: {}", view.types_to_import.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_inspect(input: PathBuf, format: InspectFormat) -> Result<()> {
    let spec = load_spec(&input)?;
    let options = try_load_config()?.unwrap_or_default().options;
    let view = transform::assemble_with_options(&spec, options)?;

    let summary = build_inspect_summary(&view);

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn build_inspect_summary(view: &ViewModel) -> serde_json::Value {
    let methods: Vec<serde_json::Value> = view
        .methods
        .iter()
        .map(|m| {
            let parameters: Vec<serde_json::Value> = m
                .parameters
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "name": p.name,
                        "type": p.type_expr.expr,
                        "required": p.is_required(),
                    })
                })
                .collect();
            serde_json::json!({
                "name": m.name,
                "method": m.method.as_str(),
                "path": m.path,
                "response_type": m.response_type,
                "secure": m.security.is_secure,
                "parameters": parameters,
            })
        })
        .collect();

    let definitions: Vec<serde_json::Value> = view
        .definitions
        .iter()
        .map(|d| {
            serde_json::json!({
                "name": d.name,
                "kind": d.type_expr.kind.as_str(),
                "type": d.type_expr.expr,
            })
        })
        .collect();

    serde_json::json!({
        "info": {
            "class_name": view.info.class_name,
            "domain": view.info.domain,
            "secure": view.info.is_secure,
        },
        "methods": methods,
        "definitions": definitions,
        "types_to_import": view.types_to_import.iter().collect::<Vec<_>>(),
    })
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
