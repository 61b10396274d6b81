use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("custom output mode requires a `{0}` template")]
    MissingTemplate(&'static str),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
}
