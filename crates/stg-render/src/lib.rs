pub mod context;
pub mod error;
pub mod renderer;
pub mod templates;

pub use error::RenderError;
pub use renderer::{RenderSettings, TemplateRenderer, render_view};
pub use templates::{ResolvedTemplates, TemplateOverrides, resolve_templates};
