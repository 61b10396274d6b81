pub mod config;
pub mod error;
pub mod parse;
pub mod transform;
pub mod view;

/// Trait for renderers that turn a view model into source text.
///
/// The pipeline in this crate stops at [`view::ViewModel`]; everything that
/// touches template text lives behind this seam.
pub trait ViewRenderer {
    type Config;
    type Error: std::error::Error;
    fn render(&self, view: &view::ViewModel, config: &Self::Config)
    -> Result<String, Self::Error>;
}
