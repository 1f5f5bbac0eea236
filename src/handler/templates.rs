//! Boundary with the template engine, which lives outside this crate.

use indexmap::IndexMap;
use thiserror::Error;

/// Values exposed to a template, by name.
pub type Binding = IndexMap<String, String>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template not found: {0}")]
    NotFound(String),

    #[error("template rendering failed: {0}")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub trait TemplateLoader {
    /// Renders the template at `path` with `binding`.
    fn render(&self, path: &str, binding: &Binding) -> Result<String, RenderError>;
}

/// A loader without any template; every render is [`RenderError::NotFound`].
pub struct NoTemplates;

impl TemplateLoader for NoTemplates {
    fn render(&self, path: &str, _binding: &Binding) -> Result<String, RenderError> {
        Err(RenderError::NotFound(path.to_string()))
    }
}
