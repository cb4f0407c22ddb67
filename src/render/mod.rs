//! Renderer module — trait-based format dispatch.

pub mod json;
pub mod markdown;

use crate::model::ModuleDoc;
use anyhow::{anyhow, Result};

/// Trait for rendering a ModuleDoc into a specific output format.
///
/// Rendering is a pure function of the document: same input, same bytes.
pub trait Renderer {
    fn render(&self, doc: &ModuleDoc) -> Result<String>;
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, repo_url: &str) -> Result<Box<dyn Renderer>> {
    match format {
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer::new(repo_url))),
        "json" => Ok(Box::new(json::JsonRenderer)),
        _ => Err(anyhow!("unknown format: {}. Use markdown or json", format)),
    }
}
