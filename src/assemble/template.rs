//! Document template selection and rendering.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use crate::config::{self, PageConfig, TemplateConfig};

use super::assembler::AssembleError;

/// Resolved template locations for a project.
#[derive(Debug, Clone)]
pub struct TemplatePaths {
    /// Project root; per-page `document` overrides resolve against it.
    pub project_root: PathBuf,
    /// Conventional project-level override, used whenever it exists on disk.
    pub page_document: PathBuf,
    /// The project-wide default document template.
    pub default_document: PathBuf,
}

impl TemplatePaths {
    /// Resolve configured template locations against the project root (the
    /// config file's directory).
    pub fn resolve(templates: &TemplateConfig, project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            page_document: config::resolve_path(&templates.page_document, project_root),
            default_document: config::resolve_path(&templates.default, project_root),
        }
    }
}

/// A selected document template.
#[derive(Debug)]
pub struct SelectedTemplate {
    pub text: String,
    /// Whether a custom (non-default) template was used. The
    /// default-template hook only runs when this is false.
    pub is_custom: bool,
}

/// Choose the template for a page.
///
/// The per-page `document` override (resolved against the project root) or,
/// absent that, the project's conventional page document is used when it
/// exists on disk; otherwise the project default. Whichever file is selected
/// must be readable; there is no fallback past custom to default.
pub fn select_template(
    page: Option<&PageConfig>,
    paths: &TemplatePaths,
) -> Result<SelectedTemplate, AssembleError> {
    let candidate = match page.and_then(|p| p.document.as_deref()) {
        Some(document) => paths.project_root.join(document),
        None => paths.page_document.clone(),
    };

    if candidate.exists() {
        Ok(SelectedTemplate {
            text: read_template(&candidate)?,
            is_custom: true,
        })
    } else {
        Ok(SelectedTemplate {
            text: read_template(&paths.default_document)?,
            is_custom: false,
        })
    }
}

fn read_template(path: &Path) -> Result<String, AssembleError> {
    std::fs::read_to_string(path).map_err(|source| AssembleError::ReadTemplate {
        path: path.to_path_buf(),
        source,
    })
}

/// Render a document template with the page context.
///
/// Every name in the template resolves through the context alone (tera has
/// no ambient scope), and the route path is available as `path` unless the
/// page context already sets it.
pub fn render_document(
    template: &str,
    route: &str,
    page_context: &HashMap<String, serde_json::Value>,
) -> Result<String, AssembleError> {
    let mut context = Context::new();
    for (key, value) in page_context {
        context.insert(key.as_str(), value);
    }
    if !page_context.contains_key("path") {
        context.insert("path", route);
    }

    Ok(Tera::one_off(template, &context, false)?)
}
