//! Configuration type definitions.
//!
//! This module contains all the data structures used in appshell
//! configuration files. These types are pure data - no I/O or complex logic.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for a project (`appshell.yaml`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    pub site: SiteConfig,
    /// Static export behavior; `None` leaves route paths untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_static: Option<ExportStatic>,
    /// Document template locations.
    #[serde(default)]
    pub templates: TemplateConfig,
    /// Per-route page settings, keyed by route path (e.g. "/users/profile").
    #[serde(default)]
    pub pages: HashMap<String, PageConfig>,
}

// =============================================================================
// Site configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Name used to form bundle file names (`<library_name>.js` / `.css`).
    #[serde(default = "default_library_name")]
    pub library_name: String,

    /// Base URL prefix under which built assets are served. May be the
    /// literal placeholder token `{{ publicPath }}` to defer resolution to a
    /// later build stage.
    #[serde(default = "default_public_path")]
    pub public_path: String,

    /// Deployment base path for hosts that mount the application under a
    /// prefix not known at build time. Usually left unset here and supplied
    /// through the `BASE_URL` environment variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Output directory for generated documents.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Bundler asset manifest mapping logical bundle names to hashed output
    /// names. Only consulted for production builds.
    #[serde(default = "default_manifest")]
    pub manifest: PathBuf,
}

fn default_library_name() -> String {
    "app".to_string()
}

fn default_public_path() -> String {
    "/".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

fn default_manifest() -> PathBuf {
    PathBuf::from("dist/asset-manifest.json")
}

// =============================================================================
// Static export configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportStatic {
    /// Emit `<route>.html` files instead of `<route>/index.html`. Route
    /// paths keep their exact shape instead of gaining a trailing slash.
    #[serde(default)]
    pub html_suffix: bool,
}

// =============================================================================
// Template configuration
// =============================================================================

/// Document template locations, relative to the config file's directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// The project-wide default document template.
    #[serde(default = "default_document")]
    pub default: PathBuf,

    /// Conventional project-level override; used instead of the default
    /// whenever it exists on disk.
    #[serde(default = "default_page_document")]
    pub page_document: PathBuf,
}

fn default_document() -> PathBuf {
    PathBuf::from("templates/document.html")
}

fn default_page_document() -> PathBuf {
    PathBuf::from("src/document.html")
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            default: default_document(),
            page_document: default_page_document(),
        }
    }
}

// =============================================================================
// Page configuration
// =============================================================================

/// Per-route page settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageConfig {
    /// Template override for this page, relative to the project root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<PathBuf>,

    /// Arbitrary values handed to the document template.
    #[serde(default)]
    pub context: HashMap<String, serde_json::Value>,
}
