//! Configuration loading and types for appshell.
//!
//! This module handles all aspects of configuration:
//! - Type definitions for config structures (`types`)
//! - Loading configs from files (`load`)

use std::path::{Path, PathBuf};

mod load;
mod types;

// Re-export all types for convenient access
pub use types::{ExportStatic, PageConfig, ShellConfig, SiteConfig, TemplateConfig};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("failed to read config file: {0}")]
    Read(std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Get the base path from a config file path (its parent directory).
///
/// Relative paths in the config file resolve against this directory.
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Resolve a possibly-relative path against a base directory.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}
